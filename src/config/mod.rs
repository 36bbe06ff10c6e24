// SPDX-License-Identifier: MPL-2.0
//! This module handles the lens configuration: the validated [`LensConfig`]
//! consumed by a lens session, and the optional `settings.toml` file the demo
//! host reads it from.
//!
//! # Configuration Sections
//!
//! - `[lens]` - Lens size, zoom level and shape
//! - `[export]` - Download format
//!
//! Every value is optional. Out-of-range numbers are clamped and unknown names
//! fall back to their defaults; nothing in the file is ever rejected once it
//! parses as TOML.
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()` with explicit path
//! 2. Set `ICED_ZOOM_LENS_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use iced_zoom_lens::config;
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (config, _warning) = config::load();
//! let lens = config.lens_config();
//! assert!((50..=300).contains(&lens.lens_size.value()));
//! ```

pub mod defaults;
pub mod paths;

pub use defaults::*;

use crate::domain::lens::{ExportFormat, LensShape, LensSize, ZoomLevel};
use crate::error::Result;
use crate::lens::ZoomState;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Lens Configuration
// =============================================================================

/// Host configuration consumed when a lens session is created.
///
/// All fields are already clamped or resolved, so a value of this type is
/// always valid.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LensConfig {
    pub lens_size: LensSize,
    pub zoom_level: ZoomLevel,
    pub format: ExportFormat,
    pub shape: LensShape,
}

impl LensConfig {
    /// Builds a configuration from unchecked host input.
    ///
    /// Lens size and zoom are clamped, names are matched case-insensitively,
    /// `jpeg` is accepted for `jpg`, an unknown format falls back to `jpg` and
    /// an unknown shape to `circle`.
    #[must_use]
    pub fn from_raw(lens_size: i64, zoom_level: f32, format: &str, shape: &str) -> Self {
        Self {
            lens_size: LensSize::new(lens_size),
            zoom_level: ZoomLevel::new(zoom_level),
            format: resolve_format(format),
            shape: LensShape::parse_or_default(shape),
        }
    }

    /// Initial zoom state for a session using this configuration.
    #[must_use]
    pub fn zoom_state(&self) -> ZoomState {
        ZoomState::new(self.zoom_level, self.lens_size, self.shape)
    }
}

/// Resolves a download format name, warning when it falls back to `jpg`.
#[must_use]
pub fn resolve_format(raw: &str) -> ExportFormat {
    ExportFormat::from_name(raw).unwrap_or_else(|| {
        log::warn!("unsupported export format {raw:?}, falling back to jpg");
        ExportFormat::default()
    })
}

// =============================================================================
// Section Structs
// =============================================================================

/// Lens settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct LensSection {
    /// Lens viewport size in pixels (clamped to 50-300).
    #[serde(default)]
    pub lens_size: Option<i64>,

    /// Initial magnification (clamped to 1.0-5.0).
    #[serde(default)]
    pub zoom_level: Option<f32>,

    /// `circle` or `square`.
    #[serde(default)]
    pub shape: Option<String>,
}

/// Export settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct ExportSection {
    /// `jpg` (alias `jpeg`) or `png`.
    #[serde(default)]
    pub format: Option<String>,
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Settings file contents.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub lens: LensSection,

    #[serde(default)]
    pub export: ExportSection,
}

impl Config {
    /// Resolves the file values, filling gaps with defaults.
    #[must_use]
    pub fn lens_config(&self) -> LensConfig {
        LensConfig::from_raw(
            self.lens
                .lens_size
                .unwrap_or(i64::from(DEFAULT_LENS_SIZE_PX)),
            self.lens.zoom_level.unwrap_or(DEFAULT_ZOOM_LEVEL),
            self.export
                .format
                .as_deref()
                .unwrap_or(ExportFormat::default().extension()),
            self.lens
                .shape
                .as_deref()
                .unwrap_or(LensShape::default().as_str()),
        )
    }
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config file path with an optional override.
fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning key explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    log::warn!("ignoring {}: {err}", path.display());
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
///
/// # Errors
///
/// Returns [`Error::Io`](crate::error::Error::Io) if the file cannot be read and
/// [`Error::Config`](crate::error::Error::Config) if it is not valid TOML.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    log::debug!("loaded config from {}", path.display());
    Ok(config)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::test_utils::assert_abs_diff_eq;
    use tempfile::tempdir;

    #[test]
    fn from_raw_clamps_and_normalizes() {
        let config = LensConfig::from_raw(20, 9.0, " JPEG ", "Square");
        assert_eq!(config.lens_size.value(), 50);
        assert_abs_diff_eq!(config.zoom_level.value(), 5.0);
        assert_eq!(config.format, ExportFormat::Jpg);
        assert_eq!(config.shape, LensShape::Square);
    }

    #[test]
    fn from_raw_falls_back_for_unknown_names() {
        let config = LensConfig::from_raw(150, 2.0, "bmp", "hexagon");
        assert_eq!(config.format, ExportFormat::Jpg);
        assert_eq!(config.shape, LensShape::Circle);
    }

    #[test]
    fn default_lens_config_matches_defaults() {
        let config = LensConfig::default();
        assert_eq!(config.lens_size.value(), DEFAULT_LENS_SIZE_PX);
        assert_abs_diff_eq!(config.zoom_level.value(), DEFAULT_ZOOM_LEVEL);
        assert_eq!(config.format, ExportFormat::Jpg);
        assert_eq!(config.shape, LensShape::Circle);
        assert_eq!(config.zoom_state(), ZoomState::default());
    }

    #[test]
    fn empty_file_config_resolves_to_defaults() {
        assert_eq!(Config::default().lens_config(), LensConfig::default());
    }

    #[test]
    fn load_from_path_reads_sections() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join(CONFIG_FILE);
        fs::write(
            &config_path,
            "[lens]\nlens_size = 400\nzoom_level = 3.5\nshape = \"square\"\n\n[export]\nformat = \"png\"\n",
        )
        .expect("failed to write config");

        let config = load_from_path(&config_path).expect("failed to load config");
        let lens = config.lens_config();

        assert_eq!(lens.lens_size.value(), 300);
        assert_abs_diff_eq!(lens.zoom_level.value(), 3.5);
        assert_eq!(lens.shape, LensShape::Square);
        assert_eq!(lens.format, ExportFormat::Png);
    }

    #[test]
    fn load_from_path_accepts_partial_sections() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&config_path, "[export]\nformat = \"gif\"\n").expect("failed to write config");

        let lens = load_from_path(&config_path)
            .expect("failed to load config")
            .lens_config();
        assert_eq!(lens.format, ExportFormat::Jpg);
        assert_eq!(lens.lens_size.value(), DEFAULT_LENS_SIZE_PX);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        match load_from_path(&config_path) {
            Err(Error::Config(message)) => assert!(!message.is_empty()),
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn load_with_override_warns_on_broken_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[lens\n").expect("failed to write");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert_eq!(warning.as_deref(), Some("notification-config-load-error"));
    }

    #[test]
    fn load_with_override_missing_file_is_silent() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }
}
