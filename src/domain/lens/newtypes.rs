// SPDX-License-Identifier: MPL-2.0
//! Lens newtypes.
//!
//! This module provides type-safe wrappers for lens values,
//! ensuring they are always within valid ranges.

// =============================================================================
// Zoom Bounds
// =============================================================================

/// Magnification bounds (1.0× to 5.0×).
pub mod zoom_bounds {
    /// Minimum magnification.
    pub const MIN: f32 = 1.0;
    /// Maximum magnification.
    pub const MAX: f32 = 5.0;
    /// Default magnification.
    pub const DEFAULT: f32 = 2.0;
}

// =============================================================================
// ZoomLevel
// =============================================================================

/// Lens magnification factor, guaranteed to be within valid range (1.0–5.0).
///
/// This type ensures that zoom values are always valid, eliminating
/// the need for manual clamping at usage sites.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLevel(f32);

impl ZoomLevel {
    /// Creates a new zoom level, clamping the value to the valid range.
    ///
    /// Non-finite input (NaN, ±∞) maps to the closest sensible bound:
    /// NaN to the minimum, infinities to their matching bound.
    #[must_use]
    pub fn new(level: f32) -> Self {
        if level.is_nan() {
            return Self(zoom_bounds::MIN);
        }
        Self(level.clamp(zoom_bounds::MIN, zoom_bounds::MAX))
    }

    /// Returns the raw magnification factor.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns whether the zoom is at the minimum value.
    #[must_use]
    pub fn is_min(self) -> bool {
        self.0 <= zoom_bounds::MIN
    }

    /// Returns whether the zoom is at the maximum value.
    #[must_use]
    pub fn is_max(self) -> bool {
        self.0 >= zoom_bounds::MAX
    }
}

impl Default for ZoomLevel {
    fn default() -> Self {
        Self(zoom_bounds::DEFAULT)
    }
}

// =============================================================================
// Lens Size Bounds
// =============================================================================

/// Lens viewport size bounds (50 to 300 pixels).
pub mod lens_size_bounds {
    /// Minimum lens size in pixels.
    pub const MIN: u32 = 50;
    /// Maximum lens size in pixels.
    pub const MAX: u32 = 300;
    /// Default lens size in pixels.
    pub const DEFAULT: u32 = 150;
}

// =============================================================================
// LensSize
// =============================================================================

/// Lens viewport edge length in pixels, guaranteed to be within 50–300.
///
/// Accepts any integer so that negative or oversized host input is clamped
/// instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LensSize(u32);

impl LensSize {
    /// Creates a new lens size, clamping to valid range.
    #[must_use]
    pub fn new(px: i64) -> Self {
        let clamped = px.clamp(
            i64::from(lens_size_bounds::MIN),
            i64::from(lens_size_bounds::MAX),
        );
        // Clamped into the u32 range above.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Self(clamped as u32)
    }

    /// Returns the size in pixels.
    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }

    /// Returns half the size, used as the circle radius.
    #[must_use]
    pub fn radius(self) -> f32 {
        self.0 as f32 / 2.0
    }
}

impl Default for LensSize {
    fn default() -> Self {
        Self(lens_size_bounds::DEFAULT)
    }
}

// =============================================================================
// LensShape
// =============================================================================

/// Clip shape applied to the rendered lens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LensShape {
    #[default]
    Circle,
    Square,
}

impl LensShape {
    /// Parses a host-supplied shape name; anything unknown becomes a circle.
    #[must_use]
    pub fn parse_or_default(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "square" => LensShape::Square,
            _ => LensShape::Circle,
        }
    }

    /// Returns the stable lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LensShape::Circle => "circle",
            LensShape::Square => "square",
        }
    }

    /// Returns all shapes, in display order.
    #[must_use]
    pub fn all() -> &'static [LensShape] {
        &[LensShape::Circle, LensShape::Square]
    }
}

impl std::fmt::Display for LensShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// ExportFormat
// =============================================================================

/// Encoding used for exported stills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// JPEG (lossy, smaller files).
    #[default]
    Jpg,
    /// PNG (lossless, keeps transparency).
    Png,
}

impl ExportFormat {
    /// Parses a requested format name.
    ///
    /// `jpeg` is accepted as an alias of `jpg`. Returns `None` for anything
    /// else so callers can decide whether to report the fallback.
    #[must_use]
    pub fn from_name(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "jpg" | "jpeg" => Some(ExportFormat::Jpg),
            "png" => Some(ExportFormat::Png),
            _ => None,
        }
    }

    /// Parses a requested format name, falling back to `jpg`.
    #[must_use]
    pub fn parse_or_default(raw: &str) -> Self {
        Self::from_name(raw).unwrap_or_default()
    }

    /// Returns the file extension for this format.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Jpg => "jpg",
            ExportFormat::Png => "png",
        }
    }

    /// Returns the MIME type hosts should attach to the download.
    #[must_use]
    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Jpg => "image/jpeg",
            ExportFormat::Png => "image/png",
        }
    }

    /// Returns all supported formats.
    #[must_use]
    pub fn all() -> &'static [ExportFormat] {
        &[ExportFormat::Jpg, ExportFormat::Png]
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}
