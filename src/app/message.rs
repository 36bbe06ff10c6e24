// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::error::Error;
use crate::media::ImageResource;
use crate::ui::viewer;
use std::path::PathBuf;

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    Viewer(viewer::Message),
    /// Result of decoding the image given on the command line.
    ImageLoaded(Result<ImageResource, Error>),
    /// Replace the current image with the generated test pattern.
    UseTestPattern,
    /// Export finished; `None` when the save dialog was cancelled.
    ExportFinished(Result<Option<PathBuf>, Error>),
}

/// Runtime flags passed from the command line.
#[derive(Debug, Default, Clone)]
pub struct Flags {
    /// Image to open. The test pattern is shown when absent.
    pub file_path: Option<PathBuf>,
    /// Explicit settings file instead of the default location.
    pub config_path: Option<PathBuf>,
    pub lens_size: Option<i64>,
    pub zoom: Option<f32>,
    pub format: Option<String>,
    pub shape: Option<String>,
}
