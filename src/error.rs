// SPDX-License-Identifier: MPL-2.0
//! Crate-wide error type.
//!
//! Out-of-range configuration and pointers outside the image are not errors:
//! the former is clamped, the latter is the idle state of the lens session.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The session was asked to render or export without a decoded image.
    #[error("Image resource unavailable")]
    ResourceUnavailable,

    /// Compositing or encoding the exported still failed.
    #[error("Export failed: {0}")]
    ExportFailed(String),

    /// Image bytes could not be decoded by the host-side loader.
    #[error("Decode Error: {0}")]
    Decode(String),

    #[error("I/O Error: {0}")]
    Io(String),

    #[error("Config Error: {0}")]
    Config(String),
}

impl Error {
    /// Returns a stable identifier that hosts can map to user-facing text.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Error::ResourceUnavailable => "error-resource-unavailable",
            Error::ExportFailed(_) => "error-export-failed",
            Error::Decode(_) => "error-decode",
            Error::Io(_) => "error-io",
            Error::Config(_) => "error-config",
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        Error::Decode(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
