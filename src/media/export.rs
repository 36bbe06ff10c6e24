// SPDX-License-Identifier: MPL-2.0
//! Encoding of composited stills.
//!
//! This module turns an RGBA raster into the bytes of a downloadable file
//! (PNG or JPEG) using the `image` crate.

use crate::config::{EXPORT_FILE_STEM, JPEG_QUALITY};
use crate::domain::lens::ExportFormat;
use crate::error::{Error, Result};
use image_rs::codecs::jpeg::JpegEncoder;
use image_rs::{DynamicImage, ImageFormat, RgbaImage};
use std::io::Cursor;
use std::path::Path;

/// Encoded export ready to be handed to the host for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedImage {
    /// Encoded file contents.
    pub bytes: Vec<u8>,
    /// Format the bytes are encoded in.
    pub format: ExportFormat,
    /// Width of the encoded raster in pixels.
    pub width: u32,
    /// Height of the encoded raster in pixels.
    pub height: u32,
}

impl ExportedImage {
    /// Suggested file name for the download.
    #[must_use]
    pub fn file_name(&self) -> String {
        default_filename(self.format)
    }

    /// Writes the encoded bytes to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be written.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, &self.bytes)?;
        Ok(())
    }
}

/// Encodes an RGBA raster in the requested format.
///
/// PNG keeps the alpha channel. JPEG has none, so the raster is flattened to
/// RGB and encoded with [`JPEG_QUALITY`].
///
/// # Errors
///
/// Returns [`Error::ExportFailed`] if the encoder rejects the raster.
pub fn encode(raster: &RgbaImage, format: ExportFormat) -> Result<ExportedImage> {
    let mut bytes = Vec::new();

    match format {
        ExportFormat::Png => {
            raster
                .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
                .map_err(|e| Error::ExportFailed(format!("PNG encoding failed: {e}")))?;
        }
        ExportFormat::Jpg => {
            let rgb = DynamicImage::ImageRgba8(raster.clone()).to_rgb8();
            let mut encoder = JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY);
            encoder
                .encode_image(&rgb)
                .map_err(|e| Error::ExportFailed(format!("JPEG encoding failed: {e}")))?;
        }
    }

    Ok(ExportedImage {
        bytes,
        format,
        width: raster.width(),
        height: raster.height(),
    })
}

/// Generates the default download name, e.g. `zoomed_image.jpg`.
#[must_use]
pub fn default_filename(format: ExportFormat) -> String {
    format!("{EXPORT_FILE_STEM}.{}", format.extension())
}
