// SPDX-License-Identifier: MPL-2.0
//! Decoded image resources handed to the lens engine.
//!
//! Decoding is the host's job: the engine only ever sees an [`ImageResource`],
//! an immutable RGBA raster shared through an `Arc`.

use crate::error::{Error, Result};
use image_rs::{DynamicImage, GenericImageView, Rgba, RgbaImage};
use ab_glyph::{FontRef, PxScale};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_hollow_circle_mut, draw_line_segment_mut, draw_text_mut,
};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Immutable decoded raster with its natural pixel size.
///
/// Cloning is cheap: the pixels are stored behind an `Arc` and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageResource {
    pixels: Arc<RgbaImage>,
}

impl ImageResource {
    /// Creates a resource from raw RGBA8 pixels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the buffer length does not match
    /// `width * height * 4`.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = u64::from(width) * u64::from(height) * 4;
        let actual = pixels.len() as u64;
        let buffer = RgbaImage::from_raw(width, height, pixels).ok_or_else(|| {
            Error::Decode(format!(
                "RGBA buffer holds {actual} bytes, expected {expected} for {width}x{height}"
            ))
        })?;
        Ok(Self::from_buffer(buffer))
    }

    /// Wraps an already decoded RGBA buffer.
    #[must_use]
    pub fn from_buffer(buffer: RgbaImage) -> Self {
        Self {
            pixels: Arc::new(buffer),
        }
    }

    /// Converts any decoded image to RGBA8.
    #[must_use]
    pub fn from_dynamic(image: &DynamicImage) -> Self {
        Self::from_buffer(image.to_rgba8())
    }

    /// Decodes encoded bytes (PNG, JPEG, GIF, BMP, ...).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the format is unknown or the data is corrupt.
    pub fn from_encoded(bytes: &[u8]) -> Result<Self> {
        let image = image_rs::load_from_memory(bytes)?;
        let (width, height) = image.dimensions();
        log::debug!("decoded {width}x{height} image from {} bytes", bytes.len());
        Ok(Self::from_dynamic(&image))
    }

    /// Natural width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Natural height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Returns true when the raster has no pixels; such a resource cannot be rendered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Read-only access to the RGBA pixels.
    #[must_use]
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Returns a reference to the raw RGBA bytes.
    #[must_use]
    pub fn rgba_bytes(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    /// Pixel at `(x, y)`, clamped to the nearest edge pixel.
    ///
    /// Must not be called on an empty resource.
    #[must_use]
    pub fn pixel_clamped(&self, x: i64, y: i64) -> Rgba<u8> {
        let max_x = i64::from(self.width()) - 1;
        let max_y = i64::from(self.height()) - 1;
        // Both coordinates are clamped into [0, dimension - 1].
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let (cx, cy) = (x.clamp(0, max_x) as u32, y.clamp(0, max_y) as u32);
        *self.pixels.get_pixel(cx, cy)
    }
}

/// Load an image from the given path.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read ([`Error::Io`])
/// - The image format is invalid or unsupported ([`Error::Decode`])
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<ImageResource> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let resource = ImageResource::from_encoded(&bytes)?;
    log::info!(
        "loaded {} ({}x{})",
        path.display(),
        resource.width(),
        resource.height()
    );
    Ok(resource)
}

/// Width of the generated test pattern.
pub const TEST_PATTERN_WIDTH: u32 = 800;
/// Height of the generated test pattern.
pub const TEST_PATTERN_HEIGHT: u32 = 600;

const PATTERN_CIRCLES: i32 = 20;
const PATTERN_GRID_SPACING: usize = 50;
const PATTERN_BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const PATTERN_OUTLINE: Rgba<u8> = Rgba([0, 0, 0, 255]);
const PATTERN_GRID: Rgba<u8> = Rgba([211, 211, 211, 255]);
const PATTERN_LABEL: &str = "Test Pattern";
const PATTERN_LABEL_PX: f32 = 36.0;
/// Horizontal offset of the label from the image center.
const PATTERN_LABEL_OFFSET: i32 = 150;
const PATTERN_FONT: &[u8] = include_bytes!("../../assets/fonts/FiraSans-Regular.ttf");

/// Generates a colorful synthetic image: overlapping outlined circles on a
/// light grid, labeled "Test Pattern". Used when the host starts without an
/// image source.
#[must_use]
pub fn test_pattern(width: u32, height: u32) -> ImageResource {
    let mut canvas = pattern_shapes(width, height);
    draw_pattern_label(&mut canvas);
    ImageResource::from_buffer(canvas)
}

fn pattern_shapes(width: u32, height: u32) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(width.max(1), height.max(1), PATTERN_BACKGROUND);
    let (w, h) = (
        i32::try_from(canvas.width()).unwrap_or(i32::MAX),
        i32::try_from(canvas.height()).unwrap_or(i32::MAX),
    );

    for i in 0..PATTERN_CIRCLES {
        let center = ((i * 40 + 50) % w, (i * 30 + 50) % h);
        let radius = 30 + i * 5;
        // Channel values are reduced modulo 255 first, so they fit in a u8.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let fill = Rgba([
            (i * 30).rem_euclid(255) as u8,
            (i * 50 + 100).rem_euclid(255) as u8,
            (255 - i * 20).rem_euclid(255) as u8,
            255,
        ]);
        draw_filled_circle_mut(&mut canvas, center, radius, fill);
        draw_hollow_circle_mut(&mut canvas, center, radius, PATTERN_OUTLINE);
        draw_hollow_circle_mut(&mut canvas, center, radius - 1, PATTERN_OUTLINE);
    }

    let (wf, hf) = (canvas.width() as f32, canvas.height() as f32);
    for x in (0..canvas.width()).step_by(PATTERN_GRID_SPACING) {
        let x = x as f32;
        draw_line_segment_mut(&mut canvas, (x, 0.0), (x, hf), PATTERN_GRID);
    }
    for y in (0..canvas.height()).step_by(PATTERN_GRID_SPACING) {
        let y = y as f32;
        draw_line_segment_mut(&mut canvas, (0.0, y), (wf, y), PATTERN_GRID);
    }

    canvas
}

fn draw_pattern_label(canvas: &mut RgbaImage) {
    let font = match FontRef::try_from_slice(PATTERN_FONT) {
        Ok(font) => font,
        Err(err) => {
            log::warn!("test pattern label skipped: {err}");
            return;
        }
    };
    let x = i32::try_from(canvas.width() / 2).unwrap_or(i32::MAX) - PATTERN_LABEL_OFFSET;
    let y = i32::try_from(canvas.height() / 2).unwrap_or(i32::MAX);
    draw_text_mut(
        canvas,
        PATTERN_OUTLINE,
        x,
        y,
        PxScale::from(PATTERN_LABEL_PX),
        &font,
        PATTERN_LABEL,
    );
}
