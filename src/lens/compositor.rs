// SPDX-License-Identifier: MPL-2.0
//! Compositing the lens onto the full-resolution image for export.

use crate::domain::lens::{DisplayGeometry, ExportFormat, ImagePoint};
use crate::error::{Error, Result};
use crate::lens::renderer::LensFrame;
use crate::media::{encode, ExportedImage, ImageResource};
use image_rs::{Pixel, RgbaImage};

/// Where the lens lands on the exported image.
///
/// `scale_x`/`scale_y` are natural pixels per display pixel. The lens patch is
/// stretched by them so it covers the same share of the image as on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LensPlacement {
    pub center: ImagePoint,
    pub scale_x: f32,
    pub scale_y: f32,
}

impl LensPlacement {
    /// Placement for an image shown at its natural size.
    #[must_use]
    pub fn unscaled(center: ImagePoint) -> Self {
        Self {
            center,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }

    /// Placement matching the on-screen lens for the given layout.
    #[must_use]
    pub fn for_geometry(center: ImagePoint, geometry: &DisplayGeometry) -> Self {
        let (scale_x, scale_y) = geometry.scale_factors();
        Self {
            center,
            scale_x,
            scale_y,
        }
    }
}

/// Draws the lens frame over a copy of the base image.
///
/// Without a frame the result is the base image unchanged.
///
/// # Errors
///
/// Returns [`Error::ResourceUnavailable`] if the base image has no pixels.
pub fn composite(
    base: &ImageResource,
    frame: Option<&LensFrame>,
    placement: LensPlacement,
) -> Result<RgbaImage> {
    if base.is_empty() {
        return Err(Error::ResourceUnavailable);
    }

    let mut output = base.pixels().clone();
    let Some(frame) = frame else {
        return Ok(output);
    };

    overlay_scaled(&mut output, frame.image(), placement);

    Ok(output)
}

/// Composites and encodes in one step.
///
/// # Errors
///
/// Returns [`Error::ResourceUnavailable`] for an empty base image and
/// [`Error::ExportFailed`] if encoding fails.
pub fn export(
    base: &ImageResource,
    frame: Option<&LensFrame>,
    placement: LensPlacement,
    format: ExportFormat,
) -> Result<ExportedImage> {
    let raster = composite(base, frame, placement)?;
    encode(&raster, format)
}

/// Span of the stretched lens along one axis, in output pixels.
#[derive(Debug, Clone, Copy)]
struct Span {
    origin: i64,
    extent: i64,
}

impl Span {
    fn new(center: f32, lens_extent: u32, scale: f32) -> Self {
        let scale = if scale.is_finite() && scale > 0.0 {
            f64::from(scale)
        } else {
            1.0
        };
        // Float to int casts saturate, so huge scales cannot wrap.
        #[allow(clippy::cast_possible_truncation)]
        let extent = (f64::from(lens_extent) * scale).round().max(1.0) as i64;
        #[allow(clippy::cast_possible_truncation)]
        let origin = (f64::from(center) - extent as f64 / 2.0).round() as i64;
        Self { origin, extent }
    }

    /// Output range covered by the lens, clipped to `0..limit`.
    fn clipped(self, limit: u32) -> std::ops::Range<u32> {
        let start = self.origin.clamp(0, i64::from(limit));
        let end = self
            .origin
            .saturating_add(self.extent)
            .clamp(start, i64::from(limit));
        // Both ends lie in 0..=limit.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let range = start as u32..end as u32;
        range
    }

    /// Lens pixel shown at output coordinate `at`.
    fn source(self, at: u32, lens_extent: u32) -> u32 {
        let offset = i128::from(at) - i128::from(self.origin);
        let index = offset * i128::from(lens_extent) / i128::from(self.extent);
        // Clamped into the lens, which is at most a few hundred pixels.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let index = index.clamp(0, i128::from(lens_extent.saturating_sub(1))) as u32;
        index
    }
}

/// Alpha-blends the lens, stretched by the placement scale, over `output`.
///
/// Only the part of the stretched lens that falls inside `output` is
/// visited, sampling the lens by nearest neighbor.
fn overlay_scaled(output: &mut RgbaImage, lens: &RgbaImage, placement: LensPlacement) {
    let (lens_w, lens_h) = lens.dimensions();
    if lens_w == 0 || lens_h == 0 {
        return;
    }
    let span_x = Span::new(placement.center.x, lens_w, placement.scale_x);
    let span_y = Span::new(placement.center.y, lens_h, placement.scale_y);
    let columns = span_x.clipped(output.width());

    for y in span_y.clipped(output.height()) {
        let src_y = span_y.source(y, lens_h);
        for x in columns.clone() {
            let src = lens.get_pixel(span_x.source(x, lens_w), src_y);
            output.get_pixel_mut(x, y).blend(src);
        }
    }
}
