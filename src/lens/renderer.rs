// SPDX-License-Identifier: MPL-2.0
//! Lens rendering: sampling a magnified window of the source image into a
//! lens-shaped RGBA patch.
//!
//! # Boundary policy
//!
//! The sampling window is shifted to stay inside the image while the lens on
//! screen keeps following the pointer. Near an edge the lens therefore keeps
//! showing real pixels instead of blank space. When the window is larger than
//! the image along an axis, its origin is 0 and sampling clamps to the edge
//! pixels.
//!
//! # Sampling
//!
//! Nearest-neighbor. Live rendering and export both use the frames produced
//! here, so what is exported matches what was shown.

use crate::domain::lens::{ImagePoint, LensShape, SourceRect};
use crate::error::{Error, Result};
use crate::lens::zoom::ZoomState;
use crate::media::ImageResource;
use image_rs::{Rgba, RgbaImage};

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// A rendered lens patch and the parameters it was produced from.
#[derive(Debug, Clone, PartialEq)]
pub struct LensFrame {
    image: RgbaImage,
    center: ImagePoint,
    source: SourceRect,
    zoom: ZoomState,
}

impl LensFrame {
    /// The clipped RGBA patch (`lens_size × lens_size`).
    #[must_use]
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Image-space point the lens was centered on.
    #[must_use]
    pub fn center(&self) -> ImagePoint {
        self.center
    }

    /// Source window that was magnified.
    #[must_use]
    pub fn source(&self) -> SourceRect {
        self.source
    }

    /// Zoom state at render time.
    #[must_use]
    pub fn zoom(&self) -> ZoomState {
        self.zoom
    }

    /// Edge length of the patch in pixels.
    #[must_use]
    pub fn size(&self) -> u32 {
        self.image.width()
    }
}

/// Renders the lens centered on `center` (image space).
///
/// # Errors
///
/// Returns [`Error::ResourceUnavailable`] if the resource has no pixels.
pub fn render(resource: &ImageResource, center: ImagePoint, zoom: &ZoomState) -> Result<LensFrame> {
    if resource.is_empty() {
        return Err(Error::ResourceUnavailable);
    }

    let size = zoom.lens_size();
    let level = zoom.level();
    let source = source_rect(center, zoom.source_side(), resource.width(), resource.height());
    let radius = zoom.lens_radius();

    let image = RgbaImage::from_fn(size, size, |ox, oy| {
        if zoom.shape() == LensShape::Circle && !inside_circle(ox, oy, radius) {
            return TRANSPARENT;
        }
        let sx = sample_index(source.x, ox, level);
        let sy = sample_index(source.y, oy, level);
        resource.pixel_clamped(sx, sy)
    });

    Ok(LensFrame {
        image,
        center,
        source,
        zoom: *zoom,
    })
}

/// Computes the sampling window for a lens centered on `center`.
///
/// The origin is rounded to whole pixels and then shifted so the window stays
/// inside a `width × height` image.
#[must_use]
pub fn source_rect(center: ImagePoint, side: f32, width: u32, height: u32) -> SourceRect {
    SourceRect {
        x: window_origin(center.x, side, width),
        y: window_origin(center.y, side, height),
        side,
    }
}

fn window_origin(center: f32, side: f32, extent: u32) -> f32 {
    let max_origin = (extent as f32 - side).max(0.0);
    (center - side / 2.0).round().clamp(0.0, max_origin)
}

fn sample_index(origin: f32, offset: u32, level: f32) -> i64 {
    // Floor of a finite, bounded value; fits in i64.
    #[allow(clippy::cast_possible_truncation)]
    let index = (origin + (offset as f32 + 0.5) / level).floor() as i64;
    index
}

fn inside_circle(x: u32, y: u32, radius: f32) -> bool {
    let dx = x as f32 + 0.5 - radius;
    let dy = y as f32 + 0.5 - radius;
    dx * dx + dy * dy <= radius * radius
}
