// SPDX-License-Identifier: MPL-2.0
//! Display-space to image-space coordinate mapping.
//!
//! Both functions are pure: the result depends only on the point and the
//! geometry, and the geometry must be rebuilt whenever the host layout
//! changes.

use crate::domain::lens::{DisplayGeometry, DisplayPoint, ImagePoint};

/// Maps a pointer position on the displayed image to natural image pixels.
///
/// The result always lies in `[0, natural_width) × [0, natural_height)`:
/// positions beyond the displayed image clamp to the nearest edge pixel, and
/// non-finite coordinates map to 0.
#[must_use]
pub fn map_to_image_space(point: DisplayPoint, geometry: &DisplayGeometry) -> ImagePoint {
    let (sx, sy) = geometry.scale_factors();
    ImagePoint::new(
        clamp_axis(point.x * sx, geometry.natural_width()),
        clamp_axis(point.y * sy, geometry.natural_height()),
    )
}

/// Maps an image position back to display space (used to place the lens).
#[must_use]
pub fn map_to_display_space(point: ImagePoint, geometry: &DisplayGeometry) -> DisplayPoint {
    let (sx, sy) = geometry.scale_factors();
    DisplayPoint::new(point.x / sx, point.y / sy)
}

/// Clamps one coordinate to the last pixel of an axis of `extent` pixels.
fn clamp_axis(value: f32, extent: u32) -> f32 {
    if !value.is_finite() {
        return if value == f32::INFINITY {
            last_pixel(extent)
        } else {
            0.0
        };
    }
    value.clamp(0.0, last_pixel(extent))
}

fn last_pixel(extent: u32) -> f32 {
    extent.saturating_sub(1) as f32
}
