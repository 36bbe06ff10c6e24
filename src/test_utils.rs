// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons and synthetic images.
//!
//! This module re-exports the `approx` crate's absolute-difference assertion
//! for float comparison, which handles rounding that `assert_eq!` cannot.

pub use approx::assert_abs_diff_eq;

use crate::media::ImageResource;
use image_rs::{Rgba, RgbaImage};

/// Default epsilon for f32 comparisons.
/// Suitable for values that should be "exactly equal" but may have minor floating-point errors.
pub const F32_EPSILON: f32 = 1e-6;

/// Opaque image where every pixel encodes its own coordinates, so a sampled
/// pixel can be traced back to its source position.
pub fn gradient_resource(width: u32, height: u32) -> ImageResource {
    ImageResource::from_buffer(RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, (x / 256 + (y / 256) * 16) as u8, 255])
    }))
}

/// Opaque image filled with a single color.
pub fn solid_resource(width: u32, height: u32, color: [u8; 4]) -> ImageResource {
    ImageResource::from_buffer(RgbaImage::from_pixel(width, height, Rgba(color)))
}
