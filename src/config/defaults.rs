// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the lens engine and the demo host. Constants are organized
//! by category.
//!
//! # Categories
//!
//! - **Zoom**: Magnification bounds and wheel step
//! - **Lens**: Lens viewport size bounds
//! - **Export**: Encoder settings

use crate::domain::lens::newtypes::{lens_size_bounds, zoom_bounds};

// ==========================================================================
// Zoom Defaults
// ==========================================================================

/// Default magnification when a session starts.
pub const DEFAULT_ZOOM_LEVEL: f32 = zoom_bounds::DEFAULT;

/// Minimum magnification (1.0 = no magnification).
pub const MIN_ZOOM_LEVEL: f32 = zoom_bounds::MIN;

/// Maximum magnification.
pub const MAX_ZOOM_LEVEL: f32 = zoom_bounds::MAX;

/// Magnification change per wheel notch.
///
/// Positive notches (scrolling up, away from the user) zoom in.
pub const WHEEL_ZOOM_STEP: f32 = 0.1;

/// Pixel deltas reported by touchpads are converted to notches with this divisor.
pub const PIXELS_PER_WHEEL_NOTCH: f32 = 120.0;

/// Wheel-driven levels are snapped to this resolution to avoid float drift.
pub const ZOOM_LEVEL_RESOLUTION: f32 = 1000.0;

// ==========================================================================
// Lens Defaults
// ==========================================================================

/// Default lens viewport size in pixels.
pub const DEFAULT_LENS_SIZE_PX: u32 = lens_size_bounds::DEFAULT;

/// Minimum lens viewport size in pixels.
pub const MIN_LENS_SIZE_PX: u32 = lens_size_bounds::MIN;

/// Maximum lens viewport size in pixels.
pub const MAX_LENS_SIZE_PX: u32 = lens_size_bounds::MAX;

/// Lens size slider step used by the demo host.
pub const LENS_SIZE_SLIDER_STEP: u32 = 10;

/// Width of the outline drawn around the lens on screen.
pub const LENS_OUTLINE_WIDTH: f32 = 2.0;

// ==========================================================================
// Export Defaults
// ==========================================================================

/// JPEG quality used for lossy exports (1-100).
pub const JPEG_QUALITY: u8 = 92;

/// Base name for exported files (extension appended per format).
pub const EXPORT_FILE_STEM: &str = "zoomed_image";

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    // Zoom validation
    assert!(MIN_ZOOM_LEVEL >= 1.0);
    assert!(MIN_ZOOM_LEVEL < DEFAULT_ZOOM_LEVEL);
    assert!(MAX_ZOOM_LEVEL > DEFAULT_ZOOM_LEVEL);
    assert!(WHEEL_ZOOM_STEP > 0.0);
    assert!(PIXELS_PER_WHEEL_NOTCH > 0.0);
    assert!(ZOOM_LEVEL_RESOLUTION > 0.0);

    // Lens validation
    assert!(MIN_LENS_SIZE_PX > 0);
    assert!(MAX_LENS_SIZE_PX >= MIN_LENS_SIZE_PX);
    assert!(DEFAULT_LENS_SIZE_PX >= MIN_LENS_SIZE_PX);
    assert!(DEFAULT_LENS_SIZE_PX <= MAX_LENS_SIZE_PX);
    assert!(LENS_SIZE_SLIDER_STEP > 0);

    // Export validation
    assert!(JPEG_QUALITY > 0);
    assert!(JPEG_QUALITY <= 100);
};
