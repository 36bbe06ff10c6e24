// SPDX-License-Identifier: MPL-2.0
//! Zoom state management
//!
//! This module holds the lens magnification, size and shape. Every mutator
//! clamps silently and reports whether the stored value changed, so the
//! session can redraw on the same event tick.

use crate::config::{WHEEL_ZOOM_STEP, ZOOM_LEVEL_RESOLUTION};
use crate::domain::lens::{LensShape, LensSize, ZoomLevel};

/// Current lens magnification, viewport size and clip shape.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ZoomState {
    level: ZoomLevel,
    lens_size: LensSize,
    shape: LensShape,
}

impl ZoomState {
    /// Builds a state from already clamped values.
    #[must_use]
    pub fn new(level: ZoomLevel, lens_size: LensSize, shape: LensShape) -> Self {
        Self {
            level,
            lens_size,
            shape,
        }
    }

    /// Current magnification factor.
    #[must_use]
    pub fn level(&self) -> f32 {
        self.level.value()
    }

    /// Lens viewport edge length in pixels.
    #[must_use]
    pub fn lens_size(&self) -> u32 {
        self.lens_size.value()
    }

    /// Radius of the circular clip.
    #[must_use]
    pub fn lens_radius(&self) -> f32 {
        self.lens_size.radius()
    }

    #[must_use]
    pub fn shape(&self) -> LensShape {
        self.shape
    }

    /// Edge length of the source square sampled by the lens.
    #[must_use]
    pub fn source_side(&self) -> f32 {
        self.lens_size.value() as f32 / self.level.value()
    }

    /// Sets the magnification, clamped to 1.0–5.0.
    ///
    /// Returns true if the stored level changed.
    pub fn set_level(&mut self, level: f32) -> bool {
        self.replace_level(ZoomLevel::new(level))
    }

    /// Applies a wheel gesture measured in notches.
    ///
    /// Each notch changes the level by [`WHEEL_ZOOM_STEP`]; positive notches
    /// (scroll up, away from the user) zoom in. The level is snapped to
    /// 1/[`ZOOM_LEVEL_RESOLUTION`] before clamping so repeated small steps do
    /// not accumulate float error.
    ///
    /// Returns the new level.
    pub fn apply_wheel_delta(&mut self, notches: f32) -> f32 {
        if !notches.is_finite() {
            return self.level();
        }
        let raw = self.level() + notches * WHEEL_ZOOM_STEP;
        let snapped = (raw * ZOOM_LEVEL_RESOLUTION).round() / ZOOM_LEVEL_RESOLUTION;
        self.replace_level(ZoomLevel::new(snapped));
        self.level()
    }

    /// Sets the lens size, clamped to 50–300 pixels.
    ///
    /// Returns true if the stored size changed.
    pub fn set_lens_size(&mut self, px: i64) -> bool {
        let size = LensSize::new(px);
        let changed = size != self.lens_size;
        self.lens_size = size;
        changed
    }

    /// Returns true if the shape changed.
    pub fn set_shape(&mut self, shape: LensShape) -> bool {
        let changed = shape != self.shape;
        self.shape = shape;
        changed
    }

    fn replace_level(&mut self, level: ZoomLevel) -> bool {
        let changed = level != self.level;
        self.level = level;
        changed
    }
}
