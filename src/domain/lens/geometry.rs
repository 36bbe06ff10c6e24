// SPDX-License-Identifier: MPL-2.0
//! Geometry value objects shared by the mapper, renderer and compositor.

/// A pointer position relative to the top-left corner of the displayed image,
/// in display (logical screen) pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DisplayPoint {
    pub x: f32,
    pub y: f32,
}

impl DisplayPoint {
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A position in natural image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ImagePoint {
    pub x: f32,
    pub y: f32,
}

impl ImagePoint {
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Displayed vs natural size of the image.
///
/// The displayed size changes with the host layout while the natural size is
/// fixed by the decoded resource. A value of this type always has positive,
/// finite displayed dimensions and non-zero natural dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayGeometry {
    displayed_width: f32,
    displayed_height: f32,
    natural_width: u32,
    natural_height: u32,
}

impl DisplayGeometry {
    /// Builds a geometry, returning `None` while the image is not visible
    /// (zero or non-finite displayed size) or the resource is empty.
    #[must_use]
    pub fn new(
        displayed_width: f32,
        displayed_height: f32,
        natural_width: u32,
        natural_height: u32,
    ) -> Option<Self> {
        let displayed_ok = displayed_width.is_finite()
            && displayed_height.is_finite()
            && displayed_width > 0.0
            && displayed_height > 0.0;
        if !displayed_ok || natural_width == 0 || natural_height == 0 {
            return None;
        }
        Some(Self {
            displayed_width,
            displayed_height,
            natural_width,
            natural_height,
        })
    }

    /// Geometry for an image shown at its natural size.
    #[must_use]
    pub fn unscaled(natural_width: u32, natural_height: u32) -> Option<Self> {
        Self::new(
            natural_width as f32,
            natural_height as f32,
            natural_width,
            natural_height,
        )
    }

    #[must_use]
    pub fn displayed_width(&self) -> f32 {
        self.displayed_width
    }

    #[must_use]
    pub fn displayed_height(&self) -> f32 {
        self.displayed_height
    }

    #[must_use]
    pub fn natural_width(&self) -> u32 {
        self.natural_width
    }

    #[must_use]
    pub fn natural_height(&self) -> u32 {
        self.natural_height
    }

    /// Natural pixels per display pixel, horizontally and vertically.
    #[must_use]
    pub fn scale_factors(&self) -> (f32, f32) {
        (
            self.natural_width as f32 / self.displayed_width,
            self.natural_height as f32 / self.displayed_height,
        )
    }

    /// Returns whether a display point lies on the displayed image.
    #[must_use]
    pub fn contains(&self, point: DisplayPoint) -> bool {
        point.x >= 0.0
            && point.y >= 0.0
            && point.x < self.displayed_width
            && point.y < self.displayed_height
    }
}

/// Last known pointer position and whether it is over the image.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    pub display: DisplayPoint,
    pub is_inside: bool,
}

/// Square region of the source image sampled by the lens, in image pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceRect {
    pub x: f32,
    pub y: f32,
    pub side: f32,
}

impl SourceRect {
    /// Center of the sampled region.
    #[must_use]
    pub fn center(&self) -> ImagePoint {
        ImagePoint::new(self.x + self.side / 2.0, self.y + self.side / 2.0)
    }
}
