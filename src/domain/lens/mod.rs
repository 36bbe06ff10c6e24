// SPDX-License-Identifier: MPL-2.0
//! Lens value objects.
//!
//! Newtypes that keep magnification and lens size in range, the shape and
//! export format enums, and the geometry types shared by the engine.

pub mod geometry;
pub mod newtypes;

pub use geometry::{DisplayGeometry, DisplayPoint, ImagePoint, PointerState, SourceRect};
pub use newtypes::{ExportFormat, LensShape, LensSize, ZoomLevel};
