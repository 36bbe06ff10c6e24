// SPDX-License-Identifier: MPL-2.0
//! The zoom lens engine.
//!
//! - [`mapper`]: display-space to image-space coordinates
//! - [`zoom`]: magnification, lens size and shape
//! - [`renderer`]: sampling and clipping the magnified patch
//! - [`compositor`]: drawing the lens onto the full image for export
//! - [`session`]: the event dispatcher hosts talk to
//!
//! Everything here is free of UI dependencies; the iced widgets in
//! [`crate::ui`] are one possible host.

pub mod compositor;
pub mod mapper;
pub mod renderer;
pub mod session;
pub mod zoom;

pub use compositor::{composite, export, LensPlacement};
pub use mapper::{map_to_display_space, map_to_image_space};
pub use renderer::{render, LensFrame};
pub use session::{Effect, Event, ExportJob, HoverState, LensSession};
pub use zoom::ZoomState;
