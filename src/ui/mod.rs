// SPDX-License-Identifier: MPL-2.0
//! iced host for the lens engine.

pub mod lens_canvas;
pub mod viewer;
