// SPDX-License-Identifier: MPL-2.0
//! `iced_zoom_lens` is a magnifying-glass widget engine: a lens follows the
//! pointer over an image, shows a magnified patch of the pixels under it, and
//! can export the image with the lens composited on top.
//!
//! The engine ([`lens`], [`domain`], [`media`], [`config`]) has no UI
//! dependency. [`ui`] and [`app`] host it in an iced demo application.

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod lens;
pub mod media;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_utils;
