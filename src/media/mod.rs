// SPDX-License-Identifier: MPL-2.0
//! Host-side media handling: decoding images into resources and encoding
//! exported stills.

pub mod export;
pub mod image;

// Re-export commonly used types
pub use export::{encode, ExportedImage};
pub use image::{load_image, test_pattern, ImageResource};
