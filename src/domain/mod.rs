// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core lens types with ZERO external dependencies.
//!
//! This module contains pure domain types, value objects, and business rules.
//! It has no dependencies on external crates (except `std`) to ensure
//! testability and architectural purity.
//!
//! # Modules
//!
//! - [`lens`]: Lens value objects ([`ZoomLevel`](lens::ZoomLevel),
//!   [`LensSize`](lens::LensSize), [`LensShape`](lens::LensShape),
//!   [`ExportFormat`](lens::ExportFormat), [`DisplayGeometry`](lens::DisplayGeometry))

pub mod lens;
