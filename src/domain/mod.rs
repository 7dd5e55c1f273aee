// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core business logic with ZERO external dependencies.
//!
//! This module contains pure domain types, value objects, and business rules.
//! It has no dependencies on external crates (except `std`) to ensure
//! testability and architectural purity.
//!
//! # Modules
//!
//! - [`editing`]: Filters, transform, snapshots and the undo/redo [`History`](editing::History)
//! - [`media`]: [`EncodedImage`](media::EncodedImage) and its container format
//! - [`print`]: Passport size standards and [`PrintLayout`](print::PrintLayout)
//! - [`presets`]: Background colors and outfit catalogs for AI edits
//! - [`status`]: [`ProcessingStatus`](status::ProcessingStatus)
//! - [`wizard`]: Steps and transitions of the upload → edit → print flow

pub mod editing;
pub mod media;
pub mod presets;
pub mod print;
pub mod status;
pub mod wizard;
