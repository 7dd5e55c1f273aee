// SPDX-License-Identifier: MPL-2.0
//! Pixel work for the editing session.
//!
//! Everything here is synchronous and CPU-bound: decoding and validating
//! uploads, rendering color filters, composing the framed photo, tiling it
//! onto a sheet and encoding the result for export or printing. The
//! [`crate::app`] runtime moves these calls onto blocking threads.

pub mod compose;
pub mod export;
pub mod filter;
pub mod image;
pub mod layout;
pub mod preview_cache;
pub mod print;
pub mod upload;

pub use compose::{compose_photo, Frame};
pub use export::{export_filename, write_export, ExportError, ExportFormat};
pub use filter::{apply_filters, FilterOutcome};
pub use layout::{build_sheet, compute_grid, GridLayout, LayoutError, Sheet, SheetSpec};
pub use preview_cache::PreviewCache;
pub use print::print_document;
pub use upload::{load_upload, validate_upload, UploadError};
