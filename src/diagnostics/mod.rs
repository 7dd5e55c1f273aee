// SPDX-License-Identifier: MPL-2.0
//! Diagnostics module for collecting and exporting activity reports.
//!
//! Events are captured during a wizard session, stored in a memory-bounded
//! circular buffer and exported as a JSON report.
//!
//! # Architecture
//!
//! - [`CircularBuffer`]: Generic ring buffer with configurable capacity
//! - [`DiagnosticEvent`]: Timestamped event
//! - [`DiagnosticsHandle`]: Non-blocking, cloneable event sender
//!
//! # Privacy
//!
//! Warning and error messages pass through [`sanitize_message`], which
//! replaces file paths with `<path>`.

mod buffer;
mod collector;
mod events;
mod export;
mod report;
mod sanitizer;

pub use buffer::{buffer_capacity_bounds, BufferCapacity, CircularBuffer};
pub use collector::{DiagnosticsCollector, DiagnosticsHandle};
pub use events::{
    AppOperation, AppStateEvent, DiagnosticEvent, DiagnosticEventKind, ErrorEvent, UserAction,
    WarningEvent,
};
pub use export::{generate_default_filename, write_atomic, ReportExportError};
pub use report::{DiagnosticReport, ReportMetadata, ReportSummary, SerializableEvent, SystemInfo};
pub use sanitizer::{sanitize_message, ErrorType, WarningType};
