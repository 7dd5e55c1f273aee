// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types for activity tracking.
//!
//! Events describe what the user did in the wizard and how long the heavy
//! operations (preview render, AI edit, sheet build, export) took.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use super::{ErrorType, WarningType};

/// User-initiated actions that can be captured for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum UserAction {
    // ==========================================================================
    // Upload
    // ==========================================================================
    /// Load a photo into the wizard.
    LoadPhoto {
        /// Optional context (e.g., `cli`, `drag_drop`).
        #[serde(skip_serializing_if = "Option::is_none")]
        source: Option<String>,
    },

    // ==========================================================================
    // Edit step
    // ==========================================================================
    /// Move one of the filter sliders.
    AdjustFilter {
        /// Filter name (`brightness`, `contrast`, ...).
        filter: String,
    },

    /// Finish a drag, zoom or rotate gesture.
    CommitGesture,

    /// Turn the photo by 90 degrees.
    RotateQuarter { clockwise: bool },

    Undo,

    Redo,

    /// Ask the AI service for a background or outfit edit.
    RequestAiEdit {
        /// `background` or `outfit`.
        kind: String,
    },

    /// Resend the last failed AI edit.
    RetryAiEdit,

    // ==========================================================================
    // Wizard navigation
    // ==========================================================================
    NextStep,

    PreviousStep,

    /// Start over with a new photo.
    ResetSession,

    // ==========================================================================
    // Print step
    // ==========================================================================
    /// Select a passport standard by country code.
    SelectStandard { code: String },

    /// Select `single` or `a4`.
    SelectLayout { layout: String },

    /// Write the sheet to disk.
    ExportSheet { format: String },

    /// Produce the printable HTML document.
    OpenPrintDocument,
}

/// Application state changes worth correlating with user actions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AppStateEvent {
    /// The wizard moved to another step.
    StepChanged { step: String },

    /// A photo was accepted.
    PhotoLoaded {
        format: String,
        width: u32,
        height: u32,
    },
}

/// Timed application operations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum AppOperation {
    /// Filtered preview re-render.
    RenderPreview { duration_ms: u64, cache_hit: bool },

    /// One round trip to the AI image-editing service.
    AiEdit {
        kind: String,
        duration_ms: u64,
        success: bool,
    },

    /// Composition and tiling of the print sheet.
    BuildSheet { duration_ms: u64, copies: u32 },

    /// Sheet written to disk.
    Export {
        format: String,
        duration_ms: u64,
        size_bytes: u64,
    },
}

/// A non-critical problem.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WarningEvent {
    pub warning_type: WarningType,
    /// Sanitized message (no file paths).
    pub message: String,
}

impl WarningEvent {
    #[must_use]
    pub fn new(warning_type: WarningType, message: impl Into<String>) -> Self {
        Self {
            warning_type,
            message: message.into(),
        }
    }
}

/// A failed operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorEvent {
    pub error_type: ErrorType,
    /// Sanitized message (no file paths).
    pub message: String,
}

impl ErrorEvent {
    #[must_use]
    pub fn new(error_type: ErrorType, message: impl Into<String>) -> Self {
        Self {
            error_type,
            message: message.into(),
        }
    }
}

/// A diagnostic event with its capture time.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    /// When the event occurred (monotonic clock for duration calculations)
    pub timestamp: Instant,
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    /// Creates a new diagnostic event with the current timestamp.
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp: Instant::now(),
            kind,
        }
    }

    #[must_use]
    pub fn with_timestamp(kind: DiagnosticEventKind, timestamp: Instant) -> Self {
        Self { timestamp, kind }
    }
}

/// The type and associated data for a diagnostic event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    UserAction {
        action: UserAction,
        /// Optional additional details.
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },

    AppState { state: AppStateEvent },

    Operation { operation: AppOperation },

    Warning {
        #[serde(flatten)]
        event: WarningEvent,
    },

    Error {
        #[serde(flatten)]
        event: ErrorEvent,
    },
}
