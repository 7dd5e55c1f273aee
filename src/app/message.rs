// SPDX-License-Identifier: MPL-2.0
//! Top-level messages, effects and runtime flags for the application.

use std::path::PathBuf;

use crate::application::port::{AiEditError, EditRequest};
use crate::application::session::{AiJob, PreviewJob, SheetJob};
use crate::application::Sequence;
use crate::domain::editing::{FilterKind, TurnDirection};
use crate::domain::media::EncodedImage;
use crate::domain::print::{PassportStandard, PrintLayout};
use crate::media::{ExportError, ExportFormat, FilterOutcome, LayoutError, Sheet, UploadError};

/// Top-level messages consumed by `App::update`.
///
/// User intents and completions of async work share this single entry point.
#[derive(Debug, Clone)]
pub enum Message {
    // Upload step
    /// A photo file was chosen.
    OpenPhoto(PathBuf),
    PhotoLoaded(Result<EncodedImage, UploadError>),

    // Edit step: gestures
    Drag { dx: f32, dy: f32 },
    ZoomChanged(f32),
    RotationChanged(i32),
    /// Rotate button; commits on its own.
    RotateQuarter(TurnDirection),
    /// One mouse-wheel tick over the frame.
    Wheel(f32),
    /// Pointer or slider released.
    GestureReleased,
    /// No input for a while; commits accumulated wheel zoom.
    GestureSettled,
    FilterChanged(FilterKind, i32),
    Undo,
    Redo,
    PreviewRendered {
        job: PreviewJob,
        outcome: FilterOutcome,
        duration_ms: u64,
    },

    // Edit step: AI
    RequestEdit(EditRequest),
    RetryEdit,
    EditCompleted {
        sequence: Sequence,
        kind: &'static str,
        result: Result<EncodedImage, AiEditError>,
        duration_ms: u64,
    },
    DismissStatus,

    // Navigation
    Next,
    Back,
    /// Asks for confirmation before discarding the session.
    ResetRequested,
    ResetConfirmed,
    ResetCancelled,

    // Print step
    SelectStandard(&'static PassportStandard),
    SelectLayout(PrintLayout),
    SelectFormat(ExportFormat),
    SheetBuilt {
        sequence: Sequence,
        result: Result<Sheet, LayoutError>,
        duration_ms: u64,
    },
    /// Saves the sheet. `None` uses the default file name in the working directory.
    Export(Option<PathBuf>),
    ExportCompleted {
        format: ExportFormat,
        path: PathBuf,
        result: Result<u64, ExportError>,
        duration_ms: u64,
    },
    /// Writes the self-printing HTML document.
    Print(PathBuf),
    PrintDocumentWritten {
        path: PathBuf,
        result: Result<(), String>,
    },
}

/// Work requested by `App::update` and carried out by the runtime.
///
/// Every effect resolves to exactly one [`Message`].
#[derive(Debug, Clone)]
pub enum Effect {
    LoadPhoto { path: PathBuf, max_bytes: u64 },
    RenderPreview(PreviewJob),
    RequestEdit(AiJob),
    BuildSheet(SheetJob),
    WriteExport {
        sheet: Sheet,
        format: ExportFormat,
        path: PathBuf,
    },
    WritePrintDocument { html: String, path: PathBuf },
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `PASSPIX_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
}
