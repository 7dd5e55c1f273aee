// SPDX-License-Identifier: MPL-2.0
//! The editing session: sole owner of wizard state.
//!
//! A [`Session`] never does pixel work itself. Operations that need a render,
//! an AI call or a sheet return a job describing the work, tagged with a
//! [`Sequence`]. The caller executes the job and hands the result back via the
//! matching `complete_*` method, which drops anything that is no longer the
//! latest request of its kind.
//!
//! History commits follow gestures, not frames: live changes only touch the
//! live transform and filters until [`Session::commit_gesture`] runs. Wheel
//! zoom has no release event, so wheel ticks stay pending until the next
//! committing action or [`Session::settle_gesture`].

use crate::application::port::{AiEditError, EditRequest};
use crate::domain::editing::{
    FilterKind, FilterSettings, FilterValue, History, RotationDegrees, Snapshot, Transform,
    TurnDirection, ZoomScale,
};
use crate::domain::media::EncodedImage;
use crate::domain::print::{PassportStandard, PrintLayout};
use crate::domain::status::{ProcessingStatus, StatusLine, StatusMessage};
use crate::domain::wizard::{transition, InvalidTransition, WizardAction, WizardStep};
use crate::media::export::ExportFormat;
use crate::media::layout::{LayoutError, Sheet};

// =============================================================================
// Sequences
// =============================================================================

/// Tag identifying one asynchronous request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Sequence(u64);

impl Sequence {
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Issues monotonically increasing sequences for one kind of request and
/// remembers which one is current.
#[derive(Debug, Clone, Default)]
pub struct RequestSequence {
    issued: u64,
    latest: Option<u64>,
}

impl RequestSequence {
    /// Issues a new sequence, superseding all earlier ones.
    pub fn issue(&mut self) -> Sequence {
        self.issued += 1;
        self.latest = Some(self.issued);
        Sequence(self.issued)
    }

    /// Makes every issued sequence stale.
    pub fn invalidate(&mut self) {
        self.latest = None;
    }

    #[must_use]
    pub fn is_latest(&self, sequence: Sequence) -> bool {
        self.latest == Some(sequence.0)
    }

    #[must_use]
    pub fn in_flight(&self) -> bool {
        self.latest.is_some()
    }

    /// Marks the current request as finished without issuing a new one.
    fn settle(&mut self, sequence: Sequence) {
        if self.is_latest(sequence) {
            self.latest = None;
        }
    }
}

// =============================================================================
// Jobs
// =============================================================================

/// Re-render the preview of `base` with `filters`.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewJob {
    pub sequence: Sequence,
    pub base: EncodedImage,
    pub filters: FilterSettings,
}

/// Send `base` to the image-editing service.
#[derive(Debug, Clone, PartialEq)]
pub struct AiJob {
    pub sequence: Sequence,
    pub base: EncodedImage,
    pub request: EditRequest,
    pub instruction: String,
}

/// Compose the edited photo and lay out the print sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetJob {
    pub sequence: Sequence,
    pub base: EncodedImage,
    pub transform: Transform,
    pub filters: FilterSettings,
    pub standard: &'static PassportStandard,
    pub layout: PrintLayout,
}

/// What happened to an AI result handed back to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum AiOutcome {
    /// The result belonged to a superseded or invalidated request.
    Stale,
    /// The edit replaced the base image and was committed.
    Applied(PreviewJob),
    /// The edit failed; nothing was committed.
    Failed(AiEditError),
}

/// What happened to a sheet result handed back to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum SheetOutcome {
    Stale,
    Ready,
    Failed(LayoutError),
}

// =============================================================================
// Session
// =============================================================================

/// Wizard state for one photo, from upload to print.
#[derive(Debug, Clone)]
pub struct Session {
    step: WizardStep,
    original: Option<EncodedImage>,
    base: Option<EncodedImage>,
    preview: Option<EncodedImage>,
    transform: Transform,
    filters: FilterSettings,
    history: Option<History<Snapshot>>,
    wheel_pending: bool,
    standard: &'static PassportStandard,
    layout: PrintLayout,
    format: ExportFormat,
    status: StatusLine,
    last_edit: Option<EditRequest>,
    sheet: Option<Sheet>,
    sheet_error: Option<LayoutError>,
    preview_seq: RequestSequence,
    ai_seq: RequestSequence,
    sheet_seq: RequestSequence,
}

impl Session {
    #[must_use]
    pub fn new(
        standard: &'static PassportStandard,
        layout: PrintLayout,
        format: ExportFormat,
    ) -> Self {
        Self {
            step: WizardStep::Upload,
            original: None,
            base: None,
            preview: None,
            transform: Transform::identity(),
            filters: FilterSettings::neutral(),
            history: None,
            wheel_pending: false,
            standard,
            layout,
            format,
            status: StatusLine::idle(),
            last_edit: None,
            sheet: None,
            sheet_error: None,
            preview_seq: RequestSequence::default(),
            ai_seq: RequestSequence::default(),
            sheet_seq: RequestSequence::default(),
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn step(&self) -> WizardStep {
        self.step
    }

    #[must_use]
    pub fn original(&self) -> Option<&EncodedImage> {
        self.original.as_ref()
    }

    #[must_use]
    pub fn base(&self) -> Option<&EncodedImage> {
        self.base.as_ref()
    }

    /// Latest rendered preview, or the base image until one arrives.
    #[must_use]
    pub fn preview(&self) -> Option<&EncodedImage> {
        self.preview.as_ref().or(self.base.as_ref())
    }

    #[must_use]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    #[must_use]
    pub fn filters(&self) -> FilterSettings {
        self.filters
    }

    #[must_use]
    pub fn history(&self) -> Option<&History<Snapshot>> {
        self.history.as_ref()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.as_ref().is_some_and(History::can_undo)
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.as_ref().is_some_and(History::can_redo)
    }

    /// True while wheel zoom has changed the transform without a commit.
    #[must_use]
    pub fn has_pending_gesture(&self) -> bool {
        self.wheel_pending
    }

    #[must_use]
    pub fn standard(&self) -> &'static PassportStandard {
        self.standard
    }

    #[must_use]
    pub fn layout(&self) -> PrintLayout {
        self.layout
    }

    #[must_use]
    pub fn format(&self) -> ExportFormat {
        self.format
    }

    #[must_use]
    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    #[must_use]
    pub fn last_edit(&self) -> Option<&EditRequest> {
        self.last_edit.as_ref()
    }

    #[must_use]
    pub fn sheet(&self) -> Option<&Sheet> {
        self.sheet.as_ref()
    }

    #[must_use]
    pub fn sheet_error(&self) -> Option<&LayoutError> {
        self.sheet_error.as_ref()
    }

    // -------------------------------------------------------------------------
    // Upload
    // -------------------------------------------------------------------------

    /// Accepts a validated upload and enters the edit step.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTransition`] outside the upload step.
    pub fn load_image(&mut self, image: EncodedImage) -> Result<PreviewJob, InvalidTransition> {
        self.step = transition(self.step, WizardAction::ImageLoaded)?;
        self.ai_seq.invalidate();
        self.sheet_seq.invalidate();
        self.original = Some(image.clone());
        self.base = Some(image.clone());
        self.preview = None;
        self.transform = Transform::identity();
        self.filters = FilterSettings::neutral();
        self.history = Some(History::new(Snapshot::initial(image.clone())));
        self.wheel_pending = false;
        self.status = StatusLine::idle();
        self.last_edit = None;
        self.sheet = None;
        self.sheet_error = None;
        Ok(self.preview_job(image))
    }

    // -------------------------------------------------------------------------
    // Gestures
    // -------------------------------------------------------------------------

    /// Framing, filters and history only change on the edit step.
    fn editing(&self) -> bool {
        self.step == WizardStep::Edit
    }

    /// Moves the photo during a drag. Nothing is committed until release.
    pub fn drag_by(&mut self, dx: f32, dy: f32) {
        if !self.editing() {
            return;
        }
        self.flush_wheel();
        self.transform = self.transform.translated_by(dx, dy);
    }

    /// Sets the zoom from the slider. Nothing is committed until release.
    pub fn set_zoom(&mut self, scale: f32) {
        if !self.editing() {
            return;
        }
        self.flush_wheel();
        self.transform = self.transform.with_scale(ZoomScale::new(scale));
    }

    /// Sets the rotation from the slider. Nothing is committed until release.
    pub fn set_rotation(&mut self, degrees: i32) {
        if !self.editing() {
            return;
        }
        self.flush_wheel();
        self.transform = self.transform.with_rotation(RotationDegrees::new(degrees));
    }

    /// Turns the photo by 90 degrees and commits right away.
    ///
    /// Returns `true` if an entry was committed.
    pub fn rotate_quarter(&mut self, direction: TurnDirection) -> bool {
        if !self.editing() || self.base.is_none() {
            return false;
        }
        self.flush_wheel();
        let rotation = self.transform.rotation.quarter_turn(direction);
        self.transform = self.transform.with_rotation(rotation);
        self.commit_live()
    }

    /// Applies one mouse-wheel tick. Ticks accumulate into a single pending
    /// gesture.
    pub fn wheel_zoom(&mut self, delta_y: f32) {
        if !self.editing() || self.base.is_none() {
            return;
        }
        self.transform = self
            .transform
            .with_scale(self.transform.scale.apply_wheel(delta_y));
        self.wheel_pending = true;
    }

    /// Changes one filter live and asks for a fresh preview.
    pub fn set_filter(&mut self, kind: FilterKind, value: i32) -> Option<PreviewJob> {
        if !self.editing() {
            return None;
        }
        self.flush_wheel();
        let base = self.base.clone()?;
        self.filters = self.filters.with(kind, FilterValue::new(value));
        Some(self.preview_job(base))
    }

    /// Ends a drag or slider gesture. Returns `true` if an entry was committed.
    pub fn commit_gesture(&mut self) -> bool {
        self.wheel_pending = false;
        self.editing() && self.commit_live()
    }

    /// Commits pending wheel zoom. Returns `true` if an entry was committed.
    pub fn settle_gesture(&mut self) -> bool {
        if !self.wheel_pending {
            return false;
        }
        self.commit_gesture()
    }

    fn flush_wheel(&mut self) {
        if self.wheel_pending {
            self.commit_gesture();
        }
    }

    fn live_snapshot(&self) -> Option<Snapshot> {
        Some(Snapshot {
            base_image: self.base.clone()?,
            transform: self.transform,
            filters: self.filters,
        })
    }

    fn commit_live(&mut self) -> bool {
        let Some(snapshot) = self.live_snapshot() else {
            return false;
        };
        let Some(history) = self.history.as_mut() else {
            return false;
        };
        if history.current().same_state_as(&snapshot) {
            return false;
        }
        history.push(snapshot);
        true
    }

    // -------------------------------------------------------------------------
    // History
    // -------------------------------------------------------------------------

    /// Restores the previous snapshot.
    pub fn undo(&mut self) -> Option<PreviewJob> {
        if !self.editing() {
            return None;
        }
        self.flush_wheel();
        let snapshot = self.history.as_mut()?.undo()?.clone();
        Some(self.restore(snapshot))
    }

    /// Restores the next snapshot.
    pub fn redo(&mut self) -> Option<PreviewJob> {
        if !self.editing() {
            return None;
        }
        self.flush_wheel();
        let snapshot = self.history.as_mut()?.redo()?.clone();
        Some(self.restore(snapshot))
    }

    fn restore(&mut self, snapshot: Snapshot) -> PreviewJob {
        self.transform = snapshot.transform;
        self.filters = snapshot.filters;
        if self.base.as_ref() != Some(&snapshot.base_image) {
            // The old preview belongs to another base image
            self.preview = None;
        }
        self.base = Some(snapshot.base_image.clone());
        self.preview_job(snapshot.base_image)
    }

    // -------------------------------------------------------------------------
    // Preview
    // -------------------------------------------------------------------------

    fn preview_job(&mut self, base: EncodedImage) -> PreviewJob {
        PreviewJob {
            sequence: self.preview_seq.issue(),
            base,
            filters: self.filters,
        }
    }

    /// Stores a rendered preview. Returns `false` if it was superseded.
    pub fn complete_preview(&mut self, sequence: Sequence, image: EncodedImage) -> bool {
        if !self.preview_seq.is_latest(sequence) {
            return false;
        }
        self.preview_seq.settle(sequence);
        self.preview = Some(image);
        true
    }

    // -------------------------------------------------------------------------
    // AI edits
    // -------------------------------------------------------------------------

    /// Starts an AI edit. Returns `None` outside the edit step or while
    /// another edit is processing.
    pub fn request_edit(&mut self, request: EditRequest) -> Option<AiJob> {
        if self.step != WizardStep::Edit || self.status.status.is_busy() {
            return None;
        }
        self.flush_wheel();
        let base = self.base.clone()?;
        self.status = StatusLine::new(ProcessingStatus::Processing, request.status_message());
        self.last_edit = Some(request.clone());
        Some(AiJob {
            sequence: self.ai_seq.issue(),
            base,
            instruction: request.instruction(),
            request,
        })
    }

    /// Re-sends the last edit request.
    pub fn retry_edit(&mut self) -> Option<AiJob> {
        let request = self.last_edit.clone()?;
        self.request_edit(request)
    }

    /// Applies or rejects an AI result.
    pub fn complete_edit(
        &mut self,
        sequence: Sequence,
        result: Result<EncodedImage, AiEditError>,
    ) -> AiOutcome {
        if self.step != WizardStep::Edit || !self.ai_seq.is_latest(sequence) {
            return AiOutcome::Stale;
        }
        self.ai_seq.settle(sequence);
        match result {
            Ok(image) => {
                self.base = Some(image.clone());
                self.transform = Transform::identity();
                self.filters = FilterSettings::neutral();
                self.wheel_pending = false;
                self.commit_live();
                self.status = StatusLine::new(ProcessingStatus::Success, StatusMessage::Done);
                AiOutcome::Applied(self.preview_job(image))
            }
            Err(err) => {
                self.status = StatusLine::new(ProcessingStatus::Error, StatusMessage::AiFailed);
                AiOutcome::Failed(err)
            }
        }
    }

    /// Clears a success or error status.
    pub fn dismiss_status(&mut self) {
        if !self.status.status.is_busy() {
            self.status = StatusLine::idle();
        }
    }

    fn abandon_edit(&mut self) {
        self.ai_seq.invalidate();
        if self.status.status.is_busy() {
            self.status = StatusLine::idle();
        }
    }

    // -------------------------------------------------------------------------
    // Print options
    // -------------------------------------------------------------------------

    /// Selects a passport standard. On the print step the sheet is rebuilt.
    pub fn set_standard(&mut self, standard: &'static PassportStandard) -> Option<SheetJob> {
        self.standard = standard;
        self.refresh_sheet()
    }

    /// Selects a layout. On the print step the sheet is rebuilt.
    pub fn set_layout(&mut self, layout: PrintLayout) -> Option<SheetJob> {
        self.layout = layout;
        self.refresh_sheet()
    }

    pub fn set_format(&mut self, format: ExportFormat) {
        self.format = format;
    }

    fn refresh_sheet(&mut self) -> Option<SheetJob> {
        self.sheet = None;
        self.sheet_error = None;
        if self.step == WizardStep::Print {
            self.sheet_job()
        } else {
            self.sheet_seq.invalidate();
            None
        }
    }

    fn sheet_job(&mut self) -> Option<SheetJob> {
        Some(SheetJob {
            base: self.base.clone()?,
            sequence: self.sheet_seq.issue(),
            transform: self.transform,
            filters: self.filters,
            standard: self.standard,
            layout: self.layout,
        })
    }

    /// Stores a finished sheet or its error.
    pub fn complete_sheet(
        &mut self,
        sequence: Sequence,
        result: Result<Sheet, LayoutError>,
    ) -> SheetOutcome {
        if self.step != WizardStep::Print || !self.sheet_seq.is_latest(sequence) {
            return SheetOutcome::Stale;
        }
        self.sheet_seq.settle(sequence);
        match result {
            Ok(sheet) => {
                self.sheet = Some(sheet);
                self.sheet_error = None;
                SheetOutcome::Ready
            }
            Err(err) => {
                self.sheet = None;
                self.sheet_error = Some(err.clone());
                SheetOutcome::Failed(err)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    /// Moves from edit to print and asks for the sheet.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTransition`] outside the edit step.
    pub fn next(&mut self) -> Result<Option<SheetJob>, InvalidTransition> {
        let next = transition(self.step, WizardAction::Next)?;
        self.flush_wheel();
        self.abandon_edit();
        self.step = next;
        Ok(self.refresh_sheet())
    }

    /// Steps back one screen. The image is kept.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTransition`] on the upload step.
    pub fn back(&mut self) -> Result<WizardStep, InvalidTransition> {
        let previous = transition(self.step, WizardAction::Back)?;
        self.flush_wheel();
        self.abandon_edit();
        self.sheet_seq.invalidate();
        self.sheet = None;
        self.sheet_error = None;
        self.step = previous;
        Ok(previous)
    }

    /// Discards the photo and all edits. Callers confirm with the user first.
    ///
    /// Print preferences survive; every in-flight request becomes stale.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTransition`] outside the print step.
    pub fn reset(&mut self) -> Result<(), InvalidTransition> {
        let step = transition(self.step, WizardAction::Reset)?;
        let mut fresh = Session::new(self.standard, self.layout, self.format);
        fresh.step = step;
        fresh.preview_seq = std::mem::take(&mut self.preview_seq);
        fresh.ai_seq = std::mem::take(&mut self.ai_seq);
        fresh.sheet_seq = std::mem::take(&mut self.sheet_seq);
        fresh.preview_seq.invalidate();
        fresh.ai_seq.invalidate();
        fresh.sheet_seq.invalidate();
        *self = fresh;
        Ok(())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(
            crate::domain::print::default_standard(),
            PrintLayout::default(),
            ExportFormat::default(),
        )
    }
}
