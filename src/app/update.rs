// SPDX-License-Identifier: MPL-2.0
//! Update logic and message handlers for the application.

use std::path::PathBuf;

use super::{App, Effect, Message, Severity};
use crate::application::session::{AiOutcome, PreviewJob, SheetJob, SheetOutcome};
use crate::diagnostics::{
    AppOperation, AppStateEvent, ErrorEvent, ErrorType, UserAction, WarningEvent, WarningType,
};
use crate::domain::editing::TurnDirection;
use crate::domain::wizard::{InvalidTransition, WizardStep};
use crate::media::{export_filename, print_document};

impl App {
    /// Applies one message and returns the async work it requires.
    pub fn update(&mut self, message: Message) -> Vec<Effect> {
        match message {
            Message::OpenPhoto(path) => self.handle_open_photo(path),
            Message::PhotoLoaded(result) => match result {
                Ok(image) => {
                    let (format, width, height) =
                        (image.format().mime_type(), image.width(), image.height());
                    match self.session.load_image(image) {
                        Ok(job) => {
                            self.diag.log_state(AppStateEvent::PhotoLoaded {
                                format: format.to_string(),
                                width,
                                height,
                            });
                            self.log_step();
                            self.preview_effects(job)
                        }
                        Err(err) => self.invalid_transition(&err),
                    }
                }
                Err(err) => {
                    self.diag.log_warning(WarningEvent::new(
                        WarningType::InvalidUpload,
                        err.to_string(),
                    ));
                    let args = err.i18n_args();
                    let args: Vec<(&str, &str)> =
                        args.iter().map(|(name, value)| (*name, value.as_str())).collect();
                    self.notify_with_args(Severity::Error, err.i18n_key(), &args);
                    Vec::new()
                }
            },

            Message::Drag { dx, dy } => {
                self.session.drag_by(dx, dy);
                Vec::new()
            }
            Message::ZoomChanged(scale) => {
                self.session.set_zoom(scale);
                Vec::new()
            }
            Message::RotationChanged(degrees) => {
                self.session.set_rotation(degrees);
                Vec::new()
            }
            Message::RotateQuarter(direction) => {
                if self.session.rotate_quarter(direction) {
                    self.diag.log_action(UserAction::RotateQuarter {
                        clockwise: direction == TurnDirection::Clockwise,
                    });
                }
                Vec::new()
            }
            Message::Wheel(delta_y) => {
                self.session.wheel_zoom(delta_y);
                Vec::new()
            }
            Message::GestureReleased => {
                if self.session.commit_gesture() {
                    self.diag.log_action(UserAction::CommitGesture);
                }
                Vec::new()
            }
            Message::GestureSettled => {
                if self.session.settle_gesture() {
                    self.diag.log_action(UserAction::CommitGesture);
                }
                Vec::new()
            }
            Message::FilterChanged(kind, value) => {
                self.diag.log_action(UserAction::AdjustFilter {
                    filter: kind.id().to_string(),
                });
                self.session
                    .set_filter(kind, value)
                    .map_or_else(Vec::new, |job| self.preview_effects(job))
            }
            Message::Undo => {
                self.diag.log_action(UserAction::Undo);
                self.session
                    .undo()
                    .map_or_else(Vec::new, |job| self.preview_effects(job))
            }
            Message::Redo => {
                self.diag.log_action(UserAction::Redo);
                self.session
                    .redo()
                    .map_or_else(Vec::new, |job| self.preview_effects(job))
            }
            Message::PreviewRendered {
                job,
                outcome,
                duration_ms,
            } => {
                match outcome.fallback_reason {
                    Some(reason) => self
                        .diag
                        .log_warning(WarningEvent::new(WarningType::RenderFallback, reason)),
                    None => {
                        self.preview_cache
                            .insert(&job.base, &job.filters, outcome.image.clone());
                    }
                }
                self.diag.log_operation(AppOperation::RenderPreview {
                    duration_ms,
                    cache_hit: false,
                });
                self.session.complete_preview(job.sequence, outcome.image);
                Vec::new()
            }

            Message::RequestEdit(request) => {
                let kind = request.kind();
                match self.session.request_edit(request) {
                    Some(job) => {
                        self.diag.log_action(UserAction::RequestAiEdit {
                            kind: kind.to_string(),
                        });
                        vec![Effect::RequestEdit(job)]
                    }
                    None => Vec::new(),
                }
            }
            Message::RetryEdit => match self.session.retry_edit() {
                Some(job) => {
                    self.diag.log_action(UserAction::RetryAiEdit);
                    vec![Effect::RequestEdit(job)]
                }
                None => Vec::new(),
            },
            Message::EditCompleted {
                sequence,
                kind,
                result,
                duration_ms,
            } => {
                self.diag.log_operation(AppOperation::AiEdit {
                    kind: kind.to_string(),
                    duration_ms,
                    success: result.is_ok(),
                });
                match self.session.complete_edit(sequence, result) {
                    AiOutcome::Applied(job) => self.preview_effects(job),
                    AiOutcome::Failed(err) => {
                        self.diag
                            .log_error(ErrorEvent::new(ErrorType::AIServiceError, err.to_string()));
                        Vec::new()
                    }
                    AiOutcome::Stale => Vec::new(),
                }
            }
            Message::DismissStatus => {
                self.session.dismiss_status();
                Vec::new()
            }

            Message::Next => match self.session.next() {
                Ok(job) => {
                    self.diag.log_action(UserAction::NextStep);
                    self.log_step();
                    sheet_effects(job)
                }
                Err(err) => self.invalid_transition(&err),
            },
            Message::Back => match self.session.back() {
                Ok(_) => {
                    self.diag.log_action(UserAction::PreviousStep);
                    self.log_step();
                    Vec::new()
                }
                Err(err) => self.invalid_transition(&err),
            },
            Message::ResetRequested => {
                if self.session.step() == WizardStep::Print {
                    self.confirm_reset = true;
                } else {
                    self.notify(Severity::Error, "error-invalid-step");
                }
                Vec::new()
            }
            Message::ResetConfirmed => {
                if std::mem::take(&mut self.confirm_reset) {
                    match self.session.reset() {
                        Ok(()) => {
                            self.preview_cache.clear();
                            self.diag.log_action(UserAction::ResetSession);
                            self.log_step();
                        }
                        Err(err) => return self.invalid_transition(&err),
                    }
                }
                Vec::new()
            }
            Message::ResetCancelled => {
                self.confirm_reset = false;
                Vec::new()
            }

            Message::SelectStandard(standard) => {
                self.diag.log_action(UserAction::SelectStandard {
                    code: standard.country_code.to_string(),
                });
                sheet_effects(self.session.set_standard(standard))
            }
            Message::SelectLayout(layout) => {
                self.diag.log_action(UserAction::SelectLayout {
                    layout: layout.id().to_string(),
                });
                sheet_effects(self.session.set_layout(layout))
            }
            Message::SelectFormat(format) => {
                self.session.set_format(format);
                Vec::new()
            }
            Message::SheetBuilt {
                sequence,
                result,
                duration_ms,
            } => {
                let copies = result.as_ref().map_or(0, |sheet| sheet.copies);
                match self.session.complete_sheet(sequence, result) {
                    SheetOutcome::Ready => {
                        self.diag
                            .log_operation(AppOperation::BuildSheet { duration_ms, copies });
                    }
                    SheetOutcome::Failed(err) => {
                        self.diag
                            .log_error(ErrorEvent::new(ErrorType::LayoutError, err.to_string()));
                        self.notify(Severity::Error, err.i18n_key());
                    }
                    SheetOutcome::Stale => {}
                }
                Vec::new()
            }
            Message::Export(path) => self.handle_export(path),
            Message::ExportCompleted {
                format,
                path,
                result,
                duration_ms,
            } => {
                match result {
                    Ok(size_bytes) => {
                        self.diag.log_operation(AppOperation::Export {
                            format: format.extension().to_string(),
                            duration_ms,
                            size_bytes,
                        });
                        let shown = path.display().to_string();
                        self.notify_with_args(Severity::Info, "cli-saved", &[("path", &shown)]);
                    }
                    Err(err) => {
                        self.diag
                            .log_error(ErrorEvent::new(ErrorType::ExportError, err.to_string()));
                        self.notify(Severity::Error, err.i18n_key());
                    }
                }
                Vec::new()
            }
            Message::Print(path) => {
                let Some(sheet) = self.session.sheet() else {
                    self.notify(Severity::Error, "error-export-nothing");
                    return Vec::new();
                };
                let html = print_document(sheet);
                self.diag.log_action(UserAction::OpenPrintDocument);
                vec![Effect::WritePrintDocument { html, path }]
            }
            Message::PrintDocumentWritten { path, result } => {
                match result {
                    Ok(()) => {
                        let shown = path.display().to_string();
                        self.notify_with_args(
                            Severity::Info,
                            "cli-print-doc-saved",
                            &[("path", &shown)],
                        );
                    }
                    Err(reason) => {
                        self.diag
                            .log_error(ErrorEvent::new(ErrorType::IoError, reason));
                        self.notify(Severity::Error, "error-io");
                    }
                }
                Vec::new()
            }
        }
    }

    fn handle_open_photo(&mut self, path: PathBuf) -> Vec<Effect> {
        if self.session.step() != WizardStep::Upload {
            self.notify(Severity::Error, "error-invalid-step");
            return Vec::new();
        }
        self.diag.log_action(UserAction::LoadPhoto {
            source: Some("file".to_string()),
        });
        vec![Effect::LoadPhoto {
            path,
            max_bytes: self.config.editor.max_upload_bytes(),
        }]
    }

    fn handle_export(&mut self, path: Option<PathBuf>) -> Vec<Effect> {
        let Some(sheet) = self.session.sheet().cloned() else {
            self.notify(Severity::Error, "error-export-nothing");
            return Vec::new();
        };
        let format = self.session.format();
        let path = path.unwrap_or_else(|| {
            PathBuf::from(export_filename(self.session.standard(), sheet.layout, format))
        });
        self.diag.log_action(UserAction::ExportSheet {
            format: format.extension().to_string(),
        });
        vec![Effect::WriteExport {
            sheet,
            format,
            path,
        }]
    }

    /// Serves a preview from the cache or asks the runtime to render it.
    fn preview_effects(&mut self, job: PreviewJob) -> Vec<Effect> {
        if let Some(image) = self.preview_cache.get(&job.base, &job.filters) {
            self.diag.log_operation(AppOperation::RenderPreview {
                duration_ms: 0,
                cache_hit: true,
            });
            self.session.complete_preview(job.sequence, image);
            return Vec::new();
        }
        vec![Effect::RenderPreview(job)]
    }

    fn invalid_transition(&mut self, err: &InvalidTransition) -> Vec<Effect> {
        self.diag
            .log_warning(WarningEvent::new(WarningType::Other, err.to_string()));
        self.notify(Severity::Error, "error-invalid-step");
        Vec::new()
    }

    fn log_step(&self) {
        self.diag.log_state(AppStateEvent::StepChanged {
            step: self.session.step().id().to_string(),
        });
    }
}

fn sheet_effects(job: Option<SheetJob>) -> Vec<Effect> {
    job.map(Effect::BuildSheet).into_iter().collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::app::{Message, Notification};
    use crate::application::port::{AiEditError, EditRequest, ImageEditService};
    use crate::config::Config;
    use crate::domain::editing::FilterKind;
    use crate::domain::media::EncodedImage;
    use crate::domain::presets::{find_background, BackgroundChoice};
    use crate::domain::print::{find_standard, PrintLayout};
    use crate::domain::status::ProcessingStatus;
    use crate::i18n::I18n;
    use crate::media::{apply_filters, LayoutError};
    use crate::test_utils::sample_jpeg;
    use futures_util::future::BoxFuture;

    struct NeverCalled;

    impl ImageEditService for NeverCalled {
        fn request_edit(
            &self,
            _image: &EncodedImage,
            _instruction: &str,
        ) -> BoxFuture<'static, Result<EncodedImage, AiEditError>> {
            Box::pin(async { Err(AiEditError::Timeout) })
        }

        fn name(&self) -> &'static str {
            "never"
        }
    }

    fn app() -> App {
        App::new(
            Config::default(),
            I18n::new(Some("en-US".into()), &Config::default()),
            Arc::new(NeverCalled),
            None,
        )
    }

    fn loaded_app() -> App {
        let mut app = app();
        let effects = app.update(Message::PhotoLoaded(Ok(sample_jpeg(40, 50))));
        assert!(matches!(effects.as_slice(), [Effect::RenderPreview(_)]));
        app
    }

    fn light_blue() -> EditRequest {
        let preset = find_background("Light Blue").expect("preset exists");
        EditRequest::Background(BackgroundChoice::Preset(preset))
    }

    #[test]
    fn open_photo_requests_load_with_configured_limit() {
        let mut app = app();
        let effects = app.update(Message::OpenPhoto(PathBuf::from("me.jpg")));
        match effects.as_slice() {
            [Effect::LoadPhoto { path, max_bytes }] => {
                assert_eq!(path, &PathBuf::from("me.jpg"));
                assert_eq!(*max_bytes, app.config().editor.max_upload_bytes());
            }
            other => panic!("unexpected effects: {other:?}"),
        }
    }

    #[test]
    fn rejected_upload_notifies_and_keeps_upload_step() {
        let mut app = app();
        let effects = app.update(Message::PhotoLoaded(Err(
            crate::media::UploadError::NotAnImage,
        )));
        assert!(effects.is_empty());
        assert_eq!(app.session().step(), WizardStep::Upload);
        assert_eq!(
            app.take_notifications(),
            vec![Notification {
                severity: Severity::Error,
                message: "Please upload an image file (JPG, PNG, HEIC)".to_string(),
            }]
        );
    }

    #[test]
    fn oversize_upload_names_the_configured_limit() {
        let mut app = app();
        app.update(Message::PhotoLoaded(Err(crate::media::UploadError::TooLarge {
            size_bytes: 5 * 1024 * 1024,
            max_bytes: 2 * 1024 * 1024,
        })));
        let notes = app.take_notifications();
        assert_eq!(notes.len(), 1);
        assert_eq!(
            notes[0].message,
            "This photo is larger than 2 MB. Please choose a smaller file."
        );
    }

    #[test]
    fn quarter_turn_commits_and_undo_restores() {
        let mut app = loaded_app();
        app.update(Message::RotateQuarter(TurnDirection::Clockwise));
        assert_eq!(app.session().transform().rotation.value(), 90);
        assert!(app.session().can_undo());

        app.update(Message::Undo);
        assert_eq!(app.session().transform().rotation.value(), 0);
    }

    #[test]
    fn rendered_preview_is_cached_for_undo() {
        let mut app = loaded_app();
        let effects = app.update(Message::FilterChanged(FilterKind::Brightness, 20));
        let Some(Effect::RenderPreview(job)) = effects.into_iter().next() else {
            panic!("expected a render");
        };
        let outcome = apply_filters(&job.base, &job.filters);
        app.update(Message::PreviewRendered {
            job: job.clone(),
            outcome,
            duration_ms: 3,
        });
        app.update(Message::GestureReleased);
        assert_eq!(app.preview_cache().len(), 1);

        app.update(Message::Undo);
        let effects = app.update(Message::Redo);
        assert!(effects.is_empty(), "redo preview should come from the cache");
        assert_eq!(app.preview_cache().stats().0, 1);
    }

    #[test]
    fn edit_request_sets_localized_status() {
        let mut app = loaded_app();
        let effects = app.update(Message::RequestEdit(light_blue()));
        assert!(matches!(effects.as_slice(), [Effect::RequestEdit(_)]));
        assert_eq!(
            app.status_text().as_deref(),
            Some("Applying Light Blue background...")
        );
        // A second request while processing is ignored
        assert!(app.update(Message::RequestEdit(light_blue())).is_empty());
    }

    #[test]
    fn failed_edit_reports_status_and_allows_retry() {
        let mut app = loaded_app();
        let Some(Effect::RequestEdit(job)) =
            app.update(Message::RequestEdit(light_blue())).into_iter().next()
        else {
            panic!("expected an AI request");
        };
        app.update(Message::EditCompleted {
            sequence: job.sequence,
            kind: "background",
            result: Err(AiEditError::Timeout),
            duration_ms: 10,
        });
        assert_eq!(app.session().status().status, ProcessingStatus::Error);
        assert_eq!(
            app.status_text().as_deref(),
            Some("AI Processing Failed. Please try again.")
        );
        assert!(matches!(
            app.update(Message::RetryEdit).as_slice(),
            [Effect::RequestEdit(_)]
        ));
    }

    #[test]
    fn next_builds_sheet_and_standard_change_rebuilds() {
        let mut app = loaded_app();
        assert!(matches!(
            app.update(Message::Next).as_slice(),
            [Effect::BuildSheet(_)]
        ));
        let india = find_standard("IN").expect("standard exists");
        match app.update(Message::SelectStandard(india)).as_slice() {
            [Effect::BuildSheet(job)] => assert_eq!(job.standard.country_code, "IN"),
            other => panic!("unexpected effects: {other:?}"),
        }
    }

    #[test]
    fn sheet_failure_is_visible() {
        let mut app = loaded_app();
        let Some(Effect::BuildSheet(job)) = app.update(Message::Next).into_iter().next() else {
            panic!("expected a sheet build");
        };
        app.update(Message::SheetBuilt {
            sequence: job.sequence,
            result: Err(LayoutError::PhotoTooLarge {
                width_mm: 300.0,
                height_mm: 45.0,
            }),
            duration_ms: 1,
        });
        assert!(app.session().sheet_error().is_some());
        let notes = app.take_notifications();
        assert_eq!(
            notes[0].message,
            "The photo is too large to fit on the sheet."
        );
    }

    #[test]
    fn export_without_sheet_is_rejected() {
        let mut app = loaded_app();
        assert!(app.update(Message::Export(None)).is_empty());
        assert_eq!(
            app.take_notifications()[0].message,
            "There is no print sheet to save yet."
        );
    }

    #[test]
    fn reset_needs_confirmation() {
        let mut app = loaded_app();
        app.update(Message::Next);
        app.update(Message::SelectLayout(PrintLayout::Single));

        app.update(Message::ResetRequested);
        assert_eq!(
            app.confirmation_prompt().as_deref(),
            Some("Are you sure you want to start over? Your changes will be lost.")
        );
        app.update(Message::ResetCancelled);
        assert_eq!(app.session().step(), WizardStep::Print);

        app.update(Message::ResetRequested);
        app.update(Message::ResetConfirmed);
        assert_eq!(app.session().step(), WizardStep::Upload);
        assert_eq!(app.session().layout(), PrintLayout::Single);
        assert!(app.confirmation_prompt().is_none());
    }

    #[test]
    fn reset_outside_print_is_refused() {
        let mut app = loaded_app();
        app.update(Message::ResetRequested);
        assert!(app.confirmation_prompt().is_none());
        assert_eq!(
            app.take_notifications()[0].message,
            "This action is not available on the current step."
        );
    }

    #[test]
    fn actions_reach_diagnostics() {
        let mut app = loaded_app();
        app.update(Message::Undo);
        app.update(Message::Next);
        let json = app.diagnostics().export_json().expect("export");
        assert!(json.contains("photo_loaded"));
        assert!(json.contains("next_step"));
        assert!(json.contains("step_changed"));
    }

    #[test]
    fn config_warning_becomes_notification() {
        let mut app = App::new(
            Config::default(),
            I18n::new(Some("en-US".into()), &Config::default()),
            Arc::new(NeverCalled),
            Some("notification-config-load-error".into()),
        );
        let notes = app.take_notifications();
        assert_eq!(notes[0].severity, Severity::Warning);
        assert!(notes[0].message.starts_with("Settings could not be loaded"));
    }
}
