// SPDX-License-Identifier: MPL-2.0
//! Executes [`Effect`]s and feeds their results back into [`App::update`].
//!
//! CPU-bound work (decode, filters, composition, encoding) runs on tokio's
//! blocking pool. AI edits run as plain futures on the async runtime. Effects
//! are polled concurrently, and results arrive in completion order; stale ones
//! are dropped by the session through their sequence numbers.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use futures_util::future::BoxFuture;
use futures_util::stream::{FuturesUnordered, StreamExt};

use super::{App, Effect, Message};
use crate::application::port::ImageEditService;
use crate::application::session::SheetJob;
use crate::media::{
    apply_filters, build_sheet, compose_photo, load_upload, write_export, ExportError,
    FilterOutcome, LayoutError, Sheet, SheetSpec, UploadError,
};

/// Everything an effect needs besides its own payload.
#[derive(Clone)]
pub struct EffectContext {
    pub editor: Arc<dyn ImageEditService>,
    pub frame_width_px: f32,
    pub sheet_spec: SheetSpec,
}

impl EffectContext {
    #[must_use]
    pub fn from_app(app: &App) -> Self {
        Self {
            editor: app.editor(),
            frame_width_px: app.config().editor.preview_frame_width_px(),
            sheet_spec: app.config().print.sheet_spec(),
        }
    }
}

/// Runs one effect to completion.
pub fn execute(effect: Effect, ctx: EffectContext) -> BoxFuture<'static, Message> {
    Box::pin(async move {
        let started = Instant::now();
        match effect {
            Effect::LoadPhoto { path, max_bytes } => {
                let result =
                    tokio::task::spawn_blocking(move || load_upload(&path, max_bytes))
                        .await
                        .unwrap_or_else(|err| Err(UploadError::Unreadable(err.to_string())));
                Message::PhotoLoaded(result)
            }
            Effect::RenderPreview(job) => {
                let (base, filters) = (job.base.clone(), job.filters);
                let outcome = tokio::task::spawn_blocking(move || apply_filters(&base, &filters))
                    .await
                    .unwrap_or_else(|err| FilterOutcome {
                        image: job.base.clone(),
                        fallback_reason: Some(err.to_string()),
                    });
                Message::PreviewRendered {
                    job,
                    outcome,
                    duration_ms: elapsed_ms(started),
                }
            }
            Effect::RequestEdit(job) => {
                let result = ctx
                    .editor
                    .request_edit(&job.base, &job.instruction)
                    .await;
                Message::EditCompleted {
                    sequence: job.sequence,
                    kind: job.request.kind(),
                    result,
                    duration_ms: elapsed_ms(started),
                }
            }
            Effect::BuildSheet(job) => {
                let sequence = job.sequence;
                let (frame_width_px, spec) = (ctx.frame_width_px, ctx.sheet_spec);
                let result = tokio::task::spawn_blocking(move || {
                    render_sheet_job(&job, frame_width_px, &spec)
                })
                .await
                .unwrap_or_else(|err| Err(LayoutError::Render(err.to_string())));
                Message::SheetBuilt {
                    sequence,
                    result,
                    duration_ms: elapsed_ms(started),
                }
            }
            Effect::WriteExport {
                sheet,
                format,
                path,
            } => {
                let target = path.clone();
                let result = tokio::task::spawn_blocking(move || {
                    write_export(&sheet, format, &target)?;
                    file_size(&target)
                })
                .await
                .unwrap_or_else(|err| Err(ExportError::Io(err.to_string())));
                Message::ExportCompleted {
                    format,
                    path,
                    result,
                    duration_ms: elapsed_ms(started),
                }
            }
            Effect::WritePrintDocument { html, path } => {
                let target = path.clone();
                let result =
                    tokio::task::spawn_blocking(move || std::fs::write(&target, html))
                        .await
                        .map_err(|err| err.to_string())
                        .and_then(|written| written.map_err(|err| err.to_string()));
                Message::PrintDocumentWritten { path, result }
            }
        }
    })
}

/// Bakes filters and framing into the photo and tiles it onto the page.
///
/// # Errors
///
/// See [`compose_photo`] and [`build_sheet`].
pub fn render_sheet_job(
    job: &SheetJob,
    frame_width_px: f32,
    spec: &SheetSpec,
) -> Result<Sheet, LayoutError> {
    let filtered = if job.filters.is_neutral() {
        job.base.clone()
    } else {
        apply_filters(&job.base, &job.filters).image
    };
    let photo = compose_photo(
        &filtered,
        &job.transform,
        job.standard,
        frame_width_px,
        spec.dpi,
    )?;
    build_sheet(&photo, job.standard, job.layout, spec)
}

/// Runs `effects` and every effect they cause until nothing is pending.
pub async fn drive(app: &mut App, effects: Vec<Effect>) {
    let ctx = EffectContext::from_app(app);
    let mut pending: FuturesUnordered<_> = effects
        .into_iter()
        .map(|effect| execute(effect, ctx.clone()))
        .collect();

    while let Some(message) = pending.next().await {
        for effect in app.update(message) {
            pending.push(execute(effect, ctx.clone()));
        }
    }
}

/// Applies `message` and drives the resulting work to completion.
pub async fn dispatch(app: &mut App, message: Message) {
    let effects = app.update(message);
    drive(app, effects).await;
}

fn file_size(path: &Path) -> Result<u64, ExportError> {
    std::fs::metadata(path)
        .map(|meta| meta.len())
        .map_err(|err| ExportError::Io(err.to_string()))
}

#[allow(clippy::cast_possible_truncation)] // Duration in ms fits comfortably in u64
fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::port::{AiEditError, EditRequest};
    use crate::config::Config;
    use crate::domain::media::EncodedImage;
    use crate::domain::presets::find_outfit;
    use crate::domain::print::PrintLayout;
    use crate::domain::status::ProcessingStatus;
    use crate::domain::wizard::WizardStep;
    use crate::i18n::I18n;
    use crate::media::ExportFormat;
    use crate::test_utils::{sample_jpeg, sample_png};

    /// Resolves every request to the same result.
    struct FixedEditor {
        result: Result<EncodedImage, AiEditError>,
    }

    impl ImageEditService for FixedEditor {
        fn request_edit(
            &self,
            _image: &EncodedImage,
            _instruction: &str,
        ) -> BoxFuture<'static, Result<EncodedImage, AiEditError>> {
            let result = self.result.clone();
            Box::pin(async move { result })
        }

        fn name(&self) -> &'static str {
            "fixed"
        }
    }

    fn small_sheet_config() -> Config {
        let mut config = Config::default();
        config.print.dpi = Some(72.0);
        config.editor.preview_frame_width_px = Some(64.0);
        config
    }

    fn app_with(result: Result<EncodedImage, AiEditError>) -> App {
        let config = small_sheet_config();
        let i18n = I18n::new(Some("en-US".into()), &config);
        App::new(config, i18n, Arc::new(FixedEditor { result }), None)
    }

    fn write_photo(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("portrait.jpg");
        std::fs::write(&path, sample_jpeg(60, 80).bytes()).expect("write photo");
        path
    }

    #[tokio::test]
    async fn open_photo_enters_edit_with_preview() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut app = app_with(Err(AiEditError::Timeout));

        dispatch(&mut app, Message::OpenPhoto(write_photo(dir.path()))).await;

        assert_eq!(app.session().step(), WizardStep::Edit);
        let preview = app.session().preview().expect("preview rendered");
        assert_eq!((preview.width(), preview.height()), (60, 80));
    }

    #[tokio::test]
    async fn missing_file_stays_on_upload() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut app = app_with(Err(AiEditError::Timeout));

        dispatch(&mut app, Message::OpenPhoto(dir.path().join("nope.jpg"))).await;

        assert_eq!(app.session().step(), WizardStep::Upload);
        assert_eq!(
            app.take_notifications()[0].message,
            "Failed to read image file."
        );
    }

    #[tokio::test]
    async fn successful_outfit_edit_replaces_base() {
        let dir = tempfile::tempdir().expect("temp dir");
        let edited = sample_png(30, 40);
        let mut app = app_with(Ok(edited.clone()));
        dispatch(&mut app, Message::OpenPhoto(write_photo(dir.path()))).await;

        let outfit = find_outfit("m_suit_navy").expect("outfit exists");
        dispatch(&mut app, Message::RequestEdit(EditRequest::Outfit(outfit))).await;

        assert_eq!(app.session().base(), Some(&edited));
        assert_eq!(app.session().status().status, ProcessingStatus::Success);
        assert_eq!(app.status_text().as_deref(), Some("Done!"));
        assert!(app.session().can_undo());
    }

    #[tokio::test]
    async fn failed_edit_keeps_photo() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut app = app_with(Err(AiEditError::Service {
            status: 500,
            message: "boom".into(),
        }));
        dispatch(&mut app, Message::OpenPhoto(write_photo(dir.path()))).await;
        let before = app.session().base().cloned();

        let outfit = find_outfit("w_blazer_navy").expect("outfit exists");
        dispatch(&mut app, Message::RequestEdit(EditRequest::Outfit(outfit))).await;

        assert_eq!(app.session().base().cloned(), before);
        assert_eq!(app.session().status().status, ProcessingStatus::Error);
        assert!(!app.session().can_undo());
    }

    #[tokio::test]
    async fn print_step_builds_sheet_and_exports() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut app = app_with(Err(AiEditError::Timeout));
        dispatch(&mut app, Message::OpenPhoto(write_photo(dir.path()))).await;
        dispatch(&mut app, Message::FilterChanged(crate::domain::editing::FilterKind::Warmth, 30))
            .await;
        dispatch(&mut app, Message::GestureReleased).await;
        dispatch(&mut app, Message::Next).await;

        let sheet = app.session().sheet().expect("sheet built");
        assert_eq!(sheet.layout, PrintLayout::A4Sheet);
        assert!(sheet.copies >= 1);

        dispatch(&mut app, Message::SelectFormat(ExportFormat::Pdf)).await;
        let out = dir.path().join("sheet.pdf");
        dispatch(&mut app, Message::Export(Some(out.clone()))).await;
        let pdf = std::fs::read(&out).expect("pdf written");
        assert!(pdf.starts_with(b"%PDF"));

        let html = dir.path().join("print.html");
        dispatch(&mut app, Message::Print(html.clone())).await;
        let document = std::fs::read_to_string(&html).expect("html written");
        assert!(document.contains("<title>Print Passport Photo</title>"));
    }

    #[tokio::test]
    async fn single_layout_sheet_has_one_copy() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut app = app_with(Err(AiEditError::Timeout));
        dispatch(&mut app, Message::OpenPhoto(write_photo(dir.path()))).await;
        dispatch(&mut app, Message::Next).await;
        dispatch(&mut app, Message::SelectLayout(PrintLayout::Single)).await;

        let sheet = app.session().sheet().expect("sheet built");
        assert_eq!(sheet.copies, 1);
    }
}
