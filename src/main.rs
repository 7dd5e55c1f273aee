// SPDX-License-Identifier: MPL-2.0
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use passpix::app::{self, paths, runtime, App, Message, Severity};
use passpix::application::port::EditRequest;
use passpix::diagnostics;
use passpix::domain::editing::FilterKind;
use passpix::domain::presets::{
    find_outfit, outfits, BackgroundChoice, OutfitCategory, BACKGROUND_PRESETS,
};
use passpix::domain::print::{find_standard, PrintLayout, PASSPORT_STANDARDS};
use passpix::domain::status::ProcessingStatus;
use passpix::domain::wizard::WizardStep;
use passpix::i18n::I18n;
use passpix::infrastructure::{GeminiImageEditor, GeminiSettings};
use passpix::media::ExportFormat;

const HELP: &str = "\
PassPix: print-ready passport photos

USAGE:
  passpix [OPTIONS] <PHOTO>

PRINT:
  --standard <CODE>       US, IN, UK, EU, JP, CA or AU
  --layout <a4|single>    Tile an A4 sheet or print one photo
  --format <jpg|png|pdf>  Output format
  --output <PATH>         Output file (default: PassPix-<CODE>-<LAYOUT>.<EXT>)
  --print-doc <PATH>      Also write a self-printing HTML document

EDIT:
  --brightness <N>        -50..50
  --contrast <N>          -50..50
  --saturation <N>        -50..50
  --warmth <N>            -50..50
  --zoom <F>              0.5..3.0
  --rotate <DEG>          -180..180, e.g. 90 or -90 for sideways photos
  --offset-x <PX>         Horizontal shift in preview-frame pixels
  --offset-y <PX>         Vertical shift in preview-frame pixels
  --background <NAME|#RRGGBB>  AI background replacement
  --outfit <ID>           AI outfit replacement (see --list-outfits)

GENERAL:
  --lang <LOCALE>         UI language (e.g. en-US, fr)
  --config-dir <PATH>     Directory holding settings.toml
  --diagnostics <PATH>    Write a JSON diagnostics report (file or directory)
  --list-standards        Show passport standards
  --list-backgrounds      Show background presets
  --list-outfits          Show outfit presets
  -h, --help              Show this help
";

/// Parsed command line.
#[derive(Debug, Default)]
struct Args {
    flags: app::Flags,
    photo: Option<PathBuf>,
    standard: Option<String>,
    layout: Option<PrintLayout>,
    format: Option<ExportFormat>,
    output: Option<PathBuf>,
    print_doc: Option<PathBuf>,
    filters: Vec<(FilterKind, i32)>,
    zoom: Option<f32>,
    rotate: Option<i32>,
    offset: (f32, f32),
    background: Option<BackgroundChoice>,
    outfit: Option<String>,
    diagnostics: Option<PathBuf>,
    list_standards: bool,
    list_backgrounds: bool,
    list_outfits: bool,
}

fn parse_args() -> Result<Option<Args>, pico_args::Error> {
    let mut pargs = pico_args::Arguments::from_env();
    if pargs.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let mut filters = Vec::new();
    for (flag, kind) in [
        ("--brightness", FilterKind::Brightness),
        ("--contrast", FilterKind::Contrast),
        ("--saturation", FilterKind::Saturation),
        ("--warmth", FilterKind::Warmth),
    ] {
        if let Some(value) = pargs.opt_value_from_str::<_, i32>(flag)? {
            filters.push((kind, value));
        }
    }

    let args = Args {
        flags: app::Flags {
            lang: pargs.opt_value_from_str("--lang")?,
            config_dir: pargs.opt_value_from_str("--config-dir")?,
        },
        standard: pargs.opt_value_from_str("--standard")?,
        layout: pargs.opt_value_from_str("--layout")?,
        format: pargs.opt_value_from_str("--format")?,
        output: pargs.opt_value_from_str("--output")?,
        print_doc: pargs.opt_value_from_str("--print-doc")?,
        filters,
        zoom: pargs.opt_value_from_str("--zoom")?,
        rotate: pargs.opt_value_from_str("--rotate")?,
        offset: (
            pargs.opt_value_from_str("--offset-x")?.unwrap_or(0.0),
            pargs.opt_value_from_str("--offset-y")?.unwrap_or(0.0),
        ),
        background: pargs.opt_value_from_str("--background")?,
        outfit: pargs.opt_value_from_str("--outfit")?,
        diagnostics: pargs.opt_value_from_str("--diagnostics")?,
        list_standards: pargs.contains("--list-standards"),
        list_backgrounds: pargs.contains("--list-backgrounds"),
        list_outfits: pargs.contains("--list-outfits"),
        photo: pargs.opt_free_from_str()?,
    };

    let rest = pargs.finish();
    if !rest.is_empty() {
        eprintln!("Warning: unused arguments left: {rest:?}");
    }
    Ok(Some(args))
}

fn print_lists(args: &Args, i18n: &I18n) -> bool {
    if args.list_standards {
        println!("{}", i18n.tr("cli-standards-header"));
        for standard in PASSPORT_STANDARDS {
            println!("  {:<4} {}", standard.country_code, standard.label);
        }
    }
    if args.list_backgrounds {
        println!("{}", i18n.tr("cli-backgrounds-header"));
        for preset in BACKGROUND_PRESETS {
            println!("  {:<12} {}", preset.name, preset.hex);
        }
    }
    if args.list_outfits {
        println!("{}", i18n.tr("cli-outfits-header"));
        for category in OutfitCategory::all() {
            for outfit in outfits(*category) {
                println!("  {:<16} {}", outfit.id, outfit.label);
            }
        }
    }
    args.list_standards || args.list_backgrounds || args.list_outfits
}

/// Prints and clears queued notifications. Returns true if any was an error.
fn flush_notifications(app: &mut App) -> bool {
    let mut failed = false;
    for note in app.take_notifications() {
        match note.severity {
            Severity::Info => println!("{}", note.message),
            Severity::Warning => eprintln!("{}", note.message),
            Severity::Error => {
                failed = true;
                eprintln!("{}", note.message);
            }
        }
    }
    failed
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            print!("{HELP}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("Error: {err}\n\n{HELP}");
            return ExitCode::from(2);
        }
    };

    paths::init_cli_overrides(args.flags.config_dir.clone());
    let (config, config_warning) = passpix::config::load();
    let i18n = I18n::new(args.flags.lang.clone(), &config);

    if print_lists(&args, &i18n) {
        return ExitCode::SUCCESS;
    }
    let Some(photo) = args.photo.clone() else {
        eprintln!("{HELP}");
        return ExitCode::from(2);
    };
    let outfit = match args.outfit.as_deref().map(|id| find_outfit(id).ok_or(id)) {
        Some(Err(id)) => {
            eprintln!("Error: unknown outfit '{id}'");
            return ExitCode::from(2);
        }
        Some(Ok(outfit)) => Some(outfit),
        None => None,
    };
    let standard = match args.standard.as_deref() {
        Some(code) => match find_standard(code) {
            Some(standard) => Some(standard),
            None => {
                eprintln!("Error: unknown standard '{code}'");
                return ExitCode::from(2);
            }
        },
        None => None,
    };

    let settings = GeminiSettings::from_env(
        config.ai.endpoint(),
        config.ai.model(),
        config.ai.api_key_env(),
        config.ai.timeout(),
    );
    let editor = match GeminiImageEditor::new(settings) {
        Ok(editor) => editor,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };
    let wants_ai = args.background.is_some() || outfit.is_some();
    if wants_ai && !editor.is_configured() {
        let reason = format!("set {} to an API key", editor.settings().api_key_env);
        eprintln!(
            "{}",
            i18n.tr_with_args("cli-ai-not-configured", &[("reason", &reason)])
        );
        return ExitCode::FAILURE;
    }

    let mut app = App::new(config, i18n, Arc::new(editor), config_warning);
    let mut failed = false;

    runtime::dispatch(&mut app, Message::OpenPhoto(photo)).await;
    failed |= flush_notifications(&mut app);
    if app.session().step() != WizardStep::Edit {
        return ExitCode::FAILURE;
    }

    // AI edits reset framing and filters, so they run first
    let mut edits = Vec::new();
    if let Some(choice) = args.background.clone() {
        edits.push(EditRequest::Background(choice));
    }
    if let Some(outfit) = outfit {
        edits.push(EditRequest::Outfit(outfit));
    }
    for request in edits {
        runtime::dispatch(&mut app, Message::RequestEdit(request)).await;
        if let Some(status) = app.status_text() {
            println!("{status}");
        }
        if app.session().status().status == ProcessingStatus::Error {
            failed = true;
        }
        runtime::dispatch(&mut app, Message::DismissStatus).await;
    }

    // Framing
    if let Some(zoom) = args.zoom {
        runtime::dispatch(&mut app, Message::ZoomChanged(zoom)).await;
    }
    if let Some(degrees) = args.rotate {
        runtime::dispatch(&mut app, Message::RotationChanged(degrees)).await;
    }
    let (dx, dy) = args.offset;
    if dx != 0.0 || dy != 0.0 {
        runtime::dispatch(&mut app, Message::Drag { dx, dy }).await;
    }
    runtime::dispatch(&mut app, Message::GestureReleased).await;

    for (kind, value) in &args.filters {
        runtime::dispatch(&mut app, Message::FilterChanged(*kind, *value)).await;
        runtime::dispatch(&mut app, Message::GestureReleased).await;
    }

    // Print
    if let Some(standard) = standard {
        runtime::dispatch(&mut app, Message::SelectStandard(standard)).await;
    }
    if let Some(layout) = args.layout {
        runtime::dispatch(&mut app, Message::SelectLayout(layout)).await;
    }
    let format = args
        .format
        .or_else(|| args.output.as_deref().and_then(ExportFormat::from_path));
    if let Some(format) = format {
        runtime::dispatch(&mut app, Message::SelectFormat(format)).await;
    }
    runtime::dispatch(&mut app, Message::Next).await;
    failed |= flush_notifications(&mut app);

    if let Some(sheet) = app.session().sheet() {
        let copies = sheet.copies.to_string();
        println!(
            "{}",
            app.i18n
                .tr_with_args("cli-sheet-summary", &[("copies", &copies)])
        );
        runtime::dispatch(&mut app, Message::Export(args.output.clone())).await;
        if let Some(path) = args.print_doc.clone() {
            runtime::dispatch(&mut app, Message::Print(path)).await;
        }
    }
    failed |= flush_notifications(&mut app);

    if let Some(path) = &args.diagnostics {
        let path = if path.is_dir() {
            path.join(diagnostics::generate_default_filename())
        } else {
            path.clone()
        };
        match app.diagnostics().export_to_file(&path) {
            Ok(written) => {
                let shown = written.display().to_string();
                println!(
                    "{}",
                    app.i18n
                        .tr_with_args("cli-diagnostics-saved", &[("path", &shown)])
                );
            }
            Err(err) => {
                eprintln!("Error: {err}");
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
