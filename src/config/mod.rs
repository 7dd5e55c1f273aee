// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! The configuration is organized into logical sections:
//! - `[general]` - Language
//! - `[print]` - Default standard, layout, export format and sheet geometry
//! - `[editor]` - Preview frame, preview cache and upload limit
//! - `[ai]` - Image-editing service endpoint, model, key variable and timeout
//!
//! Every field is optional. Accessors fill in defaults from [`defaults`] and
//! clamp numbers into their bounds, so a hand-edited file can never push the
//! session outside its working range.
//!
//! # Path Resolution
//!
//! The config file location can be customized for testing or portable deployments:
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Pass `--config-dir` or set `PASSPIX_CONFIG_DIR`
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use passpix::config::{self, Config};
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! // Modify a setting
//! config.print.standard = Some("CA".to_string());
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::app::paths;
use crate::domain::print::{standard_or_default, PassportStandard, PrintLayout};
use crate::error::{Error, Result};
use crate::media::export::ExportFormat;
use crate::media::layout::SheetSpec;

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Print defaults and sheet geometry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PrintConfig {
    /// Country code of the initial passport standard.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard: Option<String>,

    /// `a4` or `single`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,

    /// `jpg`, `png` or `pdf`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(default = "default_margin_mm", skip_serializing_if = "Option::is_none")]
    pub margin_mm: Option<f32>,

    #[serde(default = "default_gap_mm", skip_serializing_if = "Option::is_none")]
    pub gap_mm: Option<f32>,

    #[serde(default = "default_dpi", skip_serializing_if = "Option::is_none")]
    pub dpi: Option<f32>,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            standard: Some(DEFAULT_STANDARD_CODE.to_string()),
            layout: Some(PrintLayout::default().id().to_string()),
            format: Some(ExportFormat::default().extension().to_string()),
            margin_mm: default_margin_mm(),
            gap_mm: default_gap_mm(),
            dpi: default_dpi(),
        }
    }
}

impl PrintConfig {
    /// Configured standard, falling back to the first table entry.
    #[must_use]
    pub fn standard(&self) -> &'static PassportStandard {
        standard_or_default(self.standard.as_deref().unwrap_or(DEFAULT_STANDARD_CODE))
    }

    #[must_use]
    pub fn layout(&self) -> PrintLayout {
        self.layout
            .as_deref()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn format(&self) -> ExportFormat {
        self.format
            .as_deref()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn margin_mm(&self) -> f32 {
        clamp_f32(self.margin_mm, DEFAULT_MARGIN_MM, MIN_MARGIN_MM, MAX_MARGIN_MM)
    }

    #[must_use]
    pub fn gap_mm(&self) -> f32 {
        clamp_f32(self.gap_mm, DEFAULT_GAP_MM, MIN_GAP_MM, MAX_GAP_MM)
    }

    #[must_use]
    pub fn dpi(&self) -> f32 {
        clamp_f32(self.dpi, DEFAULT_DPI, MIN_DPI, MAX_DPI)
    }

    /// A4 sheet with the configured margin, gap and resolution.
    #[must_use]
    pub fn sheet_spec(&self) -> SheetSpec {
        SheetSpec {
            margin_mm: self.margin_mm(),
            gap_mm: self.gap_mm(),
            dpi: self.dpi(),
            ..SheetSpec::a4()
        }
    }
}

/// Editing preview and upload settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EditorConfig {
    #[serde(
        default = "default_frame_width_px",
        skip_serializing_if = "Option::is_none"
    )]
    pub preview_frame_width_px: Option<f32>,

    #[serde(
        default = "default_preview_cache_entries",
        skip_serializing_if = "Option::is_none"
    )]
    pub preview_cache_entries: Option<usize>,

    #[serde(
        default = "default_max_upload_bytes",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_upload_bytes: Option<u64>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            preview_frame_width_px: default_frame_width_px(),
            preview_cache_entries: default_preview_cache_entries(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl EditorConfig {
    #[must_use]
    pub fn preview_frame_width_px(&self) -> f32 {
        clamp_f32(
            self.preview_frame_width_px,
            DEFAULT_FRAME_WIDTH_PX,
            MIN_FRAME_WIDTH_PX,
            MAX_FRAME_WIDTH_PX,
        )
    }

    #[must_use]
    pub fn preview_cache_entries(&self) -> usize {
        self.preview_cache_entries
            .unwrap_or(DEFAULT_PREVIEW_CACHE_ENTRIES)
            .clamp(MIN_PREVIEW_CACHE_ENTRIES, MAX_PREVIEW_CACHE_ENTRIES)
    }

    #[must_use]
    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_bytes
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES)
            .clamp(MIN_MAX_UPLOAD_BYTES, MAX_MAX_UPLOAD_BYTES)
    }
}

/// AI image-editing service settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AiConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Environment variable that holds the API key. The key itself is never
    /// stored in the file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,

    #[serde(
        default = "default_ai_timeout_secs",
        skip_serializing_if = "Option::is_none"
    )]
    pub timeout_secs: Option<u64>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            endpoint: Some(DEFAULT_AI_ENDPOINT.to_string()),
            model: Some(DEFAULT_AI_MODEL.to_string()),
            api_key_env: Some(DEFAULT_AI_API_KEY_ENV.to_string()),
            timeout_secs: default_ai_timeout_secs(),
        }
    }
}

impl AiConfig {
    #[must_use]
    pub fn endpoint(&self) -> &str {
        non_empty(self.endpoint.as_deref()).unwrap_or(DEFAULT_AI_ENDPOINT)
    }

    #[must_use]
    pub fn model(&self) -> &str {
        non_empty(self.model.as_deref()).unwrap_or(DEFAULT_AI_MODEL)
    }

    #[must_use]
    pub fn api_key_env(&self) -> &str {
        non_empty(self.api_key_env.as_deref()).unwrap_or(DEFAULT_AI_API_KEY_ENV)
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(
            self.timeout_secs
                .unwrap_or(DEFAULT_AI_TIMEOUT_SECS)
                .clamp(MIN_AI_TIMEOUT_SECS, MAX_AI_TIMEOUT_SECS),
        )
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub print: PrintConfig,

    #[serde(default)]
    pub editor: EditorConfig,

    #[serde(default)]
    pub ai: AiConfig,
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_margin_mm() -> Option<f32> {
    Some(DEFAULT_MARGIN_MM)
}

fn default_gap_mm() -> Option<f32> {
    Some(DEFAULT_GAP_MM)
}

fn default_dpi() -> Option<f32> {
    Some(DEFAULT_DPI)
}

fn default_frame_width_px() -> Option<f32> {
    Some(DEFAULT_FRAME_WIDTH_PX)
}

fn default_preview_cache_entries() -> Option<usize> {
    Some(DEFAULT_PREVIEW_CACHE_ENTRIES)
}

fn default_max_upload_bytes() -> Option<u64> {
    Some(DEFAULT_MAX_UPLOAD_BYTES)
}

fn default_ai_timeout_secs() -> Option<u64> {
    Some(DEFAULT_AI_TIMEOUT_SECS)
}

fn clamp_f32(value: Option<f32>, default: f32, min: f32, max: f32) -> f32 {
    match value {
        Some(v) if v.is_finite() => v.clamp(min, max),
        _ => default,
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config file path with an optional override.
fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with the i18n key of a warning explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(_) => {
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
