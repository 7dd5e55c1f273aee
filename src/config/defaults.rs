// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! and bounds used by the configuration accessors. Constants are organized
//! by section.

use crate::media::compose;
use crate::media::layout;
use crate::media::preview_cache;
use crate::media::upload;

// ==========================================================================
// Print Defaults
// ==========================================================================

/// Country code of the standard selected at startup.
pub const DEFAULT_STANDARD_CODE: &str = "US";

/// Sheet margin in millimeters.
pub const DEFAULT_MARGIN_MM: f32 = layout::DEFAULT_MARGIN_MM;
pub const MIN_MARGIN_MM: f32 = 0.0;
pub const MAX_MARGIN_MM: f32 = 30.0;

/// Gap between copies in millimeters.
pub const DEFAULT_GAP_MM: f32 = layout::DEFAULT_GAP_MM;
pub const MIN_GAP_MM: f32 = 0.0;
pub const MAX_GAP_MM: f32 = 20.0;

/// Print resolution in dots per inch.
pub const DEFAULT_DPI: f32 = layout::PRINT_DPI;
pub const MIN_DPI: f32 = 72.0;
pub const MAX_DPI: f32 = 600.0;

// ==========================================================================
// Editor Defaults
// ==========================================================================

/// Width of the edit preview frame in pixels.
pub const DEFAULT_FRAME_WIDTH_PX: f32 = compose::DEFAULT_FRAME_WIDTH_PX;
pub const MIN_FRAME_WIDTH_PX: f32 = 64.0;
pub const MAX_FRAME_WIDTH_PX: f32 = 2048.0;

/// Number of rendered previews kept in memory.
pub const DEFAULT_PREVIEW_CACHE_ENTRIES: usize = preview_cache::DEFAULT_PREVIEW_CACHE_ENTRIES;
pub const MIN_PREVIEW_CACHE_ENTRIES: usize = 1;
pub const MAX_PREVIEW_CACHE_ENTRIES: usize = 256;

/// Largest accepted upload in bytes.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = upload::DEFAULT_MAX_UPLOAD_BYTES;
pub const MIN_MAX_UPLOAD_BYTES: u64 = 64 * 1024;
pub const MAX_MAX_UPLOAD_BYTES: u64 = 100 * 1024 * 1024;

// ==========================================================================
// AI Service Defaults
// ==========================================================================

pub const DEFAULT_AI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_AI_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_AI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Request timeout in seconds.
pub const DEFAULT_AI_TIMEOUT_SECS: u64 = 60;
pub const MIN_AI_TIMEOUT_SECS: u64 = 5;
pub const MAX_AI_TIMEOUT_SECS: u64 = 600;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_lie_within_bounds() {
        assert!((MIN_MARGIN_MM..=MAX_MARGIN_MM).contains(&DEFAULT_MARGIN_MM));
        assert!((MIN_GAP_MM..=MAX_GAP_MM).contains(&DEFAULT_GAP_MM));
        assert!((MIN_DPI..=MAX_DPI).contains(&DEFAULT_DPI));
        assert!((MIN_FRAME_WIDTH_PX..=MAX_FRAME_WIDTH_PX).contains(&DEFAULT_FRAME_WIDTH_PX));
        assert!((MIN_PREVIEW_CACHE_ENTRIES..=MAX_PREVIEW_CACHE_ENTRIES)
            .contains(&DEFAULT_PREVIEW_CACHE_ENTRIES));
        assert!((MIN_MAX_UPLOAD_BYTES..=MAX_MAX_UPLOAD_BYTES).contains(&DEFAULT_MAX_UPLOAD_BYTES));
        assert!((MIN_AI_TIMEOUT_SECS..=MAX_AI_TIMEOUT_SECS).contains(&DEFAULT_AI_TIMEOUT_SECS));
    }
}
