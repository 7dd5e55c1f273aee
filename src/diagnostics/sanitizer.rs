// SPDX-License-Identifier: MPL-2.0
//! Message sanitization and warning/error type definitions.
//!
//! This module provides:
//! - Type enums for categorizing warnings and errors
//! - Message sanitization to remove file paths

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

// =============================================================================
// Warning and Error Type Enums
// =============================================================================

/// Categories of warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningType {
    /// An upload was rejected.
    InvalidUpload,
    /// A preview render failed and the base image was shown instead.
    RenderFallback,
    /// A configuration issue was detected.
    ConfigurationIssue,
    /// Other warning type not covered by specific categories.
    Other,
}

/// Categories of errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Input/output error (file read/write failures).
    IoError,
    /// Image decoding error.
    DecodeError,
    /// The print sheet could not be laid out or rendered.
    LayoutError,
    /// Export/save operation error.
    ExportError,
    /// The AI image-editing service failed.
    #[serde(rename = "ai_service_error")]
    AIServiceError,
    /// Other error type not covered by specific categories.
    Other,
}

// =============================================================================
// Message Sanitization
// =============================================================================

/// Compiled regex patterns for path detection.
static PATH_PATTERNS: LazyLock<Regex> = LazyLock::new(|| {
    // Path continues until whitespace or common delimiters (quotes, parens, brackets)
    Regex::new(concat!(
        r#"("#,
        r#"/home/[^\s"'()\[\]]+"#,       // Linux home
        r#"|/Users/[^\s"'()\[\]]+"#,     // macOS home
        r#"|/tmp/[^\s"'()\[\]]+"#,       // Temp directory
        r#"|/var/[^\s"'()\[\]]+"#,       // Variable data
        r#"|/root/[^\s"'()\[\]]+"#,      // Root home
        r#"|/mnt/[^\s"'()\[\]]+"#,       // Mounted volumes
        r#"|~/[^\s"'()\[\]]+"#,          // Home shortcut (all platforms)
        r#"|[A-Za-z]:\\[^\s"'()\[\]]+"#, // Windows drive paths (C:\, D:\, etc.)
        r#"|\\\\[^\s"'()\[\]]+"#,        // Windows UNC paths (\\server\share)
        r#")"#,
    ))
    .expect("path regex should compile")
});

/// Replaces file paths in a message with a `<path>` placeholder.
///
/// # Examples
///
/// ```
/// use passpix::diagnostics::sanitize_message;
///
/// let msg = "Failed to open /home/user/photos/me.jpg";
/// assert_eq!(sanitize_message(msg), "Failed to open <path>");
///
/// let msg = "Invalid format";
/// assert_eq!(sanitize_message(msg), "Invalid format");
/// ```
#[must_use]
pub fn sanitize_message(message: &str) -> String {
    PATH_PATTERNS.replace_all(message, "<path>").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warning_type_serializes_to_snake_case() {
        assert_eq!(
            serde_json::to_string(&WarningType::RenderFallback).unwrap(),
            "\"render_fallback\""
        );
        assert_eq!(
            serde_json::to_string(&WarningType::InvalidUpload).unwrap(),
            "\"invalid_upload\""
        );
    }

    #[test]
    fn error_type_uses_explicit_ai_name() {
        assert_eq!(
            serde_json::to_string(&ErrorType::AIServiceError).unwrap(),
            "\"ai_service_error\""
        );
        let parsed: ErrorType = serde_json::from_str("\"layout_error\"").unwrap();
        assert_eq!(parsed, ErrorType::LayoutError);
    }

    #[test]
    fn sanitize_strips_unix_and_windows_paths() {
        assert_eq!(
            sanitize_message("cannot read /Users/ana/Pictures/passport.heic now"),
            "cannot read <path> now"
        );
        assert_eq!(
            sanitize_message("write failed: C:\\Users\\ana\\PassPix-US-a4.pdf"),
            "write failed: <path>"
        );
        assert_eq!(sanitize_message("see ~/photos/me.png"), "see <path>");
    }

    #[test]
    fn sanitize_keeps_paths_inside_quotes_delimited() {
        assert_eq!(
            sanitize_message("open '/tmp/upload.jpg' failed"),
            "open '<path>' failed"
        );
    }

    #[test]
    fn sanitize_leaves_plain_text_alone() {
        assert_eq!(sanitize_message("AI service returned 500"), "AI service returned 500");
    }
}
