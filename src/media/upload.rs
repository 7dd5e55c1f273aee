// SPDX-License-Identifier: MPL-2.0
//! Validation of user-supplied photos.
//!
//! A rejected upload never touches session state; the caller only receives
//! an [`UploadError`] that maps to a localized message.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::domain::media::{EncodedImage, ImageFormat};
use crate::media::image::{decode_bytes, format_from_codec};

/// Largest accepted upload (10 MB).
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Why an upload was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadError {
    /// The declared type or the file content is not an image.
    NotAnImage,
    /// The file exceeds the size limit.
    TooLarge { size_bytes: u64, max_bytes: u64 },
    /// Recognized image type the codec stack cannot decode (e.g. HEIC).
    UnsupportedFormat(String),
    /// The file could not be read or its pixels are corrupt.
    Unreadable(String),
}

impl UploadError {
    /// Returns the i18n message key for this error.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            UploadError::NotAnImage => "error-upload-not-image",
            UploadError::TooLarge { .. } => "error-upload-too-large",
            UploadError::UnsupportedFormat(_) => "error-upload-unsupported",
            UploadError::Unreadable(_) => "error-upload-unreadable",
        }
    }

    /// Returns the arguments the i18n message expects.
    pub fn i18n_args(&self) -> Vec<(&'static str, String)> {
        match self {
            UploadError::TooLarge { max_bytes, .. } => vec![("limit", format_megabytes(*max_bytes))],
            _ => Vec::new(),
        }
    }
}

/// Whole megabytes print without decimals, others with one.
fn format_megabytes(bytes: u64) -> String {
    const MIB: u64 = 1024 * 1024;
    if bytes % MIB == 0 {
        (bytes / MIB).to_string()
    } else {
        format!("{:.1}", bytes as f64 / MIB as f64)
    }
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadError::NotAnImage => write!(f, "file is not an image"),
            UploadError::TooLarge {
                size_bytes,
                max_bytes,
            } => write!(f, "file is {size_bytes} bytes, limit is {max_bytes} bytes"),
            UploadError::UnsupportedFormat(kind) => write!(f, "{kind} images cannot be decoded"),
            UploadError::Unreadable(msg) => write!(f, "cannot read image: {msg}"),
        }
    }
}

impl std::error::Error for UploadError {}

/// Returns true for HEIF/HEIC containers (ISO BMFF with an image brand).
fn is_heif(bytes: &[u8]) -> bool {
    const BRANDS: [&[u8; 4]; 6] = [b"heic", b"heix", b"hevc", b"heim", b"mif1", b"msf1"];
    bytes.len() >= 12 && &bytes[4..8] == b"ftyp" && BRANDS.iter().any(|b| &bytes[8..12] == *b)
}

/// Validates raw upload bytes.
///
/// `declared_mime` is the type reported by whoever supplied the file. When
/// present it must be an `image/*` type; the content is sniffed either way.
///
/// # Errors
///
/// See [`UploadError`].
pub fn validate_upload(
    bytes: Vec<u8>,
    declared_mime: Option<&str>,
    max_bytes: u64,
) -> Result<EncodedImage, UploadError> {
    if let Some(mime) = declared_mime {
        if !mime.trim().to_ascii_lowercase().starts_with("image/") {
            return Err(UploadError::NotAnImage);
        }
    }

    let size_bytes = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
    if size_bytes > max_bytes {
        return Err(UploadError::TooLarge {
            size_bytes,
            max_bytes,
        });
    }

    if is_heif(&bytes) {
        return Err(UploadError::UnsupportedFormat("HEIC".to_string()));
    }

    let codec_format = image_rs::guess_format(&bytes).map_err(|_| UploadError::NotAnImage)?;
    let format: ImageFormat = format_from_codec(codec_format)
        .ok_or_else(|| UploadError::UnsupportedFormat(format!("{codec_format:?}")))?;

    let decoded = decode_bytes(&bytes).map_err(|e| UploadError::Unreadable(e.to_string()))?;
    if decoded.width() == 0 || decoded.height() == 0 {
        return Err(UploadError::Unreadable("image has no pixels".to_string()));
    }

    Ok(EncodedImage::new(
        bytes,
        format,
        decoded.width(),
        decoded.height(),
    ))
}

/// Reads and validates a photo from disk.
///
/// The size limit is checked from file metadata before reading.
///
/// # Errors
///
/// See [`UploadError`].
pub fn load_upload(path: &Path, max_bytes: u64) -> Result<EncodedImage, UploadError> {
    let metadata = fs::metadata(path).map_err(|e| UploadError::Unreadable(e.to_string()))?;
    if metadata.len() > max_bytes {
        return Err(UploadError::TooLarge {
            size_bytes: metadata.len(),
            max_bytes,
        });
    }
    let bytes = fs::read(path).map_err(|e| UploadError::Unreadable(e.to_string()))?;
    let declared = path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(mime_from_extension);
    validate_upload(bytes, declared, max_bytes)
}

/// Guesses a MIME type from a file extension.
#[must_use]
pub fn mime_from_extension(extension: &str) -> Option<&'static str> {
    match extension.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "bmp" => Some("image/bmp"),
        "tif" | "tiff" => Some("image/tiff"),
        "heic" | "heif" => Some("image/heic"),
        "txt" | "md" => Some("text/plain"),
        "pdf" => Some("application/pdf"),
        _ => None,
    }
}
