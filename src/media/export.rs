// SPDX-License-Identifier: MPL-2.0
//! Export of rendered sheets to JPEG, PNG or single-page PDF.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream};

use crate::domain::media::{EncodedImage, ImageFormat};
use crate::domain::print::{PassportStandard, PrintLayout};
use crate::media::image::{decode, encode_jpeg, encode_png, SHEET_JPEG_QUALITY};
use crate::media::layout::Sheet;

const POINTS_PER_MM: f32 = 72.0 / 25.4;
const IMAGE_RESOURCE: &str = "Im0";

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExportFormat {
    #[default]
    Jpg,
    Png,
    Pdf,
}

impl ExportFormat {
    /// Returns the file extension for this format.
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Jpg => "jpg",
            ExportFormat::Png => "png",
            ExportFormat::Pdf => "pdf",
        }
    }

    /// Returns a human-readable description for file dialogs.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            ExportFormat::Jpg => "JPEG Image",
            ExportFormat::Png => "PNG Image",
            ExportFormat::Pdf => "PDF Document",
        }
    }

    /// Returns all available export formats.
    #[must_use]
    pub fn all() -> &'static [ExportFormat] {
        &[ExportFormat::Jpg, ExportFormat::Png, ExportFormat::Pdf]
    }

    /// Attempts to determine format from file extension.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<ExportFormat> {
        match ext.to_lowercase().as_str() {
            "jpg" | "jpeg" => Some(ExportFormat::Jpg),
            "png" => Some(ExportFormat::Png),
            "pdf" => Some(ExportFormat::Pdf),
            _ => None,
        }
    }

    /// Attempts to determine format from a path's extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<ExportFormat> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(ExportFormat::from_extension)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ExportFormat::from_extension(value.trim())
            .ok_or_else(|| format!("unknown format '{}' (expected jpg, png or pdf)", value.trim()))
    }
}

/// Why an export failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    /// Nothing has been rendered yet.
    NothingToExport,
    Encode(String),
    Pdf(String),
    Io(String),
}

impl ExportError {
    /// Returns the i18n message key for this error.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            ExportError::NothingToExport => "error-export-nothing",
            ExportError::Encode(_) | ExportError::Pdf(_) => "error-export-encode",
            ExportError::Io(_) => "error-export-write",
        }
    }
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::NothingToExport => write!(f, "no sheet has been rendered"),
            ExportError::Encode(msg) => write!(f, "encoding failed: {msg}"),
            ExportError::Pdf(msg) => write!(f, "PDF generation failed: {msg}"),
            ExportError::Io(msg) => write!(f, "write failed: {msg}"),
        }
    }
}

impl std::error::Error for ExportError {}

impl From<crate::error::Error> for ExportError {
    fn from(err: crate::error::Error) -> Self {
        ExportError::Encode(err.to_string())
    }
}

/// Default download name: `PassPix-{country}-{layout}.{ext}`.
#[must_use]
pub fn export_filename(
    standard: &PassportStandard,
    layout: PrintLayout,
    format: ExportFormat,
) -> String {
    format!(
        "PassPix-{}-{}.{}",
        standard.country_code,
        layout.id(),
        format.extension()
    )
}

/// Encodes a sheet in the requested format.
///
/// # Errors
///
/// Returns [`ExportError::Encode`] or [`ExportError::Pdf`] on failure.
pub fn encode_export(sheet: &Sheet, format: ExportFormat) -> Result<Vec<u8>, ExportError> {
    match format {
        ExportFormat::Jpg => Ok(as_jpeg(&sheet.image)?.bytes().to_vec()),
        ExportFormat::Png => {
            if sheet.image.format() == ImageFormat::Png {
                return Ok(sheet.image.bytes().to_vec());
            }
            let pixels = decode(&sheet.image)?.to_rgba8();
            Ok(encode_png(&pixels)?.bytes().to_vec())
        }
        ExportFormat::Pdf => {
            let jpeg = as_jpeg(&sheet.image)?;
            build_pdf(&jpeg, sheet.page_width_mm, sheet.page_height_mm)
        }
    }
}

/// Encodes and writes a sheet, creating parent directories.
///
/// # Errors
///
/// Returns [`ExportError::Io`] if the file cannot be written.
pub fn write_export(sheet: &Sheet, format: ExportFormat, path: &Path) -> Result<(), ExportError> {
    let bytes = encode_export(sheet, format)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ExportError::Io(e.to_string()))?;
    }
    fs::write(path, bytes).map_err(|e| ExportError::Io(e.to_string()))
}

fn as_jpeg(image: &EncodedImage) -> Result<EncodedImage, ExportError> {
    if image.format() == ImageFormat::Jpeg {
        return Ok(image.clone());
    }
    let pixels = decode(image)?.to_rgba8();
    Ok(encode_jpeg(&pixels, SHEET_JPEG_QUALITY)?)
}

/// Builds a one-page PDF with the JPEG stretched over the whole page.
///
/// The JPEG stream is embedded as-is (`DCTDecode`), never recompressed.
///
/// # Errors
///
/// Returns [`ExportError::Pdf`] if serialization fails.
pub fn build_pdf(jpeg: &EncodedImage, page_width_mm: f32, page_height_mm: f32) -> Result<Vec<u8>, ExportError> {
    if jpeg.format() != ImageFormat::Jpeg {
        return Err(ExportError::Pdf("page image must be JPEG".into()));
    }
    let width_pt = page_width_mm * POINTS_PER_MM;
    let height_pt = page_height_mm * POINTS_PER_MM;
    if !(width_pt.is_finite() && height_pt.is_finite() && width_pt > 0.0 && height_pt > 0.0) {
        return Err(ExportError::Pdf(format!(
            "invalid page size {page_width_mm}x{page_height_mm} mm"
        )));
    }

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let image_stream = Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => i64::from(jpeg.width()),
            "Height" => i64::from(jpeg.height()),
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "Filter" => "DCTDecode",
        },
        jpeg.bytes().to_vec(),
    );
    let image_id = doc.add_object(image_stream);

    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    width_pt.into(),
                    0.into(),
                    0.into(),
                    height_pt.into(),
                    0.into(),
                    0.into(),
                ],
            ),
            Operation::new("Do", vec![Object::Name(IMAGE_RESOURCE.as_bytes().to_vec())]),
            Operation::new("Q", vec![]),
        ],
    };
    let encoded = content.encode().map_err(|e| ExportError::Pdf(e.to_string()))?;
    let content_id = doc.add_object(Stream::new(Dictionary::new(), encoded));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "MediaBox" => vec![0.into(), 0.into(), width_pt.into(), height_pt.into()],
        "Resources" => dictionary! {
            "XObject" => dictionary! { IMAGE_RESOURCE => image_id },
        },
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    Ok(bytes)
}
