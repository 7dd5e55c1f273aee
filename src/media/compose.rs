// SPDX-License-Identifier: MPL-2.0
//! Bakes the display transform into a print-resolution photo.
//!
//! While editing, the photo is cover-fitted into a frame with the
//! standard's aspect ratio and moved with scale / rotate / translate about
//! the frame center. This module reproduces that picture at the standard's
//! physical size at print DPI.

use tiny_skia::{Color, FilterQuality, Pixmap, PixmapPaint, Transform as Affine};

use crate::domain::editing::Transform;
use crate::domain::media::EncodedImage;
use crate::domain::print::PassportStandard;
use crate::media::image::{decode, encode_jpeg, from_pixmap, to_pixmap, PREVIEW_JPEG_QUALITY};
use crate::media::layout::{mm_to_px, LayoutError};

/// Default preview frame width in pixels.
pub const DEFAULT_FRAME_WIDTH_PX: f32 = 448.0;

/// Preview frame geometry for one standard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub width: f32,
    pub height: f32,
}

impl Frame {
    /// Frame of the given width with the standard's aspect ratio.
    #[must_use]
    pub fn for_standard(standard: &PassportStandard, width_px: f32) -> Self {
        let width = if width_px.is_finite() && width_px > 0.0 {
            width_px
        } else {
            DEFAULT_FRAME_WIDTH_PX
        };
        Self {
            width,
            height: width * standard.aspect_ratio(),
        }
    }
}

/// Builds the affine matrix that places a `source_w × source_h` image into
/// an `output_w × output_h` canvas.
///
/// The image is cover-fitted and centered, then the display transform is
/// applied about the canvas center. `units_to_px` converts the transform's
/// frame-pixel translation into output pixels.
#[must_use]
pub fn placement_matrix(
    source_w: f32,
    source_h: f32,
    output_w: f32,
    output_h: f32,
    transform: &Transform,
    units_to_px: f32,
) -> Affine {
    let cover = (output_w / source_w).max(output_h / source_h);
    let (cx, cy) = (output_w / 2.0, output_h / 2.0);

    let fit = Affine::from_scale(cover, cover)
        .post_translate(cx - source_w * cover / 2.0, cy - source_h * cover / 2.0);
    let scale = transform.scale.value();
    let view = Affine::from_translate(-cx, -cy)
        .post_scale(scale, scale)
        .post_concat(Affine::from_rotate(transform.rotation.as_f32()))
        .post_translate(
            cx + transform.translate_x * units_to_px,
            cy + transform.translate_y * units_to_px,
        );
    fit.post_concat(view)
}

/// Renders the framed photo at the standard's size and `dpi`.
///
/// Any area the photo no longer covers (zoomed out, rotated, moved) is white.
///
/// # Errors
///
/// Returns [`LayoutError::InvalidDimensions`] for unusable standards and
/// [`LayoutError::Render`] if decoding, allocation or encoding fails.
pub fn compose_photo(
    source: &EncodedImage,
    transform: &Transform,
    standard: &PassportStandard,
    frame_width_px: f32,
    dpi: f32,
) -> Result<EncodedImage, LayoutError> {
    let (out_w, out_h) = output_size(standard, dpi)?;
    let frame = Frame::for_standard(standard, frame_width_px);

    let pixels = decode(source)?.to_rgba8();
    let source_pixmap =
        to_pixmap(&pixels).ok_or_else(|| LayoutError::Render("photo has no pixels".into()))?;
    let mut canvas = Pixmap::new(out_w, out_h)
        .ok_or_else(|| LayoutError::Render(format!("cannot allocate {out_w}x{out_h} photo")))?;
    canvas.fill(Color::WHITE);

    #[allow(clippy::cast_precision_loss)]
    let (src_w, src_h, dst_w, dst_h) = (
        source_pixmap.width() as f32,
        source_pixmap.height() as f32,
        out_w as f32,
        out_h as f32,
    );
    let matrix = placement_matrix(src_w, src_h, dst_w, dst_h, transform, dst_w / frame.width);
    let paint = PixmapPaint {
        quality: FilterQuality::Bicubic,
        ..PixmapPaint::default()
    };
    canvas.draw_pixmap(0, 0, source_pixmap.as_ref(), &paint, matrix, None);

    Ok(encode_jpeg(&from_pixmap(&canvas), PREVIEW_JPEG_QUALITY)?)
}

fn output_size(standard: &PassportStandard, dpi: f32) -> Result<(u32, u32), LayoutError> {
    let invalid = || LayoutError::InvalidDimensions {
        width_mm: standard.width_mm,
        height_mm: standard.height_mm,
    };
    let to_px = |mm: f32| -> Option<u32> {
        let px = mm_to_px(mm, dpi).round();
        if !(px.is_finite() && px >= 1.0 && px <= f64::from(u32::MAX)) {
            return None;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let px = px as u32;
        Some(px)
    };
    Ok((
        to_px(standard.width_mm).ok_or_else(invalid)?,
        to_px(standard.height_mm).ok_or_else(invalid)?,
    ))
}
