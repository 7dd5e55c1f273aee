// SPDX-License-Identifier: MPL-2.0
//! Color filter renderer.
//!
//! Brightness, contrast and saturation follow the CSS filter functions of
//! the same name and run as one per-pixel pass. Warmth is a second pass: a
//! translucent orange (warm) or blue (cool) fill composited with the overlay
//! blend mode. The result is re-encoded as JPEG.

use image_rs::{Rgba, RgbaImage};
use tiny_skia::{BlendMode, Color, Paint, Rect, Transform};

use crate::domain::editing::{FilterSettings, FilterValue};
use crate::domain::media::EncodedImage;
use crate::error::{Error, Result};
use crate::media::image::{decode, encode_jpeg, from_pixmap, to_pixmap, PREVIEW_JPEG_QUALITY};

/// Overlay opacity per unit of warmth.
const WARMTH_ALPHA_PER_UNIT: f32 = 0.002;

const WARM_TINT: [u8; 3] = [255, 160, 0];
const COOL_TINT: [u8; 3] = [0, 100, 255];

/// Result of a preview render.
#[derive(Debug, Clone)]
pub struct FilterOutcome {
    pub image: EncodedImage,
    /// Set when rendering failed and `image` is the unmodified base.
    pub fallback_reason: Option<String>,
}

/// Renders a preview, falling back to the base image on any failure.
#[must_use]
pub fn apply_filters(base: &EncodedImage, filters: &FilterSettings) -> FilterOutcome {
    match render_filters(base, filters) {
        Ok(image) => FilterOutcome {
            image,
            fallback_reason: None,
        },
        Err(err) => FilterOutcome {
            image: base.clone(),
            fallback_reason: Some(err.to_string()),
        },
    }
}

/// Renders a preview.
///
/// Neutral settings skip every pass, so the output is exactly a re-encode of
/// the decoded base.
///
/// # Errors
///
/// Returns [`Error::Image`] if decoding or encoding fails.
pub fn render_filters(base: &EncodedImage, filters: &FilterSettings) -> Result<EncodedImage> {
    let mut pixels = decode(base)?.to_rgba8();
    apply_color_filters(&mut pixels, filters);
    if !filters.warmth.is_neutral() {
        pixels = apply_warmth(&pixels, filters.warmth)?;
    }
    encode_jpeg(&pixels, PREVIEW_JPEG_QUALITY)
}

/// Applies brightness, contrast and saturation in place.
pub fn apply_color_filters(pixels: &mut RgbaImage, filters: &FilterSettings) {
    let brightness = filters.brightness;
    let contrast = filters.contrast;
    let saturation = filters.saturation;
    if brightness.is_neutral() && contrast.is_neutral() && saturation.is_neutral() {
        return;
    }

    // Brightness and contrast act per channel, so they fold into one table.
    let table: [f32; 256] = std::array::from_fn(|index| {
        #[allow(clippy::cast_precision_loss)]
        let mut value = index as f32 / 255.0;
        if !brightness.is_neutral() {
            value = (value * brightness.as_factor()).clamp(0.0, 1.0);
        }
        if !contrast.is_neutral() {
            value = ((value - 0.5) * contrast.as_factor() + 0.5).clamp(0.0, 1.0);
        }
        value
    });
    let matrix = (!saturation.is_neutral()).then(|| saturate_matrix(saturation.as_factor()));

    for pixel in pixels.pixels_mut() {
        let Rgba([r, g, b, a]) = *pixel;
        let mut rgb = [
            table[usize::from(r)],
            table[usize::from(g)],
            table[usize::from(b)],
        ];
        if let Some(m) = &matrix {
            let [r, g, b] = rgb;
            rgb = [
                (m[0] * r + m[1] * g + m[2] * b).clamp(0.0, 1.0),
                (m[3] * r + m[4] * g + m[5] * b).clamp(0.0, 1.0),
                (m[6] * r + m[7] * g + m[8] * b).clamp(0.0, 1.0),
            ];
        }
        *pixel = Rgba([to_u8(rgb[0]), to_u8(rgb[1]), to_u8(rgb[2]), a]);
    }
}

/// Luminance-preserving saturation matrix (row-major 3x3).
fn saturate_matrix(s: f32) -> [f32; 9] {
    [
        0.213 + 0.787 * s,
        0.715 - 0.715 * s,
        0.072 - 0.072 * s,
        0.213 - 0.213 * s,
        0.715 + 0.285 * s,
        0.072 - 0.072 * s,
        0.213 - 0.213 * s,
        0.715 - 0.715 * s,
        0.072 + 0.928 * s,
    ]
}

fn to_u8(value: f32) -> u8 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let byte = (value * 255.0).round().clamp(0.0, 255.0) as u8;
    byte
}

/// Composites the warmth tint over the image with the overlay blend mode.
///
/// # Errors
///
/// Returns [`Error::Image`] if the image is empty.
pub fn apply_warmth(pixels: &RgbaImage, warmth: FilterValue) -> Result<RgbaImage> {
    if warmth.is_neutral() {
        return Ok(pixels.clone());
    }
    let mut pixmap =
        to_pixmap(pixels).ok_or_else(|| Error::Image("cannot tint an empty image".into()))?;

    let [r, g, b] = if warmth.value() > 0 {
        WARM_TINT
    } else {
        COOL_TINT
    };
    #[allow(clippy::cast_precision_loss)]
    let alpha = warmth.value().unsigned_abs() as f32 * WARMTH_ALPHA_PER_UNIT;
    let color = Color::from_rgba(
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
        alpha,
    )
    .ok_or_else(|| Error::Image(format!("invalid tint opacity {alpha}")))?;

    let mut paint = Paint::default();
    paint.set_color(color);
    paint.blend_mode = BlendMode::Overlay;
    paint.anti_alias = false;

    #[allow(clippy::cast_precision_loss)]
    let rect = Rect::from_xywh(0.0, 0.0, pixmap.width() as f32, pixmap.height() as f32)
        .ok_or_else(|| Error::Image("invalid tint area".into()))?;
    pixmap.fill_rect(rect, &paint, Transform::identity(), None);

    Ok(from_pixmap(&pixmap))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::editing::FilterKind;
    use crate::domain::media::ImageFormat;
    use crate::test_utils::sample_jpeg;

    fn solid(value: [u8; 3]) -> RgbaImage {
        RgbaImage::from_pixel(4, 4, Rgba([value[0], value[1], value[2], 255]))
    }

    fn with(kind: FilterKind, value: i32) -> FilterSettings {
        FilterSettings::neutral().with(kind, FilterValue::new(value))
    }

    #[test]
    fn neutral_filters_match_plain_reencode() {
        let base = sample_jpeg(24, 18);
        let rendered = render_filters(&base, &FilterSettings::neutral()).expect("render");
        let reencoded = encode_jpeg(&decode(&base).expect("decode").to_rgba8(), PREVIEW_JPEG_QUALITY)
            .expect("encode");
        assert_eq!(rendered.bytes(), reencoded.bytes());
    }

    #[test]
    fn rendering_is_deterministic() {
        let base = sample_jpeg(16, 16);
        let filters = with(FilterKind::Contrast, 30).with(FilterKind::Warmth, FilterValue::new(-25));
        let first = render_filters(&base, &filters).expect("first render");
        let second = render_filters(&base, &filters).expect("second render");
        assert_eq!(first.bytes(), second.bytes());
        assert_eq!(first.format(), ImageFormat::Jpeg);
    }

    #[test]
    fn brightness_scales_channels() {
        let mut pixels = solid([100, 100, 100]);
        apply_color_filters(&mut pixels, &with(FilterKind::Brightness, 50));
        assert_eq!(pixels.get_pixel(0, 0).0, [150, 150, 150, 255]);
    }

    #[test]
    fn brightness_clamps_at_white() {
        let mut pixels = solid([240, 240, 240]);
        apply_color_filters(&mut pixels, &with(FilterKind::Brightness, 50));
        assert_eq!(pixels.get_pixel(0, 0).0, [255, 255, 255, 255]);
    }

    #[test]
    fn contrast_pulls_towards_mid_gray() {
        let mut pixels = solid([200, 200, 200]);
        apply_color_filters(&mut pixels, &with(FilterKind::Contrast, -50));
        // (200/255 - 0.5) * 0.5 + 0.5 = 0.642 -> 164
        assert_eq!(pixels.get_pixel(0, 0).0[0], 164);
    }

    #[test]
    fn desaturation_leaves_gray_untouched() {
        let mut pixels = solid([90, 90, 90]);
        apply_color_filters(&mut pixels, &with(FilterKind::Saturation, -50));
        assert_eq!(pixels.get_pixel(0, 0).0, [90, 90, 90, 255]);
    }

    #[test]
    fn desaturation_narrows_channel_spread() {
        let mut pixels = solid([220, 40, 40]);
        apply_color_filters(&mut pixels, &with(FilterKind::Saturation, -50));
        let [r, g, b, _] = pixels.get_pixel(0, 0).0;
        assert!(r < 220 && g > 40 && b > 40);
        assert!(r - g < 180);
    }

    #[test]
    fn positive_warmth_pushes_red_up_and_blue_down() {
        let pixels = solid([128, 128, 128]);
        let warm = apply_warmth(&pixels, FilterValue::new(50)).expect("warm");
        let [r, _, b, a] = warm.get_pixel(1, 1).0;
        assert!(r > 133, "red was {r}");
        assert!(b < 123, "blue was {b}");
        assert_eq!(a, 255);
    }

    #[test]
    fn negative_warmth_cools_the_image() {
        let pixels = solid([128, 128, 128]);
        let cool = apply_warmth(&pixels, FilterValue::new(-50)).expect("cool");
        let [r, _, b, _] = cool.get_pixel(0, 0).0;
        assert!(b > r, "expected blue > red, got r={r} b={b}");
    }

    #[test]
    fn failed_render_falls_back_to_base() {
        let broken = EncodedImage::new(vec![0xFF_u8, 0xD8, 0xFF, 0x00], ImageFormat::Jpeg, 10, 10);
        let outcome = apply_filters(&broken, &with(FilterKind::Brightness, 10));
        assert!(outcome.fallback_reason.is_some());
        assert!(outcome.image.shares_buffer_with(&broken));
    }

    #[test]
    fn successful_render_has_no_fallback() {
        let base = sample_jpeg(8, 8);
        let outcome = apply_filters(&base, &with(FilterKind::Warmth, 20));
        assert!(outcome.fallback_reason.is_none());
        assert!(!outcome.image.shares_buffer_with(&base));
    }
}
