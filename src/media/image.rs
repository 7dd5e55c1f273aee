// SPDX-License-Identifier: MPL-2.0
//! Decoding and encoding of [`EncodedImage`] buffers.
//!
//! Pixels are only materialized while a render runs; everything that is
//! stored in the session stays encoded.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image_rs::codecs::jpeg::JpegEncoder;
use image_rs::{DynamicImage, ImageDecoder, ImageReader, Rgb, RgbImage, Rgba, RgbaImage};
use tiny_skia::{ColorU8, Pixmap};

use crate::domain::media::{EncodedImage, ImageFormat};
use crate::error::{Error, Result};

/// JPEG quality for filtered previews.
pub const PREVIEW_JPEG_QUALITY: u8 = 95;

/// JPEG quality for rendered print sheets.
pub const SHEET_JPEG_QUALITY: u8 = 90;

/// Maps a codec format onto the formats the editor keeps.
#[must_use]
pub fn format_from_codec(format: image_rs::ImageFormat) -> Option<ImageFormat> {
    match format {
        image_rs::ImageFormat::Jpeg => Some(ImageFormat::Jpeg),
        image_rs::ImageFormat::Png => Some(ImageFormat::Png),
        image_rs::ImageFormat::WebP => Some(ImageFormat::Webp),
        image_rs::ImageFormat::Gif => Some(ImageFormat::Gif),
        image_rs::ImageFormat::Bmp => Some(ImageFormat::Bmp),
        image_rs::ImageFormat::Tiff => Some(ImageFormat::Tiff),
        _ => None,
    }
}

/// Decodes bytes, honoring EXIF orientation.
///
/// # Errors
///
/// Returns [`Error::Image`] if the container is unknown or the pixels
/// cannot be decoded.
pub fn decode_bytes(bytes: &[u8]) -> Result<DynamicImage> {
    let reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
    let mut decoder = reader.into_decoder()?;
    let orientation = decoder.orientation()?;
    let mut image = DynamicImage::from_decoder(decoder)?;
    image.apply_orientation(orientation);
    Ok(image)
}

/// Decodes an [`EncodedImage`].
///
/// # Errors
///
/// See [`decode_bytes`].
pub fn decode(image: &EncodedImage) -> Result<DynamicImage> {
    decode_bytes(image.bytes())
}

/// Wraps bytes as an [`EncodedImage`] after checking they decode.
///
/// Width and height are reported after orientation is applied.
///
/// # Errors
///
/// Returns [`Error::Image`] for unsupported containers or corrupt data.
pub fn probe(bytes: Vec<u8>) -> Result<EncodedImage> {
    let codec_format = image_rs::guess_format(&bytes)?;
    let format = format_from_codec(codec_format)
        .ok_or_else(|| Error::Image(format!("unsupported image format {codec_format:?}")))?;
    let decoded = decode_bytes(&bytes)?;
    Ok(EncodedImage::new(
        bytes,
        format,
        decoded.width(),
        decoded.height(),
    ))
}

/// Composites RGBA pixels over white, dropping alpha.
#[must_use]
pub fn flatten_on_white(image: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let Rgba([r, g, b, a]) = *image.get_pixel(x, y);
        let alpha = u16::from(a);
        let over = |channel: u8| {
            let blended = (u16::from(channel) * alpha + 255 * (255 - alpha) + 127) / 255;
            u8::try_from(blended).unwrap_or(u8::MAX)
        };
        Rgb([over(r), over(g), over(b)])
    })
}

/// Encodes RGBA pixels as JPEG at the given quality (1-100).
///
/// # Errors
///
/// Returns [`Error::Image`] if encoding fails.
pub fn encode_jpeg(image: &RgbaImage, quality: u8) -> Result<EncodedImage> {
    let rgb = flatten_on_white(image);
    let mut buffer = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100));
    encoder.encode_image(&rgb)?;
    Ok(EncodedImage::new(
        buffer,
        ImageFormat::Jpeg,
        rgb.width(),
        rgb.height(),
    ))
}

/// Encodes RGBA pixels as PNG.
///
/// # Errors
///
/// Returns [`Error::Image`] if encoding fails.
pub fn encode_png(image: &RgbaImage) -> Result<EncodedImage> {
    let mut cursor = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(image.clone()).write_to(&mut cursor, image_rs::ImageFormat::Png)?;
    Ok(EncodedImage::new(
        cursor.into_inner(),
        ImageFormat::Png,
        image.width(),
        image.height(),
    ))
}

/// Renders the image as a `data:` URL.
#[must_use]
pub fn to_data_url(image: &EncodedImage) -> String {
    format!(
        "data:{};base64,{}",
        image.format().mime_type(),
        STANDARD.encode(image.bytes())
    )
}

/// Copies straight-alpha pixels into a premultiplied pixmap.
///
/// Returns `None` for zero-sized images.
#[must_use]
pub fn to_pixmap(image: &RgbaImage) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(image.width(), image.height())?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
        let Rgba([r, g, b, a]) = *src;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Some(pixmap)
}

/// Copies a premultiplied pixmap back into straight-alpha pixels.
#[must_use]
pub fn from_pixmap(pixmap: &Pixmap) -> RgbaImage {
    let mut image = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in image.pixels_mut().zip(pixmap.pixels()) {
        let color = src.demultiply();
        *dst = Rgba([color.red(), color.green(), color.blue(), color.alpha()]);
    }
    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{sample_jpeg, sample_png};

    #[test]
    fn probe_reports_format_and_dimensions() {
        let png = sample_png(6, 4);
        let image = probe(png.bytes().to_vec()).expect("probe png");
        assert_eq!(image.format(), ImageFormat::Png);
        assert_eq!((image.width(), image.height()), (6, 4));
    }

    #[test]
    fn probe_rejects_garbage() {
        let err = probe(b"definitely not an image".to_vec()).unwrap_err();
        assert!(matches!(err, Error::Image(_)));
    }

    #[test]
    fn jpeg_encoding_produces_decodable_output() {
        let pixels = RgbaImage::from_pixel(8, 8, Rgba([200, 40, 10, 255]));
        let encoded = encode_jpeg(&pixels, PREVIEW_JPEG_QUALITY).expect("encode jpeg");
        assert_eq!(encoded.format(), ImageFormat::Jpeg);
        let decoded = decode(&encoded).expect("decode jpeg");
        assert_eq!((decoded.width(), decoded.height()), (8, 8));
    }

    #[test]
    fn flatten_composites_transparent_pixels_over_white() {
        let pixels = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 0]));
        assert_eq!(*flatten_on_white(&pixels).get_pixel(0, 0), Rgb([255, 255, 255]));

        let opaque = RgbaImage::from_pixel(1, 1, Rgba([10, 20, 30, 255]));
        assert_eq!(*flatten_on_white(&opaque).get_pixel(0, 0), Rgb([10, 20, 30]));
    }

    #[test]
    fn pixmap_conversion_preserves_opaque_pixels() {
        let mut pixels = RgbaImage::new(3, 2);
        pixels.put_pixel(0, 0, Rgba([1, 2, 3, 255]));
        pixels.put_pixel(2, 1, Rgba([250, 128, 7, 255]));
        let pixmap = to_pixmap(&pixels).expect("pixmap");
        assert_eq!(from_pixmap(&pixmap), pixels);
    }

    #[test]
    fn data_url_carries_mime_type() {
        let jpeg = sample_jpeg(2, 2);
        let url = to_data_url(&jpeg);
        assert!(url.starts_with("data:image/jpeg;base64,"));
        assert!(url.len() > "data:image/jpeg;base64,".len());
    }
}
