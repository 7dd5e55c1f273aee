// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons and image fixtures.

pub use approx::assert_abs_diff_eq;

use image_rs::{Rgba, RgbaImage};

use crate::domain::media::EncodedImage;
use crate::media::image::{encode_jpeg, encode_png, PREVIEW_JPEG_QUALITY};

/// Gradient pixels so that filters have something visible to change.
pub fn gradient(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let r = u8::try_from(x * 255 / width.max(1)).unwrap_or(u8::MAX);
        let g = u8::try_from(y * 255 / height.max(1)).unwrap_or(u8::MAX);
        Rgba([r, g, 128, 255])
    })
}

/// JPEG fixture with a gradient.
pub fn sample_jpeg(width: u32, height: u32) -> EncodedImage {
    encode_jpeg(&gradient(width, height), PREVIEW_JPEG_QUALITY).expect("encode jpeg fixture")
}

/// PNG fixture with a gradient.
pub fn sample_png(width: u32, height: u32) -> EncodedImage {
    encode_png(&gradient(width, height)).expect("encode png fixture")
}
