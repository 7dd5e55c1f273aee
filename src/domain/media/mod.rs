// SPDX-License-Identifier: MPL-2.0
//! Media domain types.

mod encoded;

pub use encoded::{EncodedImage, ImageFormat};
