// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port`.
//!
//! # Available Adapters
//!
//! - [`gemini`]: AI image editing over HTTP (implements [`ImageEditService`])
//!
//! [`ImageEditService`]: crate::application::port::ImageEditService

pub mod gemini;

pub use gemini::{GeminiImageEditor, GeminiSettings};
