// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that infrastructure adapters implement.
//! These traits use only domain types, ensuring the application layer remains
//! independent of concrete implementations.
//!
//! # Available Ports
//!
//! - [`image_edit`]: AI image editing (background and outfit replacement)
//!
//! # Example
//!
//! ```ignore
//! use passpix::application::port::{EditRequest, ImageEditService};
//! use passpix::domain::media::EncodedImage;
//!
//! async fn whiten(service: &dyn ImageEditService, photo: &EncodedImage) {
//!     let request = EditRequest::Background("#FFFFFF".parse().unwrap());
//!     let edited = service.request_edit(photo, &request.instruction()).await;
//! }
//! ```

pub mod image_edit;

pub use image_edit::{AiEditError, EditRequest, ImageEditService};
