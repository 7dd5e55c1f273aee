// SPDX-License-Identifier: MPL-2.0
//! `passpix` turns a portrait into print-ready passport photos.
//!
//! The wizard runs upload → edit → print. Editing covers framing, color
//! filters with undo/redo, and AI background or outfit replacement. Printing
//! tiles the framed photo onto an A4 sheet or a single page and exports it as
//! JPG, PNG, PDF or a self-printing HTML document.

#![doc(html_root_url = "https://docs.rs/passpix/0.1.0")]

pub mod app;
pub mod application;
pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod infrastructure;
pub mod media;

#[cfg(test)]
mod test_utils;
