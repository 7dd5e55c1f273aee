// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for the application.
//!
//! This module provides localization capabilities using the Fluent localization system.
//! It handles language detection, translation file loading, and string formatting.
//!
//! # Features
//!
//! - Automatic locale detection from CLI, config, or system settings
//! - Embedded `.ftl` translation files
//! - Named arguments for status and error messages
//! - `MISSING: <key>` marker when a translation is absent

pub mod fluent;

pub use fluent::{I18n, DEFAULT_LOCALE};
