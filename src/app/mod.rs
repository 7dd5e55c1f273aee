// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration of the passport photo wizard.
//!
//! [`App`] owns the [`Session`] and every ambient service (localization,
//! configuration, diagnostics, preview cache, AI editor). `App::update`
//! turns a [`Message`] into a list of [`Effect`]s; the [`runtime`] executes
//! them and feeds the resulting messages back.

mod message;
pub mod paths;
pub mod runtime;
mod update;

pub use message::{Effect, Flags, Message};

use std::fmt;
use std::sync::Arc;

use crate::application::port::ImageEditService;
use crate::application::Session;
use crate::config::Config;
use crate::diagnostics::{DiagnosticsCollector, DiagnosticsHandle};
use crate::i18n::I18n;
use crate::media::PreviewCache;

/// How prominent a notification is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// A localized message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

/// Root application state.
pub struct App {
    pub i18n: I18n,
    config: Config,
    session: Session,
    preview_cache: PreviewCache,
    editor: Arc<dyn ImageEditService>,
    diagnostics: DiagnosticsCollector,
    diag: DiagnosticsHandle,
    notifications: Vec<Notification>,
    /// Set while the reset confirmation prompt is showing.
    confirm_reset: bool,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("step", &self.session.step())
            .field("has_photo", &self.session.base().is_some())
            .field("editor", &self.editor.name())
            .finish_non_exhaustive()
    }
}

impl App {
    /// Builds the application from loaded settings.
    ///
    /// `config_warning` is the i18n key returned by [`crate::config::load`]
    /// when the settings file could not be read.
    pub fn new(
        config: Config,
        i18n: I18n,
        editor: Arc<dyn ImageEditService>,
        config_warning: Option<String>,
    ) -> Self {
        let session = Session::new(
            config.print.standard(),
            config.print.layout(),
            config.print.format(),
        );
        let diagnostics = DiagnosticsCollector::default();
        let diag = diagnostics.handle();
        let mut app = Self {
            preview_cache: PreviewCache::new(config.editor.preview_cache_entries()),
            i18n,
            config,
            session,
            editor,
            diagnostics,
            diag,
            notifications: Vec::new(),
            confirm_reset: false,
        };
        if let Some(key) = config_warning {
            app.diag.log_warning(crate::diagnostics::WarningEvent::new(
                crate::diagnostics::WarningType::ConfigurationIssue,
                key.clone(),
            ));
            app.notify(Severity::Warning, &key);
        }
        app
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn editor(&self) -> Arc<dyn ImageEditService> {
        Arc::clone(&self.editor)
    }

    #[must_use]
    pub fn preview_cache(&self) -> &PreviewCache {
        &self.preview_cache
    }

    /// Localized status line text, if any.
    #[must_use]
    pub fn status_text(&self) -> Option<String> {
        let message = self.session.status().message.as_ref()?;
        Some(self.i18n.tr_with_args(message.i18n_key(), &message.args()))
    }

    /// The confirmation question while a reset is pending.
    #[must_use]
    pub fn confirmation_prompt(&self) -> Option<String> {
        self.confirm_reset.then(|| self.i18n.tr("confirm-reset"))
    }

    /// Returns and clears pending notifications.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Drains pending diagnostic events and returns the collector.
    pub fn diagnostics(&mut self) -> &DiagnosticsCollector {
        self.diagnostics.process_pending();
        &self.diagnostics
    }

    fn notify(&mut self, severity: Severity, key: &str) {
        let message = self.i18n.tr(key);
        self.notifications.push(Notification { severity, message });
    }

    fn notify_with_args(&mut self, severity: Severity, key: &str, args: &[(&str, &str)]) {
        let message = self.i18n.tr_with_args(key, args);
        self.notifications.push(Notification { severity, message });
    }
}
