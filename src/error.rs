// SPDX-License-Identifier: MPL-2.0
use std::fmt;

use crate::application::port::AiEditError;
use crate::domain::wizard::InvalidTransition;
use crate::media::export::ExportError;
use crate::media::layout::LayoutError;
use crate::media::upload::UploadError;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    /// Decoding or encoding pixels failed.
    Image(String),
    Upload(UploadError),
    Layout(LayoutError),
    Export(ExportError),
    AiEdit(AiEditError),
    Transition(InvalidTransition),
}

impl Error {
    /// Returns the i18n message key for errors shown to the user.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            Error::Io(_) => "error-io",
            Error::Config(_) => "notification-config-load-error",
            Error::Image(_) => "error-image-decode",
            Error::Upload(err) => err.i18n_key(),
            Error::Layout(err) => err.i18n_key(),
            Error::Export(err) => err.i18n_key(),
            Error::AiEdit(_) => "status-ai-failed",
            Error::Transition(_) => "error-invalid-step",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Image(e) => write!(f, "Image Error: {}", e),
            Error::Upload(e) => write!(f, "Upload Error: {}", e),
            Error::Layout(e) => write!(f, "Layout Error: {}", e),
            Error::Export(e) => write!(f, "Export Error: {}", e),
            Error::AiEdit(e) => write!(f, "AI Edit Error: {}", e),
            Error::Transition(e) => write!(f, "Wizard Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<UploadError> for Error {
    fn from(err: UploadError) -> Self {
        Error::Upload(err)
    }
}

impl From<LayoutError> for Error {
    fn from(err: LayoutError) -> Self {
        Error::Layout(err)
    }
}

impl From<ExportError> for Error {
    fn from(err: ExportError) -> Self {
        Error::Export(err)
    }
}

impl From<AiEditError> for Error {
    fn from(err: AiEditError) -> Self {
        Error::AiEdit(err)
    }
}

impl From<InvalidTransition> for Error {
    fn from(err: InvalidTransition) -> Self {
        Error::Transition(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        Error::Image(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::wizard::{WizardAction, WizardStep};

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn upload_error_keeps_its_i18n_key() {
        let err: Error = UploadError::NotAnImage.into();
        assert!(matches!(err, Error::Upload(UploadError::NotAnImage)));
        assert_eq!(err.i18n_key(), "error-upload-not-image");
    }

    #[test]
    fn layout_error_converts() {
        let err: Error = LayoutError::PhotoTooLarge {
            width_mm: 300.0,
            height_mm: 45.0,
        }
        .into();
        assert_eq!(err.i18n_key(), "error-layout-photo-too-large");
        assert!(format!("{}", err).starts_with("Layout Error:"));
    }

    #[test]
    fn transition_error_mentions_step() {
        let err: Error = InvalidTransition {
            from: WizardStep::Upload,
            action: WizardAction::Next,
        }
        .into();
        assert!(format!("{}", err).contains("upload"));
    }

    #[test]
    fn ai_error_maps_to_retry_message_key() {
        let err: Error = AiEditError::NoImageReturned.into();
        assert_eq!(err.i18n_key(), "status-ai-failed");
    }
}
