// SPDX-License-Identifier: MPL-2.0
//! AI image-editing port definition.
//!
//! This module defines the [`ImageEditService`] trait for the external
//! service that rewrites a photo from a natural-language instruction, plus
//! the [`EditRequest`] presets that produce those instructions.
//!
//! # Design Notes
//!
//! - The call returns a boxed `'static` future so the runtime can spawn it
//! - Latency is unbounded and the outcome is binary (image or error)
//! - The trait is `Send + Sync` so one adapter can be shared across requests

use std::fmt;

use futures_util::future::BoxFuture;

use crate::domain::media::EncodedImage;
use crate::domain::presets::{BackgroundChoice, OutfitPreset};
use crate::domain::status::StatusMessage;

// =============================================================================
// AiEditError
// =============================================================================

/// Errors that can occur during an AI edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AiEditError {
    /// No credentials or endpoint are configured for the service.
    NotConfigured(String),

    /// The request could not be sent or the connection failed.
    Transport(String),

    /// The service answered with a non-success status.
    Service {
        /// HTTP status code.
        status: u16,
        /// Response body or reason phrase.
        message: String,
    },

    /// The request did not finish in time.
    Timeout,

    /// The response contained no image part.
    NoImageReturned,

    /// The returned image could not be decoded.
    InvalidImage(String),
}

impl fmt::Display for AiEditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AiEditError::NotConfigured(msg) => write!(f, "AI service is not configured: {msg}"),
            AiEditError::Transport(msg) => write!(f, "AI request failed: {msg}"),
            AiEditError::Service { status, message } => {
                write!(f, "AI service returned {status}: {message}")
            }
            AiEditError::Timeout => write!(f, "AI request timed out"),
            AiEditError::NoImageReturned => write!(f, "AI response contained no image"),
            AiEditError::InvalidImage(msg) => write!(f, "AI returned an unreadable image: {msg}"),
        }
    }
}

impl std::error::Error for AiEditError {}

// =============================================================================
// EditRequest
// =============================================================================

/// A preset-driven AI edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditRequest {
    /// Replace the background with a flat color.
    Background(BackgroundChoice),
    /// Replace the clothing below the neck.
    Outfit(&'static OutfitPreset),
}

impl EditRequest {
    /// Instruction text sent along with the image.
    #[must_use]
    pub fn instruction(&self) -> String {
        match self {
            EditRequest::Background(choice) => format!(
                "Replace the background with a flat solid color matching this hex code: {}. \
                 Ensure the background is uniform and clean. Do not add any text, labels, or \
                 color codes to the image. Keep the person exactly the same.",
                choice.hex()
            ),
            EditRequest::Outfit(outfit) => format!(
                "Change the person's clothing to {}. Keep the face, head, hair and identity \
                 exactly the same. Only change the outfit below the neck. Do not add any text \
                 or labels.",
                outfit.prompt.trim_end().trim_end_matches('.')
            ),
        }
    }

    /// Status shown while the edit is in flight.
    #[must_use]
    pub fn status_message(&self) -> StatusMessage {
        match self {
            EditRequest::Background(choice) => StatusMessage::ApplyingBackground {
                name: choice.display_name().to_string(),
            },
            EditRequest::Outfit(outfit) => StatusMessage::TryingOutfit {
                label: outfit.label.to_string(),
            },
        }
    }

    /// Short tag for diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            EditRequest::Background(_) => "background",
            EditRequest::Outfit(_) => "outfit",
        }
    }
}

// =============================================================================
// ImageEditService Trait
// =============================================================================

/// Port for the external image-editing model.
///
/// Infrastructure adapters implement this trait over HTTP; tests implement
/// it in memory.
pub trait ImageEditService: Send + Sync {
    /// Sends `image` and `instruction` and resolves to the edited image.
    ///
    /// # Errors
    ///
    /// The future resolves to an [`AiEditError`] if the service is not
    /// configured, the request fails, or no usable image comes back.
    fn request_edit(
        &self,
        image: &EncodedImage,
        instruction: &str,
    ) -> BoxFuture<'static, Result<EncodedImage, AiEditError>>;

    /// Human-readable adapter name for diagnostics.
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::presets::{find_background, find_outfit};
    use crate::test_utils::sample_png;
    use futures_util::FutureExt;
    use std::sync::{Arc, Mutex};

    #[test]
    fn background_instruction_embeds_hex() {
        let request = EditRequest::Background(BackgroundChoice::Preset(
            find_background("Light Blue").expect("preset"),
        ));
        let text = request.instruction();
        assert!(text.starts_with(
            "Replace the background with a flat solid color matching this hex code: #E0F2FE."
        ));
        assert!(text.ends_with("Keep the person exactly the same."));
        assert_eq!(
            request.status_message(),
            StatusMessage::ApplyingBackground {
                name: "Light Blue".into()
            }
        );
    }

    #[test]
    fn custom_background_is_announced_generically() {
        let request = EditRequest::Background("#102030".parse().expect("custom"));
        assert!(request.instruction().contains("hex code: #102030."));
        assert_eq!(
            request.status_message(),
            StatusMessage::ApplyingBackground {
                name: "Custom Color".into()
            }
        );
    }

    #[test]
    fn outfit_instruction_does_not_double_the_period() {
        let request = EditRequest::Outfit(find_outfit("m_suit_navy").expect("outfit"));
        let text = request.instruction();
        assert!(text.starts_with(
            "Change the person's clothing to Wear a professional navy blue business suit, \
             white shirt, and blue tie. Keep the face"
        ));
        assert!(!text.contains(".."));
        assert_eq!(request.kind(), "outfit");
    }

    #[test]
    fn ai_error_display() {
        let err = AiEditError::Service {
            status: 429,
            message: "quota".into(),
        };
        assert_eq!(err.to_string(), "AI service returned 429: quota");
        assert_eq!(AiEditError::Timeout.to_string(), "AI request timed out");
    }

    struct Recorder {
        seen: Arc<Mutex<Vec<String>>>,
    }

    impl ImageEditService for Recorder {
        fn request_edit(
            &self,
            image: &EncodedImage,
            instruction: &str,
        ) -> BoxFuture<'static, Result<EncodedImage, AiEditError>> {
            self.seen.lock().expect("lock").push(instruction.to_string());
            let image = image.clone();
            async move { Ok(image) }.boxed()
        }

        fn name(&self) -> &'static str {
            "recorder"
        }
    }

    #[tokio::test]
    async fn service_is_usable_as_trait_object() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let service: Arc<dyn ImageEditService> = Arc::new(Recorder { seen: seen.clone() });
        let image = sample_png(2, 2);
        let edited = service.request_edit(&image, "make it blue").await.expect("edit");
        assert!(edited.shares_buffer_with(&image));
        assert_eq!(seen.lock().expect("lock").as_slice(), ["make it blue"]);
    }
}
