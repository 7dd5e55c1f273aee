// SPDX-License-Identifier: MPL-2.0
//! Gemini `generateContent` adapter for [`ImageEditService`].
//!
//! The photo travels as base64 inline data next to the instruction text. The
//! first inline image part of the first candidate is the edited photo.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::application::port::{AiEditError, ImageEditService};
use crate::domain::media::EncodedImage;
use crate::media::image::probe;

/// Longest service error body kept in [`AiEditError::Service`].
const MAX_ERROR_BODY_CHARS: usize = 300;

/// Connection settings for the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiSettings {
    /// Base URL up to and excluding `/models`.
    pub endpoint: String,
    pub model: String,
    /// Name of the environment variable holding the key, for error messages.
    pub api_key_env: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl GeminiSettings {
    /// Builds settings, reading the key from `api_key_env`.
    #[must_use]
    pub fn from_env(endpoint: &str, model: &str, api_key_env: &str, timeout: Duration) -> Self {
        let api_key = std::env::var(api_key_env)
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
        Self {
            endpoint: endpoint.to_string(),
            model: model.to_string(),
            api_key_env: api_key_env.to_string(),
            api_key,
            timeout,
        }
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

/// HTTP client for the image-editing model.
#[derive(Debug, Clone)]
pub struct GeminiImageEditor {
    client: reqwest::Client,
    settings: GeminiSettings,
}

impl GeminiImageEditor {
    /// Creates the adapter.
    ///
    /// # Errors
    ///
    /// Returns [`AiEditError::Transport`] if the HTTP client cannot be built.
    pub fn new(settings: GeminiSettings) -> Result<Self, AiEditError> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(concat!("PassPix/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AiEditError::Transport(e.to_string()))?;
        Ok(Self { client, settings })
    }

    #[must_use]
    pub fn settings(&self) -> &GeminiSettings {
        &self.settings
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.settings.api_key.is_some()
    }
}

impl ImageEditService for GeminiImageEditor {
    fn request_edit(
        &self,
        image: &EncodedImage,
        instruction: &str,
    ) -> BoxFuture<'static, Result<EncodedImage, AiEditError>> {
        let client = self.client.clone();
        let settings = self.settings.clone();
        let body = request_body(image, instruction);

        async move {
            let api_key = settings.api_key.clone().ok_or_else(|| {
                AiEditError::NotConfigured(format!("set {} to an API key", settings.api_key_env))
            })?;

            let response = client
                .post(settings.url())
                .header("x-goog-api-key", api_key)
                .timeout(settings.timeout)
                .json(&body)
                .send()
                .await
                .map_err(map_transport)?;

            let status = response.status();
            let bytes = response.bytes().await.map_err(map_transport)?;
            if !status.is_success() {
                let message: String = String::from_utf8_lossy(&bytes)
                    .chars()
                    .take(MAX_ERROR_BODY_CHARS)
                    .collect();
                return Err(AiEditError::Service {
                    status: status.as_u16(),
                    message,
                });
            }
            extract_image(&bytes)
        }
        .boxed()
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

fn map_transport(err: reqwest::Error) -> AiEditError {
    if err.is_timeout() {
        AiEditError::Timeout
    } else {
        AiEditError::Transport(err.to_string())
    }
}

/// JSON payload for one edit.
#[must_use]
pub fn request_body(image: &EncodedImage, instruction: &str) -> Value {
    json!({
        "contents": [{
            "parts": [
                {
                    "inlineData": {
                        "mimeType": image.format().mime_type(),
                        "data": STANDARD.encode(image.bytes()),
                    }
                },
                { "text": instruction }
            ]
        }],
        "generationConfig": {
            "responseModalities": ["TEXT", "IMAGE"]
        }
    })
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
struct InlineData {
    data: String,
}

/// Pulls the first inline image out of a response body.
///
/// # Errors
///
/// Returns [`AiEditError::NoImageReturned`] when no image part exists and
/// [`AiEditError::InvalidImage`] when the part does not decode.
pub fn extract_image(body: &[u8]) -> Result<EncodedImage, AiEditError> {
    let response: GenerateResponse =
        serde_json::from_slice(body).map_err(|e| AiEditError::Transport(e.to_string()))?;
    let data = response
        .candidates
        .into_iter()
        .filter_map(|candidate| candidate.content)
        .flat_map(|content| content.parts)
        .find_map(|part| part.inline_data)
        .ok_or(AiEditError::NoImageReturned)?
        .data;
    let bytes = STANDARD
        .decode(data.trim())
        .map_err(|e| AiEditError::InvalidImage(e.to_string()))?;
    probe(bytes).map_err(|e| AiEditError::InvalidImage(e.to_string()))
}
