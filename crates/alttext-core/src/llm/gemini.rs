//! Google Gemini provider using the `generateContent` API.
//!
//! The model name is part of the URL and the API key travels as the `key`
//! query parameter rather than a header.

use super::provider::{build_prompt, AltTextClient, ClientSettings, ImageInput, ProviderKind};
use super::transport;
use crate::error::{ProviderError, ProviderResult};
use crate::sanitize::sanitize;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Gemini provider using `models/{model}:generateContent`.
pub struct GeminiClient {
    http: reqwest::Client,
    settings: ClientSettings,
    endpoint: String,
    available: bool,
}

impl GeminiClient {
    pub fn new(http: reqwest::Client, settings: ClientSettings) -> Self {
        let endpoint = settings.endpoint(&format!(
            "v1beta/models/{}:generateContent",
            settings.model
        ));
        let available = !settings.api_key.trim().is_empty();
        Self {
            http,
            settings,
            endpoint,
            available,
        }
    }

    pub fn model(&self) -> &str {
        &self.settings.model
    }

    /// Request URL without the key query parameter.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request_body(&self, prompt: &str, image: &ImageInput) -> GenerateRequest {
        GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text {
                        text: prompt.to_string(),
                    },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: image.media_type.to_string(),
                            data: image.data.clone(),
                        },
                    },
                ],
            }],
        }
    }

    /// Extract and sanitize `candidates[0].content.parts[0].text` from a response body.
    pub(crate) fn parse_alt_text(body: &str) -> ProviderResult<String> {
        let kind = ProviderKind::Gemini;
        let generate_resp: GenerateResponse = transport::parse_json(kind, body)?;

        let text = generate_resp
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .ok_or_else(|| {
                transport::missing_field(kind, "candidates[0].content.parts[0].text", body)
            })?;

        tracing::debug!(provider = %kind, "Gemini raw response: {text}");

        let cleaned = sanitize(&text);
        if cleaned.is_empty() {
            return Err(transport::unexpected(
                kind,
                "response text is empty after cleanup".to_string(),
            ));
        }
        Ok(cleaned)
    }
}

// --- Request types ---

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

// --- Response types ---

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[async_trait]
impl AltTextClient for GeminiClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    fn is_available(&self) -> bool {
        self.available
    }

    async fn build_alt_text(&self, image: &[u8], locale: Option<&str>) -> ProviderResult<String> {
        if !self.available {
            return Err(ProviderError::CredentialMissing {
                provider: ProviderKind::Gemini,
            });
        }

        let prompt = build_prompt(locale);
        tracing::info!(provider = "gemini", model = %self.settings.model, "Gemini prompt: {prompt}");

        let image = ImageInput::jpeg(image);
        let body = self.request_body(&prompt, &image);
        tracing::debug!(
            provider = "gemini",
            endpoint = %self.endpoint,
            image_bytes = image.byte_len,
            "Gemini request (image data omitted)"
        );

        let mut request = self.http.post(&self.endpoint);
        for (name, value) in &self.settings.headers {
            request = request.header(name, value);
        }
        let request = request
            .query(&[("key", self.settings.api_key.as_str())])
            .json(&body)
            .timeout(self.settings.timeout);

        let raw = transport::send(ProviderKind::Gemini, request).await?;
        Self::parse_alt_text(&raw)
    }
}
