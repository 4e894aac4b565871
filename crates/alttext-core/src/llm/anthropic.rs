//! Anthropic Claude provider using the Messages API.
//!
//! Sends image + prompt via the Messages API with a base64 image content block.

use super::provider::{build_prompt, AltTextClient, ClientSettings, ImageInput, ProviderKind};
use super::transport;
use crate::error::{ProviderError, ProviderResult};
use crate::sanitize::sanitize;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Messages API version sent as `anthropic-version`.
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Output token budget for a single alt-text answer.
const MAX_TOKENS: u32 = 1024;

/// Claude provider using the Messages API.
pub struct AnthropicClient {
    http: reqwest::Client,
    settings: ClientSettings,
    endpoint: String,
    available: bool,
}

impl AnthropicClient {
    pub fn new(http: reqwest::Client, settings: ClientSettings) -> Self {
        let endpoint = settings.endpoint("v1/messages");
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

    fn request_body(&self, prompt: &str, image: &ImageInput) -> MessagesRequest {
        MessagesRequest {
            model: self.settings.model.clone(),
            max_tokens: MAX_TOKENS,
            messages: vec![Message {
                role: "user".to_string(),
                content: vec![
                    ContentBlock::Image {
                        source: ImageSource {
                            source_type: "base64".to_string(),
                            media_type: image.media_type.to_string(),
                            data: image.data.clone(),
                        },
                    },
                    ContentBlock::Text {
                        text: prompt.to_string(),
                    },
                ],
            }],
        }
    }

    /// Extract and sanitize `content[0].text` from a response body.
    pub(crate) fn parse_alt_text(body: &str) -> ProviderResult<String> {
        let kind = ProviderKind::Claude;
        let messages_resp: MessagesResponse = transport::parse_json(kind, body)?;

        let text = messages_resp
            .content
            .into_iter()
            .next()
            .and_then(|c| c.text)
            .ok_or_else(|| transport::missing_field(kind, "content[0].text", body))?;

        tracing::debug!(provider = %kind, "Claude raw response: {text}");

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
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct Message {
    role: String,
    content: Vec<ContentBlock>,
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum ContentBlock {
    #[serde(rename = "image")]
    Image { source: ImageSource },
    #[serde(rename = "text")]
    Text { text: String },
}

#[derive(Serialize)]
struct ImageSource {
    #[serde(rename = "type")]
    source_type: String,
    media_type: String,
    data: String,
}

// --- Response types ---

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ResponseContent>,
}

#[derive(Deserialize)]
struct ResponseContent {
    text: Option<String>,
}

#[async_trait]
impl AltTextClient for AnthropicClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Claude
    }

    fn is_available(&self) -> bool {
        self.available
    }

    async fn build_alt_text(&self, image: &[u8], locale: Option<&str>) -> ProviderResult<String> {
        if !self.available {
            return Err(ProviderError::CredentialMissing {
                provider: ProviderKind::Claude,
            });
        }

        let prompt = build_prompt(locale);
        tracing::info!(provider = "claude", model = %self.settings.model, "Claude prompt: {prompt}");

        let image = ImageInput::jpeg(image);
        let body = self.request_body(&prompt, &image);
        tracing::debug!(
            provider = "claude",
            endpoint = %self.endpoint,
            image_bytes = image.byte_len,
            "Claude request (image data omitted)"
        );

        let mut request = self.http.post(&self.endpoint);
        for (name, value) in &self.settings.headers {
            request = request.header(name, value);
        }
        let request = request
            .header("x-api-key", &self.settings.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .timeout(self.settings.timeout);

        let raw = transport::send(ProviderKind::Claude, request).await?;
        Self::parse_alt_text(&raw)
    }
}
