//! OpenAI provider using the Chat Completions API.
//!
//! Sends the prompt and the image (as a data URL) in a single user message.
//! Also serves as the wire client for OpenAI-compatible endpoints such as
//! OpenRouter.

use super::provider::{build_prompt, AltTextClient, ClientSettings, ImageInput, ProviderKind};
use super::transport;
use crate::error::{ProviderError, ProviderResult};
use crate::sanitize::sanitize;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// OpenAI provider using the Chat Completions API.
pub struct OpenAiClient {
    kind: ProviderKind,
    http: reqwest::Client,
    settings: ClientSettings,
    endpoint: String,
    available: bool,
}

impl OpenAiClient {
    pub fn new(http: reqwest::Client, settings: ClientSettings) -> Self {
        Self::for_provider(ProviderKind::OpenAi, http, settings)
    }

    /// Create a Chat Completions client reporting as another provider.
    pub(crate) fn for_provider(
        kind: ProviderKind,
        http: reqwest::Client,
        settings: ClientSettings,
    ) -> Self {
        let endpoint = settings.endpoint("chat/completions");
        let available = !settings.api_key.trim().is_empty();
        Self {
            kind,
            http,
            settings,
            endpoint,
            available,
        }
    }

    /// Send `OpenAI-Organization`; empty values are ignored.
    pub fn with_organization(mut self, organization: &str) -> Self {
        if !organization.is_empty() {
            self.settings
                .headers
                .insert("OpenAI-Organization".to_string(), organization.to_string());
        }
        self
    }

    /// Send `OpenAI-Project`; empty values are ignored.
    pub fn with_project(mut self, project: &str) -> Self {
        if !project.is_empty() {
            self.settings
                .headers
                .insert("OpenAI-Project".to_string(), project.to_string());
        }
        self
    }

    pub fn model(&self) -> &str {
        &self.settings.model
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.settings.headers
    }

    fn request_body(&self, prompt: &str, image: &ImageInput) -> ChatRequest {
        ChatRequest {
            model: self.settings.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: vec![
                    ChatContent::Text {
                        text: prompt.to_string(),
                    },
                    ChatContent::ImageUrl {
                        image_url: ImageUrl {
                            url: image.data_url(),
                        },
                    },
                ],
            }],
        }
    }

    /// Extract and sanitize `choices[0].message.content` from a response body.
    pub(crate) fn parse_alt_text(kind: ProviderKind, body: &str) -> ProviderResult<String> {
        let chat_resp: ChatResponse = transport::parse_json(kind, body)?;

        if let Some(usage) = &chat_resp.usage {
            tracing::debug!(
                provider = %kind,
                model = chat_resp.model.as_deref().unwrap_or_default(),
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                total_tokens = usage.total_tokens,
                "{} usage",
                kind.display_name()
            );
        }

        let text = chat_resp
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| transport::missing_field(kind, "choices[0].message.content", body))?;

        tracing::debug!(provider = %kind, "{} raw response: {text}", kind.display_name());

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
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: Vec<ChatContent>,
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum ChatContent {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "image_url")]
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

// --- Response types ---

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    model: Option<String>,
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}

#[async_trait]
impl AltTextClient for OpenAiClient {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    fn is_available(&self) -> bool {
        self.available
    }

    async fn build_alt_text(&self, image: &[u8], locale: Option<&str>) -> ProviderResult<String> {
        if !self.available {
            return Err(ProviderError::CredentialMissing {
                provider: self.kind,
            });
        }

        let prompt = build_prompt(locale);
        tracing::info!(provider = %self.kind, model = %self.settings.model, "{} prompt: {prompt}", self.kind.display_name());

        let image = ImageInput::jpeg(image);
        let body = self.request_body(&prompt, &image);
        let header_names: Vec<&String> = self.settings.headers.keys().collect();
        tracing::debug!(
            provider = %self.kind,
            endpoint = %self.endpoint,
            headers = ?header_names,
            image_bytes = image.byte_len,
            "{} request (image data omitted)",
            self.kind.display_name()
        );

        let mut request = self.http.post(&self.endpoint);
        for (name, value) in &self.settings.headers {
            request = request.header(name, value);
        }
        let request = request
            .bearer_auth(&self.settings.api_key)
            .json(&body)
            .timeout(self.settings.timeout);

        let raw = transport::send(self.kind, request).await?;
        Self::parse_alt_text(self.kind, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(api_key: &str) -> OpenAiClient {
        OpenAiClient::new(
            reqwest::Client::new(),
            ClientSettings::new(ProviderKind::OpenAi, api_key),
        )
    }

    #[test]
    fn test_availability_follows_api_key() {
        assert!(client("sk-test").is_available());
        assert!(!client("").is_available());
        assert!(!client("   ").is_available());
    }

    #[test]
    fn test_name_and_default_model() {
        let client = client("sk-test");
        assert_eq!(client.name(), "OpenAI");
        assert_eq!(client.model(), "gpt-4o-mini");
        assert_eq!(client.endpoint(), "https://api.openai.com/v1/chat/completions");
    }

    #[test]
    fn test_request_body_shape() {
        let client = client("sk-test");
        let image = ImageInput::jpeg(&[1, 2, 3]);
        let body = serde_json::to_value(client.request_body("Describe.", &image)).unwrap();

        assert_eq!(body["model"], "gpt-4o-mini");
        let message = &body["messages"][0];
        assert_eq!(message["role"], "user");
        assert_eq!(message["content"][0]["type"], "text");
        assert_eq!(message["content"][0]["text"], "Describe.");
        assert_eq!(message["content"][1]["type"], "image_url");
        assert_eq!(
            message["content"][1]["image_url"]["url"],
            "data:image/jpeg;base64,AQID"
        );
    }

    #[test]
    fn test_organization_and_project_headers() {
        let client = client("sk-test").with_organization("org-1").with_project("");
        assert_eq!(
            client.headers().get("OpenAI-Organization"),
            Some(&"org-1".to_string())
        );
        assert!(!client.headers().contains_key("OpenAI-Project"));
    }

    #[test]
    fn test_parse_success() {
        let body = r#"{
            "model": "gpt-4o-mini",
            "choices": [{"message": {"role": "assistant", "content": "**Alt-Text:** A red bicycle. *(3 words)*"}}],
            "usage": {"prompt_tokens": 100, "completion_tokens": 5, "total_tokens": 105}
        }"#;
        let text = OpenAiClient::parse_alt_text(ProviderKind::OpenAi, body).unwrap();
        assert_eq!(text, "A red bicycle.");
    }

    #[test]
    fn test_parse_empty_choices() {
        let err = OpenAiClient::parse_alt_text(ProviderKind::OpenAi, r#"{"choices": []}"#)
            .unwrap_err();
        assert!(matches!(err, ProviderError::UnexpectedResponse { .. }));
        assert!(err.to_string().contains("choices[0].message.content"));
    }

    #[test]
    fn test_parse_null_content() {
        let body = r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#;
        let err = OpenAiClient::parse_alt_text(ProviderKind::OpenAi, body).unwrap_err();
        assert!(matches!(err, ProviderError::UnexpectedResponse { .. }));
    }

    #[test]
    fn test_parse_error_tagged_with_provider() {
        let err = OpenAiClient::parse_alt_text(ProviderKind::OpenRouter, "{}").unwrap_err();
        assert_eq!(err.provider(), Some(ProviderKind::OpenRouter));
    }

    #[test]
    fn test_parse_whitespace_only_content() {
        let body = r#"{"choices": [{"message": {"content": "  *(0 words)*  "}}]}"#;
        let err = OpenAiClient::parse_alt_text(ProviderKind::OpenAi, body).unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[tokio::test]
    async fn test_unavailable_client_rejects_call() {
        let err = client("").build_alt_text(&[1, 2, 3], None).await.unwrap_err();
        assert!(matches!(
            err,
            ProviderError::CredentialMissing {
                provider: ProviderKind::OpenAi
            }
        ));
    }
}
