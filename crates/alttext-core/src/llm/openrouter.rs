//! OpenRouter provider (OpenAI-compatible API).
//!
//! OpenRouter uses the same Chat Completions format as OpenAI, so this
//! delegates to `OpenAiClient` with the OpenRouter endpoint plus the
//! referer and title headers OpenRouter uses to identify the calling app.

use super::openai::OpenAiClient;
use super::provider::{AltTextClient, ClientSettings, ProviderKind};
use crate::error::ProviderResult;
use async_trait::async_trait;

const REFERER_HEADER: &str = "HTTP-Referer";
const TITLE_HEADER: &str = "X-Title";

/// OpenRouter provider wrapping an OpenAI-compatible client.
pub struct OpenRouterClient {
    inner: OpenAiClient,
}

impl OpenRouterClient {
    /// `site_url` is sent as `HTTP-Referer`, `app_title` as `X-Title`.
    ///
    /// Both override same-named entries in the configured extra headers.
    pub fn new(
        http: reqwest::Client,
        mut settings: ClientSettings,
        site_url: &str,
        app_title: &str,
    ) -> Self {
        settings.headers.retain(|name, _| {
            !name.eq_ignore_ascii_case(REFERER_HEADER) && !name.eq_ignore_ascii_case(TITLE_HEADER)
        });
        settings
            .headers
            .insert(REFERER_HEADER.to_string(), site_url.to_string());
        settings
            .headers
            .insert(TITLE_HEADER.to_string(), app_title.to_string());
        Self {
            inner: OpenAiClient::for_provider(ProviderKind::OpenRouter, http, settings),
        }
    }

    pub fn model(&self) -> &str {
        self.inner.model()
    }

    pub fn endpoint(&self) -> &str {
        self.inner.endpoint()
    }
}

#[async_trait]
impl AltTextClient for OpenRouterClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenRouter
    }

    fn is_available(&self) -> bool {
        self.inner.is_available()
    }

    async fn build_alt_text(&self, image: &[u8], locale: Option<&str>) -> ProviderResult<String> {
        self.inner.build_alt_text(image, locale).await
    }
}
