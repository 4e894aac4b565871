//! Provider trait, provider identities, and request helpers.
//!
//! Defines the capability every vendor client implements (build alt-text,
//! report availability, report name) plus the pieces they share: the fixed
//! prompt, the base64 image encoding, and resolved client settings.

use crate::error::ProviderResult;
use crate::locale;
use async_trait::async_trait;
use base64::Engine;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// The fixed alt-text instruction sent to every provider.
pub const ALT_TEXT_PROMPT: &str = "Create an alternative text for this image to be used on websites \
for visually impaired people who cannot see the image.\n\
Focus on the image's main content and ignore all elements in the image not relevant to understand its message.\n\
The text should not exceed 50 words.";

/// Media type declared for every uploaded image.
pub const IMAGE_MEDIA_TYPE: &str = "image/jpeg";

/// Stable identity of a supported provider.
///
/// Declaration order is the fallback order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    OpenAi,
    Gemini,
    Claude,
    OpenRouter,
}

impl ProviderKind {
    /// All providers in fixed fallback order.
    pub const ALL: [ProviderKind; 4] = [
        ProviderKind::OpenAi,
        ProviderKind::Gemini,
        ProviderKind::Claude,
        ProviderKind::OpenRouter,
    ];

    /// Provider used when neither the caller nor the config names a known one.
    pub const DEFAULT: ProviderKind = ProviderKind::OpenAi;

    /// Stable lowercase key used in configuration and error messages.
    pub fn key(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Gemini => "gemini",
            Self::Claude => "claude",
            Self::OpenRouter => "openrouter",
        }
    }

    /// Human-readable provider name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::OpenAi => "OpenAI",
            Self::Gemini => "Google Gemini",
            Self::Claude => "Anthropic Claude",
            Self::OpenRouter => "OpenRouter",
        }
    }

    /// Model used when neither the provider section nor `general.model` sets one.
    pub fn default_model(self) -> &'static str {
        match self {
            Self::OpenAi => "gpt-4o-mini",
            Self::Gemini => "gemini-1.5-flash",
            Self::Claude => "claude-3-5-sonnet-20240620",
            Self::OpenRouter => "openai/gpt-4o-mini",
        }
    }

    /// API base URL used when no override is configured.
    pub fn default_base_url(self) -> &'static str {
        match self {
            Self::OpenAi => "https://api.openai.com/v1/",
            Self::Gemini => "https://generativelanguage.googleapis.com",
            Self::Claude => "https://api.anthropic.com",
            Self::OpenRouter => "https://openrouter.ai/api/v1",
        }
    }

    /// Parse a provider key, ignoring case and surrounding whitespace.
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.key().eq_ignore_ascii_case(key))
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Base64-encoded image ready to send to a provider API.
#[derive(Debug, Clone)]
pub struct ImageInput {
    /// Base64-encoded image bytes
    pub data: String,
    /// MIME type declared to the provider
    pub media_type: &'static str,
    /// Size of the raw image in bytes
    pub byte_len: usize,
}

impl ImageInput {
    /// Encode raw image bytes, declared as JPEG regardless of actual format.
    pub fn jpeg(bytes: &[u8]) -> Self {
        Self {
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
            media_type: IMAGE_MEDIA_TYPE,
            byte_len: bytes.len(),
        }
    }

    /// Return a data URL suitable for OpenAI-style APIs.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.data)
    }
}

/// Build the alt-text prompt, adding a language instruction for recognized locales.
pub fn build_prompt(locale: Option<&str>) -> String {
    let language = locale.and_then(|l| {
        let name = locale::language_name(l);
        if name.is_none() {
            tracing::debug!(locale = l, "Unrecognized locale, omitting language instruction");
        }
        name
    });

    match language {
        Some(name) => format!("{ALT_TEXT_PROMPT}\nAnswer in {name}."),
        None => ALT_TEXT_PROMPT.to_string(),
    }
}

/// Resolved settings a provider client is constructed with.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Resolved API key; empty means the provider is unavailable
    pub api_key: String,
    /// Resolved model identifier
    pub model: String,
    /// API base URL (already defaulted)
    pub base_url: String,
    /// Extra HTTP headers
    pub headers: BTreeMap<String, String>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl ClientSettings {
    /// Settings for `kind` with its default model and base URL.
    pub fn new(kind: ProviderKind, api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: kind.default_model().to_string(),
            base_url: kind.default_base_url().to_string(),
            headers: BTreeMap::new(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Override the model; an empty value keeps the current one.
    pub fn with_model(mut self, model: &str) -> Self {
        if !model.trim().is_empty() {
            self.model = model.trim().to_string();
        }
        self
    }

    /// Override the base URL; an empty value keeps the current one.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        if !base_url.trim().is_empty() {
            self.base_url = base_url.trim().to_string();
        }
        self
    }

    pub fn with_headers(mut self, headers: BTreeMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Join the base URL and an API path with exactly one slash.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Trait that all alt-text providers implement.
///
/// Uses `async_trait` because native async fn in trait is not object-safe
/// (we need `Box<dyn AltTextClient>` for dynamic dispatch).
#[async_trait]
pub trait AltTextClient: Send + Sync {
    /// Which provider this client talks to.
    fn kind(&self) -> ProviderKind;

    /// Human-readable provider name.
    fn name(&self) -> &str {
        self.kind().display_name()
    }

    /// Whether a credential was supplied at construction.
    fn is_available(&self) -> bool;

    /// Generate sanitized alt-text for the image, optionally in the locale's language.
    ///
    /// Sends exactly one HTTP request. Fails with `CredentialMissing` when
    /// the client is unavailable.
    async fn build_alt_text(&self, image: &[u8], locale: Option<&str>) -> ProviderResult<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_order_and_keys() {
        let keys: Vec<_> = ProviderKind::ALL.iter().map(|k| k.key()).collect();
        assert_eq!(keys, vec!["openai", "gemini", "claude", "openrouter"]);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(ProviderKind::OpenAi.display_name(), "OpenAI");
        assert_eq!(ProviderKind::Gemini.display_name(), "Google Gemini");
        assert_eq!(ProviderKind::Claude.display_name(), "Anthropic Claude");
        assert_eq!(ProviderKind::OpenRouter.display_name(), "OpenRouter");
    }

    #[test]
    fn test_from_key() {
        assert_eq!(ProviderKind::from_key("gemini"), Some(ProviderKind::Gemini));
        assert_eq!(ProviderKind::from_key(" Claude "), Some(ProviderKind::Claude));
        assert_eq!(ProviderKind::from_key("OPENROUTER"), Some(ProviderKind::OpenRouter));
        assert_eq!(ProviderKind::from_key("mistral"), None);
    }

    #[test]
    fn test_image_input_is_jpeg() {
        let input = ImageInput::jpeg(&[0x89, 0x50, 0x4E, 0x47]);
        assert_eq!(input.media_type, "image/jpeg");
        assert_eq!(input.byte_len, 4);
        assert_eq!(input.data, "iVBORw==");
    }

    #[test]
    fn test_image_input_data_url() {
        let input = ImageInput::jpeg(&[1, 2, 3]);
        assert_eq!(input.data_url(), "data:image/jpeg;base64,AQID");
    }

    #[test]
    fn test_prompt_without_locale() {
        let prompt = build_prompt(None);
        assert!(prompt.contains("alternative text"));
        assert!(prompt.contains("50 words"));
        assert!(!prompt.contains("Answer in"));
    }

    #[test]
    fn test_prompt_with_locale() {
        let prompt = build_prompt(Some("fr"));
        assert!(prompt.ends_with("\nAnswer in French."));

        let prompt = build_prompt(Some("de-CH"));
        assert!(prompt.contains("Answer in German."));
    }

    #[test]
    fn test_prompt_with_unrecognized_locale() {
        assert_eq!(build_prompt(Some("zz-invalid")), ALT_TEXT_PROMPT);
        assert_eq!(build_prompt(Some("")), ALT_TEXT_PROMPT);
    }

    #[test]
    fn test_settings_empty_overrides_keep_defaults() {
        let settings = ClientSettings::new(ProviderKind::Gemini, "key")
            .with_model("")
            .with_base_url("  ");
        assert_eq!(settings.model, "gemini-1.5-flash");
        assert_eq!(settings.base_url, "https://generativelanguage.googleapis.com");
    }

    #[test]
    fn test_settings_endpoint_join() {
        let settings = ClientSettings::new(ProviderKind::OpenAi, "key");
        assert_eq!(
            settings.endpoint("chat/completions"),
            "https://api.openai.com/v1/chat/completions"
        );
        let settings = settings.with_base_url("http://localhost:8080");
        assert_eq!(
            settings.endpoint("/chat/completions"),
            "http://localhost:8080/chat/completions"
        );
    }
}
