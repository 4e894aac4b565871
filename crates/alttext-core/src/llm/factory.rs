//! Factory that resolves configuration into provider clients.
//!
//! Every call builds a fresh client from the immutable [`Config`]; only the
//! underlying `reqwest::Client` connection pool is shared between them.

use super::anthropic::AnthropicClient;
use super::fallback::ProviderSource;
use super::gemini::GeminiClient;
use super::openai::OpenAiClient;
use super::openrouter::OpenRouterClient;
use super::provider::{AltTextClient, ClientSettings, ProviderKind};
use crate::config::{resolve_env_var, Config};
use crate::error::ConfigError;
use std::time::Duration;

/// Creates provider clients from configuration.
#[derive(Clone)]
pub struct ClientFactory {
    config: Config,
    http: reqwest::Client,
}

impl ClientFactory {
    /// Create a factory with its own HTTP connection pool.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("alttext/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ConfigError::ValidationError(format!("failed to build HTTP client: {e}")))?;
        Ok(Self::with_http_client(config, http))
    }

    /// Create a factory that shares an existing HTTP client.
    pub fn with_http_client(config: Config, http: reqwest::Client) -> Self {
        Self { config, http }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// All providers as ordered `(key, display name)` pairs.
    ///
    /// Static: independent of which providers are configured.
    pub fn available_providers() -> Vec<(&'static str, &'static str)> {
        ProviderKind::ALL
            .iter()
            .map(|kind| (kind.key(), kind.display_name()))
            .collect()
    }

    /// Resolve a provider key: explicit argument, else `general.provider`, else the default.
    ///
    /// Unknown keys fall back to the default provider with a warning.
    pub fn resolve_kind(&self, provider: Option<&str>) -> ProviderKind {
        let requested = provider.unwrap_or(&self.config.general.provider);
        ProviderKind::from_key(requested).unwrap_or_else(|| {
            tracing::warn!(
                requested,
                fallback = %ProviderKind::DEFAULT,
                "Unknown AI provider, using default"
            );
            ProviderKind::DEFAULT
        })
    }

    /// Create a client for the given provider key (or the configured default).
    pub fn create_client(&self, provider: Option<&str>) -> Box<dyn AltTextClient> {
        self.create(self.resolve_kind(provider))
    }

    /// Create a client for a specific provider.
    pub fn create(&self, kind: ProviderKind) -> Box<dyn AltTextClient> {
        let settings = self.settings_for(kind);
        tracing::debug!(
            provider = %kind,
            model = %settings.model,
            available = !settings.api_key.is_empty(),
            "Creating AI client"
        );

        let http = self.http.clone();
        let providers = &self.config.providers;
        match kind {
            ProviderKind::OpenAi => Box::new(
                OpenAiClient::new(http, settings)
                    .with_organization(&providers.openai.organization)
                    .with_project(&providers.openai.project),
            ),
            ProviderKind::Gemini => Box::new(GeminiClient::new(http, settings)),
            ProviderKind::Claude => Box::new(AnthropicClient::new(http, settings)),
            ProviderKind::OpenRouter => Box::new(OpenRouterClient::new(
                http,
                settings,
                &providers.openrouter.site_url,
                &providers.openrouter.app_title,
            )),
        }
    }

    /// Resolve the per-provider settings a client is built with.
    ///
    /// Model precedence: provider section, then `general.model`, then the
    /// provider's built-in default.
    pub fn settings_for(&self, kind: ProviderKind) -> ClientSettings {
        let providers = &self.config.providers;
        let (api_key, model, base_url, headers) = match kind {
            ProviderKind::OpenAi => {
                let c = &providers.openai;
                (&c.api_key, &c.model, &c.base_url, &c.headers)
            }
            ProviderKind::Gemini => {
                let c = &providers.gemini;
                (&c.api_key, &c.model, &c.base_url, &c.headers)
            }
            ProviderKind::Claude => {
                let c = &providers.claude;
                (&c.api_key, &c.model, &c.base_url, &c.headers)
            }
            ProviderKind::OpenRouter => {
                let c = &providers.openrouter;
                (&c.api_key, &c.model, &c.base_url, &c.headers)
            }
        };

        ClientSettings::new(kind, resolve_env_var(api_key).unwrap_or_default())
            .with_model(&self.config.general.model)
            .with_model(model)
            .with_base_url(base_url)
            .with_headers(headers.clone())
            .with_timeout(Duration::from_millis(self.config.http.timeout_ms))
    }
}

impl ProviderSource for ClientFactory {
    fn providers(&self) -> Vec<ProviderKind> {
        ProviderKind::ALL.to_vec()
    }

    fn client_for(&self, kind: ProviderKind) -> Box<dyn AltTextClient> {
        self.create(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factory(config: Config) -> ClientFactory {
        ClientFactory::with_http_client(config, reqwest::Client::new())
    }

    fn config_with_keys() -> Config {
        let mut config = Config::default();
        config.providers.openai.api_key = "sk-openai".to_string();
        config.providers.gemini.api_key = "AIza".to_string();
        config.providers.claude.api_key = "sk-ant".to_string();
        config.providers.openrouter.api_key = "sk-or".to_string();
        config
    }

    #[test]
    fn test_available_providers_fixed_order() {
        assert_eq!(
            ClientFactory::available_providers(),
            vec![
                ("openai", "OpenAI"),
                ("gemini", "Google Gemini"),
                ("claude", "Anthropic Claude"),
                ("openrouter", "OpenRouter"),
            ]
        );
    }

    #[test]
    fn test_explicit_provider_wins() {
        let mut config = config_with_keys();
        config.general.provider = "claude".to_string();
        let client = factory(config).create_client(Some("gemini"));
        assert_eq!(client.kind(), ProviderKind::Gemini);
        assert_eq!(client.name(), "Google Gemini");
    }

    #[test]
    fn test_configured_default_provider() {
        let mut config = config_with_keys();
        config.general.provider = "OpenRouter".to_string();
        let client = factory(config).create_client(None);
        assert_eq!(client.kind(), ProviderKind::OpenRouter);
    }

    #[test]
    fn test_unknown_provider_falls_back_to_openai() {
        let mut config = config_with_keys();
        config.general.provider = "mistral".to_string();
        let factory = factory(config);
        assert_eq!(factory.create_client(None).kind(), ProviderKind::OpenAi);
        assert_eq!(
            factory.create_client(Some("llama")).kind(),
            ProviderKind::OpenAi
        );
    }

    #[test]
    fn test_availability_from_config() {
        let mut config = Config::default();
        config.providers.openai.api_key = String::new();
        config.providers.claude.api_key = "sk-ant".to_string();
        config.providers.gemini.api_key = "${DEFINITELY_NOT_SET_XYZ_456}".to_string();
        let factory = factory(config);
        assert!(!factory.create(ProviderKind::OpenAi).is_available());
        assert!(factory.create(ProviderKind::Claude).is_available());
        assert!(!factory.create(ProviderKind::Gemini).is_available());
    }

    #[test]
    fn test_model_precedence() {
        let mut config = config_with_keys();
        config.general.model = "shared-model".to_string();
        config.providers.claude.model = "claude-3-haiku-20240307".to_string();
        let factory = factory(config);

        assert_eq!(
            factory.settings_for(ProviderKind::Claude).model,
            "claude-3-haiku-20240307"
        );
        assert_eq!(factory.settings_for(ProviderKind::Gemini).model, "shared-model");
    }

    #[test]
    fn test_model_defaults_when_empty() {
        let factory = factory(config_with_keys());
        assert_eq!(factory.settings_for(ProviderKind::OpenAi).model, "gpt-4o-mini");
        assert_eq!(
            factory.settings_for(ProviderKind::Gemini).model,
            "gemini-1.5-flash"
        );
        assert_eq!(
            factory.settings_for(ProviderKind::Claude).model,
            "claude-3-5-sonnet-20240620"
        );
        assert_eq!(
            factory.settings_for(ProviderKind::OpenRouter).model,
            "openai/gpt-4o-mini"
        );
    }

    #[test]
    fn test_base_url_and_timeout() {
        let mut config = config_with_keys();
        config.providers.openai.base_url = "https://proxy.example.org/v1".to_string();
        config.http.timeout_ms = 2500;
        let settings = factory(config).settings_for(ProviderKind::OpenAi);
        assert_eq!(settings.base_url, "https://proxy.example.org/v1");
        assert_eq!(settings.timeout, Duration::from_millis(2500));
    }

    #[test]
    fn test_provider_source_lists_all() {
        let factory = factory(Config::default());
        assert_eq!(factory.providers(), ProviderKind::ALL.to_vec());
    }
}
