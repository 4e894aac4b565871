//! Multi-provider fallback for alt-text generation.
//!
//! Providers are tried one at a time in their fixed order. Unconfigured
//! providers are skipped, failures are logged and recorded, and the first
//! success is returned immediately. Only when nothing succeeds does the
//! caller see an error, carrying the full attempt log.

use super::factory::ClientFactory;
use super::provider::{AltTextClient, ProviderKind};
use crate::config::Config;
use crate::error::{ConfigError, ProviderError, ProviderResult};
use tokio_util::sync::CancellationToken;

/// Source of provider clients for the fallback chain.
///
/// Implemented by [`ClientFactory`]; tests substitute their own.
pub trait ProviderSource: Send + Sync {
    /// Providers to try, in order.
    fn providers(&self) -> Vec<ProviderKind>;

    /// Build a fresh client for one provider.
    fn client_for(&self, kind: ProviderKind) -> Box<dyn AltTextClient>;
}

/// What happened when a provider was considered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// No credential configured; no request was sent.
    Skipped,
    /// The request was sent and failed with this reason.
    Failed(String),
}

/// One entry of the ordered attempt log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub provider: ProviderKind,
    pub outcome: AttemptOutcome,
}

/// Alt-text generator with automatic provider fallback.
pub struct AltTextGenerator<S = ClientFactory> {
    source: S,
}

impl AltTextGenerator<ClientFactory> {
    /// Build a generator over the providers described by `config`.
    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        Ok(Self::new(ClientFactory::new(config)?))
    }

    /// Direct single-provider access, bypassing fallback.
    ///
    /// Errors from the returned client propagate unmodified.
    pub fn create_client(&self, provider: Option<&str>) -> Box<dyn AltTextClient> {
        self.source.create_client(provider)
    }

    /// All providers as ordered `(key, display name)` pairs.
    pub fn available_providers() -> Vec<(&'static str, &'static str)> {
        ClientFactory::available_providers()
    }
}

impl<S: ProviderSource> AltTextGenerator<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Generate alt-text with the first provider that succeeds.
    ///
    /// Returns [`ProviderError::AllProvidersFailed`] when every provider was
    /// skipped or failed. A provider reporting [`ProviderError::Cancelled`]
    /// stops the chain instead of triggering fallback.
    pub async fn build_alt_text(&self, image: &[u8], locale: Option<&str>) -> ProviderResult<String> {
        let mut attempts = Vec::new();

        for kind in self.source.providers() {
            let client = self.source.client_for(kind);
            if !client.is_available() {
                tracing::debug!(provider = %kind, "Skipping {}: no API key configured", client.name());
                attempts.push(Attempt {
                    provider: kind,
                    outcome: AttemptOutcome::Skipped,
                });
                continue;
            }

            match client.build_alt_text(image, locale).await {
                Ok(text) => {
                    tracing::info!(
                        provider = %kind,
                        previous_attempts = attempts.len(),
                        "Alt-text generated by {}",
                        client.name()
                    );
                    return Ok(text);
                }
                Err(ProviderError::Cancelled) => return Err(ProviderError::Cancelled),
                Err(e) => {
                    tracing::warn!(provider = %kind, "Provider {kind} failed: {e}");
                    attempts.push(Attempt {
                        provider: kind,
                        outcome: AttemptOutcome::Failed(e.to_string()),
                    });
                }
            }
        }

        let err = ProviderError::AllProvidersFailed { attempts };
        tracing::error!("{err}");
        Err(err)
    }

    /// Like [`build_alt_text`](Self::build_alt_text), but stops as soon as
    /// `cancel` fires.
    ///
    /// The in-flight request is dropped and no further providers are tried.
    pub async fn build_alt_text_cancellable(
        &self,
        image: &[u8],
        locale: Option<&str>,
        cancel: &CancellationToken,
    ) -> ProviderResult<String> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::info!("Alt-text generation cancelled");
                Err(ProviderError::Cancelled)
            }
            result = self.build_alt_text(image, locale) => result,
        }
    }
}
