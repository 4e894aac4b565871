//! Error types for alt-text generation.
//!
//! Provider errors carry the provider they came from so the fallback
//! orchestrator can log and aggregate them without losing context.

use crate::llm::fallback::{Attempt, AttemptOutcome};
use crate::llm::ProviderKind;
use thiserror::Error;

/// Top-level error type for alttext operations.
#[derive(Error, Debug)]
pub enum AltTextError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Provider or orchestration errors
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Errors raised by a single provider client or by the fallback orchestrator.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The provider was invoked without a credential.
    #[error("{provider} is not configured: API key missing")]
    CredentialMissing { provider: ProviderKind },

    /// Network failure, timeout, or non-success HTTP status.
    #[error("{provider} request failed: {message}")]
    Transport {
        provider: ProviderKind,
        message: String,
        /// HTTP status code, when the server answered at all
        status_code: Option<u16>,
        timed_out: bool,
    },

    /// Success status, but the body did not contain the expected text field.
    #[error("Invalid response from {provider}: {message}")]
    UnexpectedResponse {
        provider: ProviderKind,
        message: String,
    },

    /// Every provider in the fallback chain was skipped or failed.
    #[error("All AI providers failed. Tried: {}{}", format_tried(attempts), format_skipped(attempts))]
    AllProvidersFailed { attempts: Vec<Attempt> },

    /// The caller cancelled generation.
    #[error("Alt-text generation cancelled")]
    Cancelled,
}

impl ProviderError {
    /// The provider this error originated from, if it is a single-provider error.
    pub fn provider(&self) -> Option<ProviderKind> {
        match self {
            Self::CredentialMissing { provider }
            | Self::Transport { provider, .. }
            | Self::UnexpectedResponse { provider, .. } => Some(*provider),
            Self::AllProvidersFailed { .. } | Self::Cancelled => None,
        }
    }

    /// Provider keys that were attempted and failed, in attempt order.
    pub fn tried_providers(&self) -> Vec<&'static str> {
        match self {
            Self::AllProvidersFailed { attempts } => attempts
                .iter()
                .filter(|a| matches!(a.outcome, AttemptOutcome::Failed(_)))
                .map(|a| a.provider.key())
                .collect(),
            _ => Vec::new(),
        }
    }
}

fn format_tried(attempts: &[Attempt]) -> String {
    let tried: Vec<&str> = attempts
        .iter()
        .filter(|a| matches!(a.outcome, AttemptOutcome::Failed(_)))
        .map(|a| a.provider.key())
        .collect();
    if tried.is_empty() {
        "none".to_string()
    } else {
        tried.join(", ")
    }
}

fn format_skipped(attempts: &[Attempt]) -> String {
    let skipped: Vec<&str> = attempts
        .iter()
        .filter(|a| matches!(a.outcome, AttemptOutcome::Skipped))
        .map(|a| a.provider.key())
        .collect();
    if skipped.is_empty() {
        String::new()
    } else {
        format!(" (not configured: {})", skipped.join(", "))
    }
}

/// Convenience type alias for alttext results.
pub type Result<T> = std::result::Result<T, AltTextError>;

/// Convenience type alias for provider-level results.
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;
