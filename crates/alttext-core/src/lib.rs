//! alttext-core - AI alt-text generation for images.
//!
//! Generates short accessibility descriptions for images by delegating to
//! one of several vision-capable AI providers, falling back across them
//! when one fails or is not configured.
//!
//! # Architecture
//!
//! ```text
//! image bytes + locale → AltTextGenerator → ClientFactory → provider client → sanitize → text
//!                              ↑ next provider on failure ┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use alttext_core::{AltTextGenerator, Config};
//!
//! #[tokio::main]
//! async fn main() -> alttext_core::Result<()> {
//!     let config = Config::load()?;
//!     let generator = AltTextGenerator::from_config(config)?;
//!
//!     let image = std::fs::read("./photo.jpg")?;
//!     let text = generator.build_alt_text(&image, Some("de-DE")).await?;
//!     println!("{text}");
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod llm;
pub mod locale;
pub mod sanitize;

// Re-exports for convenient access
pub use config::Config;
pub use error::{AltTextError, ConfigError, ProviderError, ProviderResult, Result};
pub use llm::{
    AltTextClient, AltTextGenerator, Attempt, AttemptOutcome, ClientFactory, ProviderKind,
    ProviderSource,
};
pub use sanitize::sanitize;
pub use tokio_util::sync::CancellationToken;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_provider_error_converts_to_top_level() {
        let err: AltTextError = ProviderError::Cancelled.into();
        assert_eq!(err.to_string(), "Provider error: Alt-text generation cancelled");
    }
}
