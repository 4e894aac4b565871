//! AI provider integration for alt-text generation.
//!
//! Provides a client abstraction over multiple vision-capable providers
//! (OpenAI, Google Gemini, Anthropic Claude, OpenRouter), a factory that
//! builds clients from configuration, and a fallback generator that tries
//! providers in order until one succeeds.

pub(crate) mod anthropic;
pub(crate) mod factory;
pub(crate) mod fallback;
pub(crate) mod gemini;
pub(crate) mod openai;
pub(crate) mod openrouter;
pub(crate) mod provider;
pub(crate) mod transport;

pub use anthropic::AnthropicClient;
pub use factory::ClientFactory;
pub use fallback::{AltTextGenerator, Attempt, AttemptOutcome, ProviderSource};
pub use gemini::GeminiClient;
pub use openai::OpenAiClient;
pub use openrouter::OpenRouterClient;
pub use provider::{
    build_prompt, AltTextClient, ClientSettings, ImageInput, ProviderKind, ALT_TEXT_PROMPT,
    IMAGE_MEDIA_TYPE,
};
