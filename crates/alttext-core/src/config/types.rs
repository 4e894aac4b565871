//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Provider key used when a client is requested without one
    pub provider: String,

    /// Shared model fallback for providers whose own model is empty
    pub model: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: String::new(),
        }
    }
}

/// Outbound HTTP settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_ms: 60_000 }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Per-provider configuration sections.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProvidersConfig {
    pub openai: OpenAiConfig,
    pub gemini: GeminiConfig,
    pub claude: ClaudeConfig,
    pub openrouter: OpenRouterConfig,
}

/// OpenAI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    /// API key (supports ${ENV_VAR} syntax)
    pub api_key: String,

    /// Model name; empty falls back to `general.model`, then "gpt-4o-mini"
    pub model: String,

    /// API base URL; empty uses https://api.openai.com/v1/
    pub base_url: String,

    /// Sent as `OpenAI-Organization` when set
    pub organization: String,

    /// Sent as `OpenAI-Project` when set
    pub project: String,

    /// Extra HTTP headers
    pub headers: BTreeMap<String, String>,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: "${OPENAI_API_KEY}".to_string(),
            model: String::new(),
            base_url: String::new(),
            organization: String::new(),
            project: String::new(),
            headers: BTreeMap::new(),
        }
    }
}

/// Google Gemini configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// API key (supports ${ENV_VAR} syntax)
    pub api_key: String,

    /// Model name; empty falls back to `general.model`, then "gemini-1.5-flash"
    pub model: String,

    /// API base URL; empty uses https://generativelanguage.googleapis.com
    pub base_url: String,

    /// Extra HTTP headers
    pub headers: BTreeMap<String, String>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: "${GEMINI_API_KEY}".to_string(),
            model: String::new(),
            base_url: String::new(),
            headers: BTreeMap::new(),
        }
    }
}

/// Anthropic Claude configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClaudeConfig {
    /// API key (supports ${ENV_VAR} syntax)
    pub api_key: String,

    /// Model name; empty falls back to `general.model`, then "claude-3-5-sonnet-20240620"
    pub model: String,

    /// API base URL; empty uses https://api.anthropic.com
    pub base_url: String,

    /// Extra HTTP headers
    pub headers: BTreeMap<String, String>,
}

impl Default for ClaudeConfig {
    fn default() -> Self {
        Self {
            api_key: "${ANTHROPIC_API_KEY}".to_string(),
            model: String::new(),
            base_url: String::new(),
            headers: BTreeMap::new(),
        }
    }
}

/// OpenRouter configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenRouterConfig {
    /// API key (supports ${ENV_VAR} syntax)
    pub api_key: String,

    /// Model name; empty falls back to `general.model`, then "gpt-4o-mini"
    pub model: String,

    /// API base URL; empty uses https://openrouter.ai/api/v1
    pub base_url: String,

    /// Site URL sent as `HTTP-Referer`
    pub site_url: String,

    /// Application name sent as `X-Title`
    pub app_title: String,

    /// Extra HTTP headers
    pub headers: BTreeMap<String, String>,
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            api_key: "${OPENROUTER_API_KEY}".to_string(),
            model: String::new(),
            base_url: String::new(),
            site_url: "http://localhost".to_string(),
            app_title: "Alt-Text Generator".to_string(),
            headers: BTreeMap::new(),
        }
    }
}
