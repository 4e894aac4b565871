//! Configuration validation.

use crate::error::ConfigError;

use super::Config;
use std::collections::BTreeMap;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.general.provider.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "general.provider must not be empty".into(),
            ));
        }
        if self.http.timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "http.timeout_ms must be > 0".into(),
            ));
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::ValidationError(format!(
                "logging.format must be \"pretty\" or \"json\", got \"{}\"",
                self.logging.format
            )));
        }

        let providers = &self.providers;
        validate_headers("providers.openai.headers", &providers.openai.headers)?;
        validate_headers("providers.gemini.headers", &providers.gemini.headers)?;
        validate_headers("providers.claude.headers", &providers.claude.headers)?;
        validate_headers("providers.openrouter.headers", &providers.openrouter.headers)?;
        Ok(())
    }
}

fn validate_headers(section: &str, headers: &BTreeMap<String, String>) -> Result<(), ConfigError> {
    for name in headers.keys() {
        let valid = !name.is_empty()
            && name
                .bytes()
                .all(|b| b.is_ascii_graphic() && b != b':');
        if !valid {
            return Err(ConfigError::ValidationError(format!(
                "{section}: invalid header name \"{name}\""
            )));
        }
    }
    Ok(())
}
