//! Subcommand implementations.

pub mod config;
pub mod generate;
pub mod providers;

use alttext_core::{Config, ConfigError};
use std::path::{Path, PathBuf};

/// Config file in effect: `--config` (tilde-expanded) or the platform default.
pub fn config_path(explicit: Option<&str>) -> PathBuf {
    match explicit {
        Some(path) if !path.trim().is_empty() => Config::expand_path(path.trim()),
        _ => Config::default_path(),
    }
}

/// Load `path`, or defaults when it does not exist.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        Config::load_from(path)
    } else {
        Ok(Config::default())
    }
}
