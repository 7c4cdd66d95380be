//! Configuration for trifold.
//!
//! Stored as JSON in the `.trifold/` directory; every field has a default
//! so a missing or partial file still yields a usable config. Callers apply
//! [`Config::with_env_override`] so `API_URL` beats the stored URL.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable overriding the frame-server base URL.
pub const API_URL_ENV: &str = "API_URL";

/// Main configuration for trifold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the frame server.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Draw tick interval in milliseconds.
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,

    /// Force plain ASCII borders.
    #[serde(default)]
    pub ascii_borders: bool,
}

fn default_api_url() -> String {
    "http://localhost:1001".into()
}

fn default_tick_rate_ms() -> u64 {
    250
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            tick_rate_ms: default_tick_rate_ms(),
            ascii_borders: false,
        }
    }
}

impl Config {
    /// Load config from a file, falling back to defaults when absent.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Parse)
    }

    /// Apply the `API_URL` environment override, if set and non-empty.
    #[must_use]
    pub fn with_env_override(mut self) -> Self {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.is_empty() {
                self.api_url = url;
            }
        }
        self
    }

    /// Save config to a file, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        std::fs::write(path, content).map_err(ConfigError::Io)
    }
}

/// Errors that can occur when working with config files.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Serialize error.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),
}
