//! Main relay configuration

use super::*;
use crate::utils::error::{RelayError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// Main relay configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RelayConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Image provider configuration
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Style reference strategy
    #[serde(default)]
    pub style: StyleReferenceConfig,
    /// Prompt and request defaults
    #[serde(default)]
    pub prompt: PromptConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl RelayConfig {
    /// Defaults with process environment overrides applied
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults with overrides from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        config.apply_lookup(lookup)?;
        Ok(config)
    }

    /// Overwrite fields with the process environment variables that are set
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_lookup(|key| std::env::var(key).ok())
    }

    /// Overwrite fields with the variables `lookup` returns
    ///
    /// A variable that is set always wins, even when its value matches the
    /// built-in default.
    pub fn apply_lookup<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        debug!("Applying environment overrides");

        if let Some(host) = lookup("RELAY_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("RELAY_PORT") {
            self.server.port = port
                .parse()
                .map_err(|e| RelayError::config(format!("Invalid RELAY_PORT: {}", e)))?;
        }
        if let Some(api_key) = lookup("OPENAI_API_KEY") {
            self.provider.api_key = api_key;
        }
        if let Some(api_base) = lookup("OPENAI_API_BASE") {
            self.provider.api_base = api_base;
        }
        if let Some(timeout) = lookup("RELAY_TIMEOUT_SECS") {
            self.provider.timeout_secs = match timeout.trim() {
                "" | "none" | "off" => None,
                value => Some(value.parse().map_err(|e| {
                    RelayError::config(format!("Invalid RELAY_TIMEOUT_SECS: {}", e))
                })?),
            };
        }
        if let Some(url) = lookup("RELAY_STYLE_URL") {
            self.style = StyleReferenceConfig::remote_url(url);
        } else if let Some(path) = lookup("RELAY_STYLE_PATH") {
            self.style = StyleReferenceConfig::Local {
                path: PathBuf::from(path),
            };
        }
        if let Some(level) = lookup("RELAY_LOG_LEVEL") {
            self.logging.level = level;
        }

        Ok(())
    }
}
