//! Configuration management for the relay
//!
//! This module handles loading, validation, and management of all relay configuration.
//! Sources in increasing precedence: defaults, YAML file, environment, CLI.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{RelayError, Result};
use std::path::Path;
use tracing::{debug, info, warn};

/// Main configuration struct for the relay
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Relay configuration
    pub relay: RelayConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| RelayError::config(format!("Failed to read config file: {}", e)))?;

        let relay: RelayConfig = serde_yaml::from_str(&content)
            .map_err(|e| RelayError::config(format!("Failed to parse config: {}", e)))?;

        debug!("Configuration loaded successfully");
        Ok(Self { relay })
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");
        let relay = RelayConfig::from_env()?;
        Ok(Self { relay })
    }

    /// Load the file when it exists, then overlay the environment
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if tokio::fs::try_exists(path).await.unwrap_or(false) {
            Self::from_file(path).await?
        } else {
            info!(
                "Configuration file {:?} not found, using defaults and environment",
                path
            );
            Self::default()
        };

        config.relay.apply_env()?;
        Ok(config)
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.relay.server
    }

    /// Get provider configuration
    pub fn provider(&self) -> &ProviderConfig {
        &self.relay.provider
    }

    /// Get style reference configuration
    pub fn style(&self) -> &StyleReferenceConfig {
        &self.relay.style
    }

    /// Get prompt configuration
    pub fn prompt(&self) -> &PromptConfig {
        &self.relay.prompt
    }

    /// Get logging configuration
    pub fn logging(&self) -> &LoggingConfig {
        &self.relay.logging
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.relay
            .server
            .validate()
            .map_err(|e| RelayError::config(format!("Server config error: {}", e)))?;

        self.relay
            .provider
            .validate()
            .map_err(|e| RelayError::config(format!("Provider config error: {}", e)))?;

        self.relay
            .style
            .validate()
            .map_err(|e| RelayError::config(format!("Style config error: {}", e)))?;

        self.relay
            .prompt
            .validate()
            .map_err(|e| RelayError::config(format!("Prompt config error: {}", e)))?;

        if let StyleReferenceConfig::Local { path } = &self.relay.style {
            if !path.exists() {
                warn!(
                    "Style reference {:?} does not exist yet, requests will fail until it does",
                    path
                );
            }
        }

        if !self.relay.server.cors.allows_all_origins() {
            debug!(
                "Relay endpoint restricted to origin {}",
                self.relay.server.cors.allowed_origin
            );
        }

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.relay)
            .map_err(|e| RelayError::config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
