//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::core::ImageEditRelay;
use crate::utils::error::Result;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Relay configuration
    pub config: Arc<Config>,
    /// The image edit relay
    pub relay: Arc<ImageEditRelay>,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(config: Config, relay: Arc<ImageEditRelay>) -> Self {
        Self {
            config: Arc::new(config),
            relay,
        }
    }

    /// Build the state with the configured OpenAI provider
    pub fn from_config(config: Config) -> Result<Self> {
        let relay = ImageEditRelay::from_config(&config.relay)?;
        Ok(Self::new(config, Arc::new(relay)))
    }
}
