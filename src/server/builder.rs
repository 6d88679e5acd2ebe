//! Server builder and run_server function

use crate::config::Config;
use crate::core::{ImageEditProvider, ImageEditRelay};
use crate::server::server::HttpServer;
use crate::server::state::AppState;
use crate::utils::error::{RelayError, Result};
use std::sync::Arc;
use tracing::info;

/// Server builder for easier configuration
#[derive(Default)]
pub struct ServerBuilder {
    config: Option<Config>,
    provider: Option<Arc<dyn ImageEditProvider>>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Use a provider other than the configured OpenAI client
    pub fn with_provider(mut self, provider: Arc<dyn ImageEditProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Build the HTTP server
    pub fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| RelayError::config("Configuration is required"))?;

        let state = match self.provider {
            Some(provider) => {
                let relay = ImageEditRelay::new(&config.relay, provider)?;
                AppState::new(config, Arc::new(relay))
            }
            None => AppState::from_config(config)?,
        };

        Ok(HttpServer::with_state(state))
    }
}

/// Validate the configuration and serve until shutdown
pub async fn run_server(config: Config) -> Result<()> {
    config.validate()?;

    info!(
        "Relay endpoint: POST {} (style reference: {})",
        config.server().endpoint_path,
        config.style().kind()
    );
    match config.provider().deadline() {
        Some(deadline) => info!("Provider deadline: {}s", deadline.as_secs()),
        None => info!("Provider deadline disabled"),
    }

    ServerBuilder::new().with_config(config).build()?.start().await
}
