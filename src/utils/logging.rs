//! Logging setup
//!
//! Installs the global tracing subscriber according to [`LoggingConfig`].

use crate::config::{LogFormat, LoggingConfig};
use crate::utils::error::{RelayError, Result};
use tracing_subscriber::EnvFilter;

/// Build the level filter; `RUST_LOG` wins over the configured level
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| config_filter(config))
}

fn config_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::new(&config.level)
}

/// Install the global subscriber
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = env_filter(config);

    let installed = match config.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_current_span(false)
            .try_init(),
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_thread_ids(false)
            .try_init(),
    };

    installed.map_err(|e| RelayError::config(format!("Failed to install logger: {}", e)))
}

/// Keep only a short prefix of a secret for log lines
pub fn redact_secret(secret: &str) -> String {
    if secret.is_empty() {
        return "<unset>".to_string();
    }
    let prefix: String = secret.chars().take(3).collect();
    format!("{}***", prefix)
}
