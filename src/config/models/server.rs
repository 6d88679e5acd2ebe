//! Server configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Number of worker threads
    pub workers: Option<usize>,
    /// Maximum request body size in bytes
    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,
    /// Path the relay endpoint is mounted on
    #[serde(default = "default_endpoint_path")]
    pub endpoint_path: String,
    /// CORS headers sent by the relay endpoint
    #[serde(default)]
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
            max_body_size: default_max_body_size(),
            endpoint_path: default_endpoint_path(),
            cors: CorsConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Get the server address
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Validate for ServerConfig {
    /// Validate server configuration
    fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("Port cannot be 0".to_string());
        }

        if self.max_body_size == 0 {
            return Err("Max body size cannot be 0".to_string());
        }

        if !self.endpoint_path.starts_with('/') {
            return Err(format!(
                "Endpoint path must start with '/', got: {}",
                self.endpoint_path
            ));
        }

        if self.workers == Some(0) {
            return Err("Workers cannot be 0".to_string());
        }

        self.cors.validate()
    }
}

/// CORS headers for the relay endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Value of `access-control-allow-origin`
    #[serde(default = "default_cors_origin")]
    pub allowed_origin: String,
    /// Value of `access-control-allow-headers`
    #[serde(default = "default_cors_headers")]
    pub allowed_headers: String,
    /// Value of `access-control-allow-methods` on preflight
    #[serde(default = "default_cors_methods")]
    pub allowed_methods: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origin: default_cors_origin(),
            allowed_headers: default_cors_headers(),
            allowed_methods: default_cors_methods(),
        }
    }
}

impl CorsConfig {
    /// Check if CORS allows all origins
    pub fn allows_all_origins(&self) -> bool {
        self.allowed_origin == "*"
    }
}

impl Validate for CorsConfig {
    /// Validate CORS configuration
    fn validate(&self) -> Result<(), String> {
        if self.allowed_origin.trim().is_empty() {
            return Err("CORS allowed origin cannot be empty".to_string());
        }
        if !self
            .allowed_methods
            .split(',')
            .any(|m| m.trim().eq_ignore_ascii_case("POST"))
        {
            return Err("CORS allowed methods must include POST".to_string());
        }
        for value in [
            &self.allowed_origin,
            &self.allowed_headers,
            &self.allowed_methods,
        ] {
            if !value.chars().all(|c| c == ' ' || c.is_ascii_graphic()) {
                return Err(format!("CORS value is not a valid header value: {:?}", value));
            }
        }
        Ok(())
    }
}

fn default_cors_origin() -> String {
    "*".to_string()
}

fn default_cors_headers() -> String {
    "content-type".to_string()
}

fn default_cors_methods() -> String {
    "POST,OPTIONS".to_string()
}
