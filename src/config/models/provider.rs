//! Image provider configuration

use super::*;
use crate::utils::logging::redact_secret;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Multipart field names accepted by the image edit API
pub const IMAGE_FIELD_NAMES: [&str; 2] = ["image", "image[]"];

/// Provider configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API key sent as a bearer credential
    #[serde(default)]
    pub api_key: String,
    /// Base URL, `/images/edits` is appended
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Image model identifier
    #[serde(default = "default_model")]
    pub model: String,
    /// Deadline for the provider call in seconds, `null` disables it
    #[serde(default = "default_provider_timeout")]
    pub timeout_secs: Option<u64>,
    /// Field name used for every reference image (`image` or `image[]`)
    #[serde(default = "default_image_field")]
    pub image_field: String,
    /// Replace raw 403 bodies with a structured diagnostic
    #[serde(default = "default_true")]
    pub diagnose_access_denied: bool,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: default_api_base(),
            model: default_model(),
            timeout_secs: default_provider_timeout(),
            image_field: default_image_field(),
            diagnose_access_denied: true,
        }
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &redact_secret(&self.api_key))
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .field("image_field", &self.image_field)
            .field("diagnose_access_denied", &self.diagnose_access_denied)
            .finish()
    }
}

impl ProviderConfig {
    /// Create a provider configuration with an API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_timeout(mut self, timeout_secs: Option<u64>) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_image_field(mut self, field: impl Into<String>) -> Self {
        self.image_field = field.into();
        self
    }

    /// Deadline for the provider call
    pub fn deadline(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Full URL of the image edit endpoint
    pub fn edits_url(&self) -> String {
        format!("{}/images/edits", self.api_base.trim_end_matches('/'))
    }
}

impl Validate for ProviderConfig {
    /// Validate provider configuration
    fn validate(&self) -> Result<(), String> {
        if self.api_key.trim().is_empty() {
            return Err("API key is required (set OPENAI_API_KEY)".to_string());
        }

        if !crate::utils::is_valid_http_url(&self.api_base) {
            return Err(format!(
                "API base must be an http(s) URL, got: {}",
                self.api_base
            ));
        }

        if self.model.trim().is_empty() {
            return Err("Model cannot be empty".to_string());
        }

        if self.timeout_secs == Some(0) {
            return Err("Timeout cannot be 0, use null to disable it".to_string());
        }

        if !IMAGE_FIELD_NAMES.contains(&self.image_field.as_str()) {
            return Err(format!(
                "Image field must be one of {:?}, got: {}",
                IMAGE_FIELD_NAMES, self.image_field
            ));
        }

        Ok(())
    }
}
