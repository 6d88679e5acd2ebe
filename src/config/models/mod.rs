//! Configuration data models
//!
//! This module defines all configuration structures used by the relay.

pub mod logging;
pub mod prompt;
pub mod provider;
pub mod relay;
pub mod server;
pub mod style;

// Re-export all configuration types
pub use logging::*;
pub use prompt::*;
pub use provider::*;
pub use relay::*;
pub use server::*;
pub use style::*;

use super::validation::Validate;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    3000
}

/// Default maximum body size in bytes
pub fn default_max_body_size() -> usize {
    20 * 1024 * 1024 // 20MB
}

/// Default relay endpoint
pub fn default_endpoint_path() -> String {
    "/api/plushy".to_string()
}

/// Default provider base URL
pub fn default_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

/// Default image model
pub fn default_model() -> String {
    "gpt-image-1".to_string()
}

/// Default provider deadline in seconds, kept under a 60s platform ceiling
pub fn default_provider_timeout() -> Option<u64> {
    Some(55)
}

/// Default multipart field for reference images
pub fn default_image_field() -> String {
    "image[]".to_string()
}

/// Default style reference path on the request origin
pub fn default_style_path() -> String {
    "/material_reference_2.jpeg".to_string()
}

/// Default timeout for the style reference fetch in seconds
pub fn default_style_fetch_timeout() -> u64 {
    10
}

/// Default background color
pub fn default_bg() -> String {
    "#EAF2FF".to_string()
}

/// Default output size
pub fn default_size() -> String {
    "1024x1024".to_string()
}

/// Default log level
pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_true() -> bool {
    true
}

/// Check a `WxH` size descriptor such as `1024x1024`
pub fn is_valid_size(size: &str) -> bool {
    match size.split_once('x') {
        Some((width, height)) => {
            matches!(width.parse::<u32>(), Ok(w) if w > 0)
                && matches!(height.parse::<u32>(), Ok(h) if h > 0)
        }
        None => size == "auto",
    }
}
