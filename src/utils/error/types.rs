//! Error types for the relay

use std::time::Duration;
use thiserror::Error;

/// Result type alias for the relay
pub type Result<T> = std::result::Result<T, RelayError>;

/// Main error type for the relay
#[derive(Error, Debug)]
pub enum RelayError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The multipart body had no usable `file` field
    #[error("No file uploaded")]
    MissingFile,

    /// The multipart body could not be read
    #[error("Invalid multipart data: {0}")]
    InvalidForm(String),

    /// The style reference image could not be obtained
    #[error("Style reference not found: {0}")]
    StyleReference(String),

    /// The provider answered with a non-success status
    #[error("Provider returned status {status}")]
    Provider {
        status: u16,
        body: String,
        content_type: Option<String>,
    },

    /// The provider answered 403 and diagnostics are enabled
    #[error("Provider denied access")]
    AccessDenied { body: String },

    /// The provider answered successfully but without image data
    #[error("No image returned")]
    MissingImage,

    /// The provider call did not finish before the deadline
    #[error("Provider call exceeded the {}s deadline", .0.as_secs())]
    DeadlineExceeded(Duration),

    /// The provider call was cancelled before it produced a reply
    #[error("Provider call cancelled")]
    Cancelled,

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal server errors
    #[error("{0}")]
    Internal(String),
}
