//! Style reference configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the style reference image comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum StyleReferenceConfig {
    /// Fetch over HTTP, from `url` or from `path` on the caller's origin
    Remote {
        #[serde(default)]
        url: Option<String>,
        #[serde(default = "default_style_path")]
        path: String,
        #[serde(default = "default_style_fetch_timeout")]
        fetch_timeout_secs: u64,
    },
    /// Read from the local filesystem
    Local { path: PathBuf },
    /// Send the upload as the only reference image
    #[serde(rename = "none")]
    Disabled,
}

impl Default for StyleReferenceConfig {
    fn default() -> Self {
        Self::from_origin()
    }
}

impl StyleReferenceConfig {
    /// Remote strategy resolved against each caller's origin
    pub fn from_origin() -> Self {
        Self::Remote {
            url: None,
            path: default_style_path(),
            fetch_timeout_secs: default_style_fetch_timeout(),
        }
    }

    /// Remote strategy with a fixed URL
    pub fn remote_url(url: impl Into<String>) -> Self {
        Self::Remote {
            url: Some(url.into()),
            path: default_style_path(),
            fetch_timeout_secs: default_style_fetch_timeout(),
        }
    }

    pub fn local(path: impl Into<PathBuf>) -> Self {
        Self::Local { path: path.into() }
    }

    /// Short label for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Remote { .. } => "remote",
            Self::Local { .. } => "local",
            Self::Disabled => "none",
        }
    }
}

impl Validate for StyleReferenceConfig {
    /// Validate style reference configuration
    fn validate(&self) -> Result<(), String> {
        match self {
            Self::Remote {
                url,
                path,
                fetch_timeout_secs,
            } => {
                if let Some(url) = url {
                    if !crate::utils::is_valid_http_url(url) {
                        return Err(format!("Style reference URL is invalid: {}", url));
                    }
                } else if !path.starts_with('/') {
                    return Err(format!(
                        "Style reference path must start with '/', got: {}",
                        path
                    ));
                }
                if *fetch_timeout_secs == 0 {
                    return Err("Style reference fetch timeout cannot be 0".to_string());
                }
                Ok(())
            }
            Self::Local { path } => {
                if path.as_os_str().is_empty() {
                    return Err("Style reference path cannot be empty".to_string());
                }
                Ok(())
            }
            Self::Disabled => Ok(()),
        }
    }
}
