//! Style reference loading
//!
//! The style reference is a fixed image sent ahead of the upload to steer the
//! output's material. It is loaded fresh for every request.

use reqwest::header::CONTENT_TYPE;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

use crate::config::StyleReferenceConfig;
use crate::core::providers::ImagePart;
use crate::utils::error::{RelayError, Result};

const STYLE_FILENAME: &str = "style.jpeg";
const STYLE_MIME: &str = "image/jpeg";

/// Loads the style reference with the configured strategy
#[derive(Debug, Clone)]
pub enum StyleReferenceLoader {
    /// GET `url`, or `path` on the caller's origin
    Remote {
        client: reqwest::Client,
        url: Option<String>,
        path: String,
    },
    /// Read a file from disk
    Local { path: PathBuf },
    /// No style reference
    Disabled,
}

impl StyleReferenceLoader {
    pub fn from_config(config: &StyleReferenceConfig) -> Result<Self> {
        Ok(match config {
            StyleReferenceConfig::Remote {
                url,
                path,
                fetch_timeout_secs,
            } => {
                let client = reqwest::Client::builder()
                    .timeout(Duration::from_secs(*fetch_timeout_secs))
                    .build()?;
                Self::Remote {
                    client,
                    url: url.clone(),
                    path: path.clone(),
                }
            }
            StyleReferenceConfig::Local { path } => Self::Local { path: path.clone() },
            StyleReferenceConfig::Disabled => Self::Disabled,
        })
    }

    /// Load the style reference for one request
    ///
    /// `origin` is the caller's scheme and host, used when no fixed URL is
    /// configured. Returns `None` when the strategy is disabled.
    pub async fn load(&self, origin: Option<&str>) -> Result<Option<ImagePart>> {
        match self {
            Self::Remote { client, url, path } => {
                let target = match (url, origin) {
                    (Some(url), _) => url.clone(),
                    (None, Some(origin)) => format!("{}{}", origin.trim_end_matches('/'), path),
                    (None, None) => {
                        return Err(RelayError::style_reference(
                            "request origin unknown and no style URL configured",
                        ));
                    }
                };
                fetch_remote(client, &target).await.map(Some)
            }
            Self::Local { path } => {
                let bytes = tokio::fs::read(path).await.map_err(|e| {
                    RelayError::style_reference(format!("failed to read {:?}: {}", path, e))
                })?;
                debug!(path = ?path, bytes = bytes.len(), "Loaded local style reference");
                Ok(Some(ImagePart::new(bytes, STYLE_FILENAME, STYLE_MIME)))
            }
            Self::Disabled => Ok(None),
        }
    }
}

async fn fetch_remote(client: &reqwest::Client, url: &str) -> Result<ImagePart> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| RelayError::style_reference(format!("failed to fetch {}: {}", url, e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(RelayError::style_reference(format!(
            "{} returned status {}",
            url,
            status.as_u16()
        )));
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .filter(|v| v.starts_with("image/"))
        .unwrap_or(STYLE_MIME)
        .to_string();

    let bytes = response
        .bytes()
        .await
        .map_err(|e| RelayError::style_reference(format!("failed to read {}: {}", url, e)))?;

    debug!(url = %url, bytes = bytes.len(), "Fetched remote style reference");
    Ok(ImagePart::new(bytes, STYLE_FILENAME, content_type))
}
