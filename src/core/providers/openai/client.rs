//! OpenAI image edit client

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::image_edit::build_edit_form;
use crate::config::ProviderConfig;
use crate::core::providers::ImageEditProvider;
use crate::core::providers::types::{ImageEditRequest, ImageEditResponse, ProviderReply};
use crate::utils::error::{RelayError, Result};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for `POST {api_base}/images/edits`
#[derive(Debug, Clone)]
pub struct OpenAIImageClient {
    client: reqwest::Client,
    config: ProviderConfig,
}

impl OpenAIImageClient {
    /// Create a client for the configured provider
    ///
    /// No overall request timeout is set here; the relay bounds each call
    /// with its own deadline.
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;
        Ok(Self { client, config })
    }

    async fn send(&self, request: ImageEditRequest) -> Result<ProviderReply> {
        let url = self.config.edits_url();
        let image_count = request.images.len();
        let form = build_edit_form(request, &self.config.image_field)?;

        debug!(url = %url, images = image_count, "Sending image edit request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().await?;

        if !status.is_success() {
            debug!(status = status.as_u16(), "Provider returned an error status");
            return Ok(ProviderReply::Failure {
                status: status.as_u16(),
                body,
                content_type,
            });
        }

        match serde_json::from_str::<ImageEditResponse>(&body) {
            Ok(parsed) => Ok(ProviderReply::Success(parsed)),
            Err(e) => {
                warn!(error = %e, "Provider success body is not valid JSON");
                Err(RelayError::MissingImage)
            }
        }
    }
}

#[async_trait]
impl ImageEditProvider for OpenAIImageClient {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn edit_image(
        &self,
        request: ImageEditRequest,
        cancel: CancellationToken,
    ) -> Result<ProviderReply> {
        tokio::select! {
            _ = cancel.cancelled() => Err(RelayError::Cancelled),
            reply = self.send(request) => reply,
        }
    }
}
