//! The image edit relay
//!
//! One inbound request becomes at most one style fetch and exactly one
//! provider call. Every outcome is either a [`RelayImage`] or a
//! [`RelayError`] that the HTTP layer turns into a response.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::deadline::run_with_deadline;
use super::prompt::{PromptTemplate, resolve_params};
use super::providers::{
    ImageEditProvider, ImageEditRequest, ImagePart, OpenAIImageClient, ProviderReply,
};
use super::style::StyleReferenceLoader;
use crate::config::{PromptConfig, RelayConfig};
use crate::utils::error::{RelayError, Result};

const DEFAULT_UPLOAD_FILENAME: &str = "logo.png";
const DEFAULT_UPLOAD_MIME: &str = "image/png";

/// The caller's uploaded image
#[derive(Debug, Clone)]
pub struct Upload {
    pub bytes: Bytes,
    pub filename: String,
    pub content_type: String,
}

impl Upload {
    /// Build an upload, filling in a filename and an image MIME type when the
    /// client sent none (or only `application/octet-stream`)
    pub fn new(
        bytes: impl Into<Bytes>,
        filename: Option<String>,
        content_type: Option<String>,
    ) -> Self {
        let filename = filename
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_UPLOAD_FILENAME.to_string());
        let content_type = content_type
            .filter(|mime| !mime.is_empty() && mime != "application/octet-stream")
            .unwrap_or_else(|| mime_from_filename(&filename).to_string());

        Self {
            bytes: bytes.into(),
            filename,
            content_type,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    fn into_part(self) -> ImagePart {
        ImagePart::new(self.bytes, self.filename, self.content_type)
    }
}

fn mime_from_filename(filename: &str) -> &'static str {
    let extension = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => DEFAULT_UPLOAD_MIME,
    }
}

/// A parsed inbound request
#[derive(Debug, Clone, Default)]
pub struct RelayRequest {
    pub file: Option<Upload>,
    pub bg: Option<String>,
    pub size: Option<String>,
    /// Scheme and host the request was addressed to
    pub origin: Option<String>,
    pub request_id: String,
}

/// Successful relay result, serialized as the 200 body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelayImage {
    pub image: String,
}

impl RelayImage {
    /// Wrap a base64 PNG payload in a data URI
    pub fn from_b64(payload: &str) -> Self {
        Self {
            image: format!("data:image/png;base64,{}", payload),
        }
    }
}

/// Translates one upload into one provider image edit call
pub struct ImageEditRelay {
    provider: Arc<dyn ImageEditProvider>,
    style: StyleReferenceLoader,
    prompt: PromptConfig,
    template: PromptTemplate,
    model: String,
    deadline: Option<Duration>,
    diagnose_access_denied: bool,
}

impl std::fmt::Debug for ImageEditRelay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageEditRelay")
            .field("provider", &self.provider.name())
            .field("style", &self.style)
            .field("model", &self.model)
            .field("deadline", &self.deadline)
            .finish()
    }
}

impl ImageEditRelay {
    /// Build the relay with the OpenAI client
    pub fn from_config(config: &RelayConfig) -> Result<Self> {
        let client = OpenAIImageClient::new(config.provider.clone())?;
        Self::new(config, Arc::new(client))
    }

    /// Build the relay around any provider
    pub fn new(config: &RelayConfig, provider: Arc<dyn ImageEditProvider>) -> Result<Self> {
        Ok(Self {
            provider,
            style: StyleReferenceLoader::from_config(&config.style)?,
            prompt: config.prompt.clone(),
            template: PromptTemplate::from(&config.prompt),
            model: config.provider.model.clone(),
            deadline: config.provider.deadline(),
            diagnose_access_denied: config.provider.diagnose_access_denied,
        })
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Handle one request
    pub async fn handle(&self, request: RelayRequest) -> Result<RelayImage> {
        let upload = request
            .file
            .filter(|upload| !upload.is_empty())
            .ok_or(RelayError::MissingFile)?;

        let (bg, size) = resolve_params(
            &self.prompt,
            request.bg.as_deref(),
            request.size.as_deref(),
        );

        let style = self.style.load(request.origin.as_deref()).await?;
        let prompt = self.template.render(&bg, &size);

        let mut images = Vec::with_capacity(2);
        images.extend(style);
        images.push(upload.into_part());

        debug!(
            request_id = %request.request_id,
            bg = %bg,
            size = %size,
            images = images.len(),
            "Prepared image edit request"
        );

        let edit = ImageEditRequest {
            model: self.model.clone(),
            images,
            prompt,
            size,
        };

        let cancel = CancellationToken::new();
        let reply = run_with_deadline(
            self.deadline,
            &cancel,
            self.provider.edit_image(edit, cancel.clone()),
        )
        .await?;

        let image = self.finish(reply)?;
        info!(
            request_id = %request.request_id,
            provider = self.provider.name(),
            "Image edit completed"
        );
        Ok(image)
    }

    fn finish(&self, reply: ProviderReply) -> Result<RelayImage> {
        match reply {
            ProviderReply::Success(response) => response
                .first_b64()
                .map(RelayImage::from_b64)
                .ok_or(RelayError::MissingImage),
            ProviderReply::Failure { status: 403, body, .. } if self.diagnose_access_denied => {
                Err(RelayError::AccessDenied { body })
            }
            ProviderReply::Failure {
                status,
                body,
                content_type,
            } => Err(RelayError::provider(status, body, content_type)),
        }
    }
}
