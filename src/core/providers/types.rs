//! Provider request and response types

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// One image attached to a provider request
#[derive(Debug, Clone)]
pub struct ImagePart {
    pub bytes: Bytes,
    pub filename: String,
    pub content_type: String,
}

impl ImagePart {
    pub fn new(
        bytes: impl Into<Bytes>,
        filename: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            bytes: bytes.into(),
            filename: filename.into(),
            content_type: content_type.into(),
        }
    }
}

/// Outbound image edit request
#[derive(Debug, Clone)]
pub struct ImageEditRequest {
    /// Image model identifier
    pub model: String,
    /// Reference images, in the order they are attached
    pub images: Vec<ImagePart>,
    /// Text prompt
    pub prompt: String,
    /// Output size, e.g. `1024x1024`
    pub size: String,
}

/// Image edit response body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageEditResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,
    #[serde(default)]
    pub data: Vec<ImageData>,
}

/// Image data in response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub b64_json: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revised_prompt: Option<String>,
}

impl ImageEditResponse {
    /// Base64 payload of the first result entry, if it has a non-empty one
    pub fn first_b64(&self) -> Option<&str> {
        self.data
            .first()
            .and_then(|entry| entry.b64_json.as_deref())
            .filter(|payload| !payload.trim().is_empty())
    }
}

/// What the provider answered
#[derive(Debug, Clone)]
pub enum ProviderReply {
    /// 2xx with a parsed body
    Success(ImageEditResponse),
    /// Any other status, body kept verbatim
    Failure {
        status: u16,
        body: String,
        content_type: Option<String>,
    },
}
