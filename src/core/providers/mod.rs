//! Image edit providers
//!
//! The relay talks to providers through [`ImageEditProvider`]; the OpenAI
//! client is the only production implementation.

pub mod openai;
pub mod types;

pub use openai::OpenAIImageClient;
pub use types::{ImageData, ImageEditRequest, ImageEditResponse, ImagePart, ProviderReply};

use crate::utils::error::Result;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// An external image edit service
#[async_trait]
pub trait ImageEditProvider: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &'static str;

    /// Send one edit request
    ///
    /// Non-success statuses are returned as [`ProviderReply::Failure`], not as
    /// errors. `cancel` is cancelled when the relay gives up on the call.
    /// The relay drops this future before cancelling, so returning
    /// [`RelayError::Cancelled`](crate::utils::error::RelayError::Cancelled)
    /// only reaches callers that hold the token themselves.
    async fn edit_image(
        &self,
        request: ImageEditRequest,
        cancel: CancellationToken,
    ) -> Result<ProviderReply>;
}
