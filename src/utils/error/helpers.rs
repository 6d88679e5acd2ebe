//! Helper functions for creating specific error types

use super::types::RelayError;

impl RelayError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn invalid_form<S: Into<String>>(message: S) -> Self {
        Self::InvalidForm(message.into())
    }

    pub fn style_reference<S: Into<String>>(message: S) -> Self {
        Self::StyleReference(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Build the error for a non-success provider reply
    pub fn provider<S: Into<String>>(status: u16, body: S, content_type: Option<String>) -> Self {
        Self::Provider {
            status,
            body: body.into(),
            content_type,
        }
    }

    /// Whether the failure was caused by the caller's input
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::MissingFile | Self::InvalidForm(_))
    }
}
