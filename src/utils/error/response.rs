//! HTTP response handling for errors

use super::types::RelayError;
use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};

const PROVIDER_ERROR_FALLBACK: &str = "Provider error";
const SERVER_ERROR_FALLBACK: &str = "Server error";

impl ResponseError for RelayError {
    fn status_code(&self) -> StatusCode {
        match self {
            RelayError::MissingFile | RelayError::InvalidForm(_) => StatusCode::BAD_REQUEST,
            RelayError::Provider { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            RelayError::AccessDenied { .. } => StatusCode::FORBIDDEN,
            RelayError::MissingImage => StatusCode::BAD_GATEWAY,
            RelayError::DeadlineExceeded(_) => StatusCode::GATEWAY_TIMEOUT,
            RelayError::Config(_)
            | RelayError::StyleReference(_)
            | RelayError::Cancelled
            | RelayError::HttpClient(_)
            | RelayError::Serialization(_)
            | RelayError::Yaml(_)
            | RelayError::Io(_)
            | RelayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        match self {
            RelayError::Provider {
                body, content_type, ..
            } => {
                if body.trim().is_empty() {
                    return plain_text(status, PROVIDER_ERROR_FALLBACK.to_string());
                }
                let mut builder = HttpResponse::build(status);
                match content_type {
                    Some(content_type) => {
                        builder.insert_header(("content-type", content_type.as_str()));
                    }
                    None => {
                        builder.content_type(ContentType::plaintext());
                    }
                }
                builder.body(body.clone())
            }
            RelayError::AccessDenied { body } => {
                HttpResponse::build(status).json(AccessDeniedDiagnostic::from_provider_body(body))
            }
            RelayError::DeadlineExceeded(limit) => {
                HttpResponse::build(status).json(DeadlineExceededBody {
                    error: format!(
                        "The image provider did not respond within {} seconds. Please try again.",
                        limit.as_secs()
                    ),
                    timeout_secs: limit.as_secs(),
                })
            }
            RelayError::StyleReference(_) => {
                plain_text(status, "Style reference not found".to_string())
            }
            RelayError::MissingFile | RelayError::InvalidForm(_) | RelayError::MissingImage => {
                plain_text(status, self.to_string())
            }
            _ => {
                let message = self.to_string();
                if message.trim().is_empty() {
                    plain_text(status, SERVER_ERROR_FALLBACK.to_string())
                } else {
                    plain_text(status, message)
                }
            }
        }
    }
}

fn plain_text(status: StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(ContentType::plaintext())
        .body(body)
}

/// Structured body returned instead of the raw provider text on a 403
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessDeniedDiagnostic {
    pub error: String,
    pub status: u16,
    pub likely_causes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_message: Option<String>,
}

impl AccessDeniedDiagnostic {
    /// Build the diagnostic, lifting `error.message` out of a JSON provider body
    pub fn from_provider_body(body: &str) -> Self {
        let provider_message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| {
                value
                    .pointer("/error/message")
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .or_else(|| {
                let trimmed = body.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            });

        Self {
            error: "The image provider rejected the request (403 Forbidden)".to_string(),
            status: 403,
            likely_causes: vec![
                "The API key is missing, revoked, or belongs to a different project".to_string(),
                "The account has no active billing or has run out of credit".to_string(),
                "The organization is not verified for access to the configured image model"
                    .to_string(),
            ],
            provider_message,
        }
    }
}

/// Body returned when the provider call hits the deadline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeadlineExceededBody {
    pub error: String,
    pub timeout_secs: u64,
}
