//! Plush image endpoint
//!
//! Accepts multipart/form-data with `file` (required), `bg` and `size`.

use crate::core::{RelayImage, RelayRequest, Upload};
use crate::server::routes::ALLOW_METHODS;
use crate::server::state::AppState;
use crate::utils::error::{RelayError, Result};
use crate::utils::{request_id_from, truncate_string};
use actix_multipart::{Field, Multipart};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::{HttpRequest, HttpResponse, ResponseError, web};
use futures::StreamExt;
use tracing::{error, info, warn};

/// Form fields the endpoint understands
#[derive(Debug, Default)]
pub struct PlushyForm {
    pub file: Option<Upload>,
    pub bg: Option<String>,
    pub size: Option<String>,
}

/// Create a plush version of the uploaded image
pub async fn edit_image(
    state: web::Data<AppState>,
    req: HttpRequest,
    payload: Multipart,
) -> HttpResponse {
    let request_id = request_id_from(&req);

    let mut response = match relay(&state, &req, payload, &request_id).await {
        Ok(image) => HttpResponse::Ok().json(image),
        Err(e) => {
            log_failure(&request_id, &e);
            e.error_response()
        }
    };

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static("x-request-id"), value);
    }
    response
}

async fn relay(
    state: &AppState,
    req: &HttpRequest,
    payload: Multipart,
    request_id: &str,
) -> Result<RelayImage> {
    let form = read_form(payload, state.config.server().max_body_size).await?;
    info!(
        request_id = %request_id,
        has_file = form.file.is_some(),
        "Plushy request"
    );

    let request = RelayRequest {
        file: form.file,
        bg: form.bg,
        size: form.size,
        origin: Some(request_origin(req)),
        request_id: request_id.to_string(),
    };
    state.relay.handle(request).await
}

/// CORS preflight, always `204` with an empty body
pub async fn preflight(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::NoContent()
        .insert_header((ALLOW_METHODS, state.config.server().cors.allowed_methods.clone()))
        .finish()
}

/// Drain the multipart body into a [`PlushyForm`]
///
/// Unknown fields are read and discarded. The total number of bytes read is
/// capped at `limit`.
pub async fn read_form(mut payload: Multipart, limit: usize) -> Result<PlushyForm> {
    let mut form = PlushyForm::default();
    let mut budget = limit;

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| RelayError::invalid_form(e.to_string()))?;

        let field_name = match field.name() {
            Some(name) => name.to_string(),
            None => {
                read_field(&mut field, &mut budget).await?;
                continue;
            }
        };

        match field_name.as_str() {
            "file" => {
                let filename = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename())
                    .map(str::to_string);
                let content_type = field.content_type().map(|mime| mime.to_string());
                let data = read_field(&mut field, &mut budget).await?;
                form.file = Some(Upload::new(data, filename, content_type));
            }
            "bg" => {
                let data = read_field(&mut field, &mut budget).await?;
                form.bg = Some(String::from_utf8_lossy(&data).to_string());
            }
            "size" => {
                let data = read_field(&mut field, &mut budget).await?;
                form.size = Some(String::from_utf8_lossy(&data).to_string());
            }
            _ => {
                read_field(&mut field, &mut budget).await?;
            }
        }
    }

    Ok(form)
}

async fn read_field(field: &mut Field, budget: &mut usize) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    while let Some(chunk) = field.next().await {
        let bytes = chunk.map_err(|e| RelayError::invalid_form(e.to_string()))?;
        *budget = budget
            .checked_sub(bytes.len())
            .ok_or_else(|| RelayError::invalid_form("payload too large"))?;
        data.extend_from_slice(&bytes);
    }
    Ok(data)
}

fn request_origin(req: &HttpRequest) -> String {
    let info = req.connection_info();
    format!("{}://{}", info.scheme(), info.host())
}

fn log_failure(request_id: &str, e: &RelayError) {
    let status = e.status_code();
    let detail = match e {
        RelayError::Provider { body, .. } | RelayError::AccessDenied { body } => {
            truncate_string(body, 200)
        }
        _ => e.to_string(),
    };

    if status.is_client_error() {
        warn!(request_id = %request_id, status = status.as_u16(), error = %detail, "Plushy request rejected");
    } else {
        error!(request_id = %request_id, status = status.as_u16(), error = %detail, "Plushy request failed");
    }
}
