//! Image edit request encoding

use reqwest::multipart;

use crate::core::providers::types::{ImageEditRequest, ImagePart};
use crate::utils::error::{RelayError, Result};

/// Build the multipart body for `/images/edits`
///
/// Field order: `model`, every image under `image_field` in request order,
/// `prompt`, `size`. A request with no images is encoded as-is.
pub fn build_edit_form(request: ImageEditRequest, image_field: &str) -> Result<multipart::Form> {
    let mut form = multipart::Form::new().text("model", request.model);

    for image in request.images {
        form = form.part(image_field.to_string(), image_part(image)?);
    }

    form = form.text("prompt", request.prompt);
    form = form.text("size", request.size);

    Ok(form)
}

fn image_part(image: ImagePart) -> Result<multipart::Part> {
    multipart::Part::bytes(image.bytes.to_vec())
        .file_name(image.filename)
        .mime_str(&image.content_type)
        .map_err(|e| RelayError::internal(format!("Invalid MIME type: {}", e)))
}
