//! Handler for `POST /admin/upload-image` and stored-image checks shared by
//! the content handlers.

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use sitecms_core::error::CoreError;
use sitecms_core::images::upload_extension;

use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::storage::ImageStore;

/// Multipart field carrying the image.
const IMAGE_FIELD: &str = "image";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Reference to store in content rows, e.g. `/uploads/<uuid>.jpg`.
    pub url: String,
}

/// POST /api/v1/admin/upload-image
///
/// Accepts a multipart form with a required `image` field. The body size is
/// capped by the route's `DefaultBodyLimit`.
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<UploadResponse>)> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(multipart_error)?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("").to_string();
        let data = field
            .bytes()
            .await
            .map_err(multipart_error)?;
        upload = Some((file_name, data.to_vec()));
    }

    let (file_name, data) =
        upload.ok_or_else(|| AppError::BadRequest("Missing required 'image' field".into()))?;
    if data.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Uploaded image is empty".into(),
        )));
    }
    let ext = upload_extension(&file_name)?;

    let url = state
        .images
        .save(&ext, &data)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to store image: {e}")))?;

    tracing::info!(url = %url, size = data.len(), "Image uploaded");
    Ok((StatusCode::CREATED, Json(UploadResponse { url })))
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("Image exceeds the upload limit: {}", err.body_text()))
    } else {
        AppError::BadRequest(err.body_text())
    }
}

/// Fail with a validation error unless every reference names a stored file.
pub(crate) async fn ensure_stored<'a, I>(store: &ImageStore, field: &str, references: I) -> AppResult<()>
where
    I: IntoIterator<Item = &'a String>,
{
    for reference in references {
        if !store.exists(reference).await {
            return Err(AppError::Core(CoreError::Validation(format!(
                "'{field}' references an image that was not uploaded: {reference}"
            ))));
        }
    }
    Ok(())
}
