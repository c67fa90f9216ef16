//! Image upload handler.

use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartRejection},
};

use crate::{
    AppState, error::AppError, models::file::UploadResponse, services::file_service,
};

/// Upload a product or payment-proof image.
///
/// # Endpoint
///
/// `POST /v1/image` (multipart/form-data, field `file`)
///
/// # Response
///
/// - **Success (200 OK)**: `{"imageUrl": "https://<bucket>.s3.amazonaws.com/<key>"}`
/// - **Error (400)**: missing field, not a .jpg/.jpeg, or size outside 10KB..2MB
/// - **Error (500)**: storage not configured or upload failed
pub async fn upload_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    let mut multipart =
        multipart.map_err(|e| AppError::InvalidRequest(format!("invalid form data: {}", e)))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidRequest(format!("invalid form data: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let body = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidRequest(format!("invalid file: {}", e)))?;

        let response =
            file_service::upload_image(state.storage.as_deref(), &file_name, body.to_vec())
                .await?;
        return Ok(Json(response));
    }

    Err(AppError::InvalidRequest("file is required".to_string()))
}
