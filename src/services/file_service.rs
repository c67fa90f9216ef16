//! Image upload rules.

use uuid::Uuid;

use crate::{error::AppError, models::file::UploadResponse, services::storage::ImageStore};

/// Smallest accepted upload (10 KiB).
pub const MIN_IMAGE_BYTES: usize = 10 * 1024;
/// Largest accepted upload (2 MiB).
pub const MAX_IMAGE_BYTES: usize = 2 * 1024 * 1024;

const ALLOWED_EXTENSIONS: [&str; 2] = ["jpg", "jpeg"];

/// Validate an uploaded image and store it under a fresh key.
///
/// # Errors
///
/// - `InvalidRequest`: wrong extension or size out of range
/// - `Storage`: no storage is configured or the backend rejected the object
pub async fn upload_image(
    store: Option<&dyn ImageStore>,
    file_name: &str,
    body: Vec<u8>,
) -> Result<UploadResponse, AppError> {
    let extension = image_extension(file_name)?;
    check_size(body.len())?;

    let store = store.ok_or_else(|| AppError::Storage("image storage is not configured".into()))?;

    let key = format!("{}.{}", Uuid::new_v4(), extension);
    let size = body.len();
    let image_url = store.put_object(&key, body, "image/jpeg").await?;

    tracing::info!(key = %key, size, "image_uploaded");

    Ok(UploadResponse { image_url })
}

/// Lowercased extension of an accepted file name.
fn image_extension(file_name: &str) -> Result<String, AppError> {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
        .ok_or_else(|| {
            AppError::InvalidRequest("file must be a .jpg or .jpeg image".to_string())
        })?;

    Ok(extension)
}

fn check_size(size: usize) -> Result<(), AppError> {
    if !(MIN_IMAGE_BYTES..=MAX_IMAGE_BYTES).contains(&size) {
        return Err(AppError::InvalidRequest(
            "file size must be between 10KB and 2MB".to_string(),
        ));
    }
    Ok(())
}
