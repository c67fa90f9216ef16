//! Image upload response.

use serde::Serialize;

/// Body of `POST /v1/image`.
///
/// ```json
/// { "imageUrl": "https://my-bucket.s3.amazonaws.com/5b0e...c1.jpg" }
/// ```
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub image_url: String,
}
