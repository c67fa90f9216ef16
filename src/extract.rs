//! Request extractors shared by the handlers.

use axum::extract::FromRequest;
use uuid::Uuid;

use crate::error::AppError;

/// JSON body extractor whose rejections are reported as `AppError`.
///
/// Axum's own `Json` answers type mismatches with 422; this wrapper keeps
/// every malformed body on the 400 `invalid_request` path.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Parse a path segment as a resource id.
///
/// Malformed ids cannot name an existing row, so they are reported as
/// not found rather than as a bad request.
pub fn parse_id(raw: &str, resource: &'static str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound(resource))
}
