//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Postgres SQLSTATE for a unique constraint violation.
const UNIQUE_VIOLATION: &str = "23505";
/// Postgres SQLSTATE for a foreign key violation.
const FOREIGN_KEY_VIOLATION: &str = "23503";
/// Postgres SQLSTATE for malformed input such as a non-uuid id.
const INVALID_TEXT_REPRESENTATION: &str = "22P02";

/// Application-wide error type.
///
/// Each variant maps to a specific HTTP status code and error code.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed (connection error, query error, ...).
    ///
    /// Constraint violations are translated into the more specific variants
    /// by the `From<sqlx::Error>` implementation below.
    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),

    /// Bearer token is missing, malformed, expired or badly signed.
    ///
    /// Returns HTTP 401 Unauthorized.
    #[error("Invalid or missing access token")]
    InvalidToken,

    /// The caller is authenticated but does not own the resource.
    ///
    /// Returns HTTP 403 Forbidden.
    #[error("You are not allowed to access this resource")]
    Forbidden,

    /// Requested resource does not exist.
    ///
    /// Returns HTTP 404 Not Found. The string names the resource.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// A uniqueness rule was violated (e.g. username already taken).
    ///
    /// Returns HTTP 409 Conflict.
    #[error("{0}")]
    Conflict(String),

    /// Request body or parameters are invalid.
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("{0}")]
    InvalidRequest(String),

    /// Image storage is unavailable or rejected the upload.
    ///
    /// Returns HTTP 500 Internal Server Error.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Unexpected failure that is not the client's fault.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => AppError::NotFound("Resource"),
            sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
                Some(UNIQUE_VIOLATION) => AppError::Conflict(match db_err.constraint() {
                    Some(constraint) => format!("Duplicate value violates {}", constraint),
                    None => "Duplicate value".to_string(),
                }),
                Some(INVALID_TEXT_REPRESENTATION) => AppError::NotFound("Resource"),
                Some(FOREIGN_KEY_VIOLATION) => {
                    AppError::InvalidRequest("Referenced resource does not exist".to_string())
                }
                _ => AppError::Database(err),
            },
            _ => AppError::Database(err),
        }
    }
}

/// Malformed or mistyped JSON bodies are a client error, always 400.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

impl AppError {
    /// Status code and machine-readable error code for this error.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "invalid_token"),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "forbidden"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
            AppError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            AppError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "storage_error"),
            AppError::Database(_) | AppError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        }
    }
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
///
/// Server-side failures are logged and answered with a generic message so
/// driver details never reach the client.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            "An internal error occurred".to_string()
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_error_kind() {
        let cases = [
            (AppError::InvalidToken, StatusCode::UNAUTHORIZED),
            (AppError::Forbidden, StatusCode::FORBIDDEN),
            (AppError::NotFound("Product"), StatusCode::NOT_FOUND),
            (AppError::Conflict("taken".into()), StatusCode::CONFLICT),
            (AppError::InvalidRequest("bad".into()), StatusCode::BAD_REQUEST),
            (AppError::Storage("down".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn row_not_found_becomes_not_found() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn pool_errors_stay_database_errors() {
        let err: AppError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, AppError::Database(_)));
    }

    #[tokio::test]
    async fn internal_details_are_hidden() {
        let response = AppError::Internal("secret detail".into()).into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["error"]["code"], "internal_error");
        assert_eq!(body["error"]["message"], "An internal error occurred");
    }

    #[tokio::test]
    async fn not_found_names_the_resource() {
        let response = AppError::NotFound("Bank account").into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["error"]["message"], "Bank account not found");
    }
}
