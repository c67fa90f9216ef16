//! JSON envelopes shared by every successful response.

use serde::Serialize;

/// `{"message": "...", "data": ...}`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

/// Pagination metadata. `total` counts every row matching the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Meta {
    pub limit: i64,
    pub offset: i64,
    pub total: i64,
}

/// `{"message": "ok", "data": [...], "meta": {...}}`
#[derive(Debug, Serialize)]
pub struct PageResponse<T> {
    pub message: String,
    pub data: Vec<T>,
    pub meta: Meta,
}

impl<T> PageResponse<T> {
    pub fn ok(data: Vec<T>, meta: Meta) -> Self {
        Self {
            message: "ok".to_string(),
            data,
            meta,
        }
    }
}
