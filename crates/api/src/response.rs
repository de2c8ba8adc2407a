//! Shared response envelope for API handlers.
//!
//! All successful responses use a `{ "status": "success", "message": ...,
//! "data": ... }` envelope. Use [`ApiResponse`] instead of ad-hoc
//! `serde_json::json!` blocks to get compile-time type safety and
//! consistent serialization.

use serde::Serialize;

/// Standard success envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(ApiResponse::new("Workspace created", workspace)))
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub status: &'static str,
    pub message: String,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            status: "success",
            message: message.into(),
            data,
        }
    }
}
