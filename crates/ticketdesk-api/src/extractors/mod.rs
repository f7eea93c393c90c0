//! Custom extractors for request processing

pub mod sort;
pub mod validated_json;

pub use sort::SortParams;
pub use validated_json::ValidatedJson;

use crate::handlers::ErrorResponse;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

/// Custom error type for extractors
#[derive(Debug)]
pub struct ExtractorError {
    /// Error message
    pub message: String,
    /// HTTP status code
    pub status: StatusCode,
    /// Error code for API responses
    pub code: String,
    /// Additional context
    pub details: Option<serde_json::Value>,
}

impl ExtractorError {
    /// Create a new extractor error
    pub fn new(message: impl Into<String>, status: StatusCode, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status,
            code: code.into(),
            details: None,
        }
    }

    /// Malformed body or query string
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(message, StatusCode::BAD_REQUEST, "INVALID_REQUEST")
    }

    /// Well-formed input that breaks a field rule
    pub fn validation_failed(message: impl Into<String>) -> Self {
        Self::new(message, StatusCode::BAD_REQUEST, "VALIDATION_FAILED")
    }

    /// Attach structured details
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl fmt::Display for ExtractorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ExtractorError {}

impl IntoResponse for ExtractorError {
    fn into_response(self) -> Response {
        tracing::warn!(code = %self.code, "Rejected request: {}", self.message);

        let response = ErrorResponse {
            error: self.message,
            code: self.code,
            details: self.details,
        };

        (self.status, Json(response)).into_response()
    }
}
