//! HTTP request handlers

pub mod health;
pub mod pages;
pub mod sessions;
pub mod stats;
pub mod tickets;

use axum::{http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};
use ticketdesk_core::{Error, TicketId};
use ticketdesk_store::SessionId;
use tracing::{error, warn};

/// Error response body shared by every endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Additional details
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// Build a response body without details
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
            details: None,
        }
    }
}

/// Rejection type returned by handlers
pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Handler result
pub type ApiResult<T> = Result<T, ApiError>;

/// Map a domain error onto an HTTP status and error code
pub fn api_error(err: Error) -> ApiError {
    let (status, code) = match &err {
        Error::Validation { .. } | Error::DataIntegrity(_) => {
            (StatusCode::BAD_REQUEST, "VALIDATION_FAILED")
        }
        Error::InvalidTicketId { .. } => (StatusCode::BAD_REQUEST, "INVALID_TICKET_ID"),
        Error::NotFound { resource } => (StatusCode::NOT_FOUND, not_found_code(resource)),
        Error::ResourceExhausted { .. } => (StatusCode::SERVICE_UNAVAILABLE, "RESOURCE_EXHAUSTED"),
        Error::Configuration { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
    };

    if status.is_server_error() {
        error!(code, "Request failed: {}", err);
    } else {
        warn!(code, "Request rejected: {}", err);
    }

    let details = match &err {
        Error::Validation { field, .. } => Some(serde_json::json!({ "field": field })),
        _ => None,
    };

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            code: code.to_string(),
            details,
        }),
    )
}

fn not_found_code(resource: &str) -> &'static str {
    match resource.split_whitespace().next() {
        Some("session") => "SESSION_NOT_FOUND",
        Some("ticket") => "TICKET_NOT_FOUND",
        _ => "NOT_FOUND",
    }
}

/// Parse a session id path segment
///
/// A malformed id cannot name a live session, so it is reported the same
/// way as an unknown one.
pub fn parse_session_id(raw: &str) -> ApiResult<SessionId> {
    raw.parse().map_err(|_| {
        api_error(Error::NotFound {
            resource: format!("session {raw}"),
        })
    })
}

/// Parse a `TICKET-<n>` path segment
pub fn parse_ticket_id(raw: &str) -> ApiResult<TicketId> {
    raw.parse().map_err(api_error)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(Error::validation("issue", "must not be blank"), StatusCode::BAD_REQUEST, "VALIDATION_FAILED")]
    #[case(Error::InvalidTicketId { input: "X".into() }, StatusCode::BAD_REQUEST, "INVALID_TICKET_ID")]
    #[case(Error::NotFound { resource: "session abc".into() }, StatusCode::NOT_FOUND, "SESSION_NOT_FOUND")]
    #[case(Error::NotFound { resource: "ticket TICKET-9".into() }, StatusCode::NOT_FOUND, "TICKET_NOT_FOUND")]
    #[case(Error::ResourceExhausted { resource: "sessions".into() }, StatusCode::SERVICE_UNAVAILABLE, "RESOURCE_EXHAUSTED")]
    #[case(Error::Configuration { message: "boom".into() }, StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")]
    fn test_error_mapping(#[case] err: Error, #[case] status: StatusCode, #[case] code: &str) {
        let (actual_status, Json(body)) = api_error(err);

        assert_eq!(actual_status, status);
        assert_eq!(body.code, code);
    }

    #[test]
    fn test_validation_error_carries_field() {
        let (_, Json(body)) = api_error(Error::validation("issue", "must not be blank"));

        assert_eq!(body.details, Some(serde_json::json!({ "field": "issue" })));
    }

    #[test]
    fn test_malformed_session_id_is_not_found() {
        let (status, Json(body)) = parse_session_id("not-a-uuid").unwrap_err();

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.code, "SESSION_NOT_FOUND");
    }

    #[test]
    fn test_parse_ticket_id() {
        assert_eq!(parse_ticket_id("TICKET-1050").unwrap(), TicketId::new(1050));
        assert_eq!(parse_ticket_id("1050").unwrap_err().0, StatusCode::BAD_REQUEST);
        assert_eq!(parse_ticket_id("TICKET-01050").unwrap_err().0, StatusCode::BAD_REQUEST);
    }
}
