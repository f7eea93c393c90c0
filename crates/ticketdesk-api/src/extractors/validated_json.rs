//! JSON body extractor that also runs `validator` rules

use crate::extractors::ExtractorError;
use axum::{
    Json, async_trait,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Validated JSON extractor that combines JSON parsing with validation
///
/// Unknown enum labels (a status of `"Pending"`, say) fail at the parsing
/// step, so they never reach a handler.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = ExtractorError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await.map_err(|err| {
            ExtractorError::invalid_request(format!("Invalid JSON: {}", err.body_text()))
        })?;

        data.validate().map_err(|validation_errors| {
            ExtractorError::validation_failed("Validation failed")
                .with_details(serde_json::json!(validation_errors))
        })?;

        Ok(Self(data))
    }
}

impl<T> std::ops::Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode};
    use pretty_assertions::assert_eq;
    use ticketdesk_core::{NewTicket, TicketPriority};

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_accepts_valid_body() {
        let ValidatedJson(form) = ValidatedJson::<NewTicket>::from_request(
            json_request(r#"{"issue":"VPN down","priority":"Medium"}"#),
            &(),
        )
        .await
        .unwrap();

        assert_eq!(form.issue, "VPN down");
        assert_eq!(form.priority, TicketPriority::Medium);
    }

    #[tokio::test]
    async fn test_rejects_unknown_priority_as_invalid_request() {
        let err = ValidatedJson::<NewTicket>::from_request(
            json_request(r#"{"issue":"VPN down","priority":"Urgent"}"#),
            &(),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "INVALID_REQUEST");
    }

    #[tokio::test]
    async fn test_rejects_blank_issue_as_validation_failure() {
        let err = ValidatedJson::<NewTicket>::from_request(
            json_request(r#"{"issue":"   ","priority":"High"}"#),
            &(),
        )
        .await
        .unwrap_err();

        assert_eq!(err.code, "VALIDATION_FAILED");
        assert!(err.details.unwrap().get("issue").is_some());
    }
}
