//! Request logging middleware for tracing and monitoring

use axum::{extract::Request, middleware::Next, response::Response};
use http::HeaderValue;
use std::time::Instant;
use tracing::{Instrument, info, warn};

/// Header carrying the request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Header carrying the handling time in milliseconds
pub const RESPONSE_TIME_HEADER: &str = "x-response-time";

/// Tag each request with an id, log its outcome, and report timing headers
pub async fn request_logging_middleware(request: Request, next: Next) -> Response {
    let start_time = Instant::now();
    let method = request.method().clone();
    let uri = request.uri().clone();

    // Extract request ID if present, otherwise generate one
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .map_or_else(generate_request_id, String::from);

    let span = tracing::info_span!(
        "request",
        method = %method,
        uri = %uri,
        request_id = %request_id,
    );

    let mut response = next.run(request).instrument(span.clone()).await;

    let elapsed = start_time.elapsed();
    let status = response.status();
    span.in_scope(|| {
        if status.is_client_error() || status.is_server_error() {
            warn!(status = %status, elapsed = ?elapsed, "Request completed with error");
        } else {
            info!(status = %status, elapsed = ?elapsed, "Request completed");
        }
    });

    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        headers.insert(REQUEST_ID_HEADER, value);
    }
    headers.insert(
        RESPONSE_TIME_HEADER,
        HeaderValue::from(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)),
    );

    response
}

/// Generate a unique request ID for tracing
fn generate_request_id() -> String {
    format!("req_{}", uuid::Uuid::new_v4().simple())
}
