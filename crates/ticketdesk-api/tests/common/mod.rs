//! Shared helpers for API integration tests

#![allow(dead_code, clippy::unwrap_used, clippy::missing_panics_doc)]

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use serde_json::Value;
use std::sync::Once;
use ticketdesk_core::Config;
use tower::ServiceExt;

static INIT_LOGGER: Once = Once::new();

/// Initialize test logging (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .try_init();
    });
}

/// Router over a fresh registry
pub fn test_app(config: Config) -> Router {
    init_test_logging();
    ticketdesk_api::build_router(config).unwrap()
}

/// Send one request and decode the JSON response (`Null` for an empty body)
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// Open a session and return its id
pub async fn open_session(app: &Router) -> String {
    let (status, body) = send(app, Method::POST, "/api/sessions", None).await;
    assert_eq!(status, StatusCode::CREATED);
    body["sessionId"].as_str().unwrap().to_string()
}

/// Current open-ticket count of a session
pub async fn open_count(app: &Router, session: &str) -> u64 {
    let (_, metrics) = send(app, Method::GET, &format!("/api/sessions/{session}/metrics"), None).await;
    metrics["openCount"].as_u64().unwrap()
}

/// Current ticket list of a session
pub async fn tickets(app: &Router, session: &str) -> Vec<Value> {
    let (status, body) = send(app, Method::GET, &format!("/api/sessions/{session}/tickets"), None).await;
    assert_eq!(status, StatusCode::OK);
    body["tickets"].as_array().unwrap().clone()
}
