//! CORS policy built from the API configuration

use axum::http::{HeaderValue, Method, header};
use std::time::Duration;
use ticketdesk_core::config::ApiConfig;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::warn;

/// Build the CORS layer, or `None` when CORS is disabled
///
/// A `*` entry allows any origin. Origins that are not valid header values
/// are skipped with a warning.
#[must_use]
pub fn cors_layer(api: &ApiConfig) -> Option<CorsLayer> {
    if !api.enable_cors {
        return None;
    }

    let origin = if api.cors_origins.iter().any(|origin| origin == "*") {
        AllowOrigin::from(Any)
    } else {
        let origins: Vec<HeaderValue> = api
            .cors_origins
            .iter()
            .filter_map(|origin| {
                HeaderValue::from_str(origin)
                    .inspect_err(|_| warn!(%origin, "Ignoring invalid CORS origin"))
                    .ok()
            })
            .collect();
        AllowOrigin::list(origins)
    };

    Some(
        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
            .max_age(Duration::from_secs(86_400)),
    )
}
