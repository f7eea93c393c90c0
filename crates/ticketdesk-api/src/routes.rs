//! API route definitions and middleware stack

use crate::{handlers, middleware, state::AppState};
use axum::{
    Router,
    http::StatusCode,
    response::Json,
    routing::{delete, get, post, put},
};
use std::{sync::Arc, time::Duration};
use tower_http::{compression::CompressionLayer, timeout::TimeoutLayer};

/// Session, ticket and chart endpoints
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api", get(handlers::pages::api_info))
        // Session lifecycle
        .route("/api/sessions", post(handlers::sessions::create_session))
        .route(
            "/api/sessions/:session_id",
            delete(handlers::sessions::delete_session),
        )
        // Ticket store
        .route(
            "/api/sessions/:session_id/tickets",
            get(handlers::tickets::list_tickets)
                .post(handlers::tickets::create_ticket)
                .put(handlers::tickets::apply_edits),
        )
        .route(
            "/api/sessions/:session_id/tickets/:ticket_id",
            put(handlers::tickets::update_ticket),
        )
        // Derived views
        .route(
            "/api/sessions/:session_id/metrics",
            get(handlers::stats::get_metrics),
        )
        .route(
            "/api/sessions/:session_id/charts/status-by-month",
            get(handlers::stats::status_by_month),
        )
        .route(
            "/api/sessions/:session_id/charts/priority-distribution",
            get(handlers::stats::priority_distribution),
        )
        .route(
            "/api/sessions/:session_id/dashboard",
            get(handlers::stats::get_dashboard),
        )
        .layer(CompressionLayer::new())
}

/// Build health check routes
pub fn health_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
}

/// Service info and the dashboard page
pub fn page_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::pages::root_endpoint))
        .route("/dashboard", get(handlers::pages::dashboard_page))
}

/// Combine all routes into a single router with the shared middleware
pub fn build_router(state: &AppState) -> Router<Arc<AppState>> {
    let router = Router::new()
        .merge(api_routes())
        .merge(health_routes())
        .merge(page_routes())
        // Fallback handler for unknown routes
        .fallback(not_found_handler)
        .layer(TimeoutLayer::new(Duration::from_secs(
            state.config.api.request_timeout,
        )))
        .layer(axum::middleware::from_fn(
            middleware::logging::request_logging_middleware,
        ));

    match middleware::cors::cors_layer(&state.config.api) {
        Some(cors) => router.layer(cors),
        None => router,
    }
}

/// Handle 404 Not Found errors
async fn not_found_handler() -> (StatusCode, Json<handlers::ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(handlers::ErrorResponse::new(
            "The requested endpoint does not exist",
            "ROUTE_NOT_FOUND",
        )),
    )
}
