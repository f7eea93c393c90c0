//! Service info and the dashboard page

use axum::response::{Html, Json};

const DASHBOARD_HTML: &str = include_str!("../../templates/dashboard.html");

/// Root endpoint for basic connectivity
pub async fn root_endpoint() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "service": "TicketDesk",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "ok"
    }))
}

/// API info endpoint
pub async fn api_info() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "api": "TicketDesk API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "sessions": "/api/sessions",
            "tickets": "/api/sessions/:session_id/tickets",
            "metrics": "/api/sessions/:session_id/metrics",
            "status_by_month": "/api/sessions/:session_id/charts/status-by-month",
            "priority_distribution": "/api/sessions/:session_id/charts/priority-distribution",
            "dashboard": "/api/sessions/:session_id/dashboard",
            "health": "/health"
        },
        "page": "/dashboard"
    }))
}

/// Single-page dashboard driving the JSON API
pub async fn dashboard_page() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}
