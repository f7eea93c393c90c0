//! Health check endpoints for monitoring and diagnostics

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Timestamp of the check
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Session registry status
    pub sessions: SessionHealth,
    /// System uptime in seconds
    pub uptime_seconds: u64,
}

/// Session registry status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionHealth {
    /// Live sessions
    pub active: usize,
    /// Configured ceiling
    pub max_sessions: usize,
}

/// Readiness check response (simpler than health)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    /// Service readiness status
    pub ready: bool,
    /// Timestamp of the check
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Basic health check endpoint for monitoring systems
///
/// # Example Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "timestamp": "2024-03-15T14:25:30Z",
///   "sessions": { "active": 3, "max_sessions": 1000 },
///   "uptime_seconds": 3600
/// }
/// ```
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let response = HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        sessions: SessionHealth {
            active: state.sessions.len(),
            max_sessions: state.config.sessions.max_sessions,
        },
        uptime_seconds: state.uptime_seconds(),
    };

    debug!(active = response.sessions.active, "Health check completed");
    Json(response)
}

/// Readiness check endpoint for Kubernetes-style health checks
///
/// Returns 200 OK while a new session could still be opened, 503 once the
/// session ceiling is reached.
pub async fn readiness_check(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ReadinessResponse>, StatusCode> {
    if state.has_capacity() {
        Ok(Json(ReadinessResponse {
            ready: true,
            timestamp: chrono::Utc::now(),
        }))
    } else {
        warn!(
            max_sessions = state.config.sessions.max_sessions,
            "Readiness check failed - session limit reached"
        );
        Err(StatusCode::SERVICE_UNAVAILABLE)
    }
}
