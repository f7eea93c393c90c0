//! Metrics panel and chart endpoints

use super::{ApiResult, api_error, parse_session_id};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::Serialize;
use std::sync::Arc;
use ticketdesk_store::{MetricsSummary, PriorityCount, StatusMonthCount};

/// Rows of one chart
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartResponse<T> {
    /// Chart name
    pub chart: &'static str,
    /// Grouped counts
    pub rows: Vec<T>,
    /// Sum of every row's count; always the store size
    pub total: usize,
}

/// Everything the dashboard page renders in one pass
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    /// Number of tickets in the store
    pub ticket_count: usize,
    /// Metrics panel
    pub metrics: MetricsSummary,
    /// Status-by-month chart rows
    pub status_by_month: Vec<StatusMonthCount>,
    /// Priority distribution chart rows
    pub priority_distribution: Vec<PriorityCount>,
}

/// Metrics panel: open count plus the placeholder figures
///
/// # Errors
///
/// * `NOT_FOUND` - unknown session
pub async fn get_metrics(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> ApiResult<Json<MetricsSummary>> {
    let id = parse_session_id(&session_id)?;

    state
        .sessions
        .with_session(id, |session| session.metrics(&state.config.metrics))
        .map(Json)
        .map_err(api_error)
}

/// Ticket counts grouped by submission month and status
///
/// # Errors
///
/// * `NOT_FOUND` - unknown session
pub async fn status_by_month(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> ApiResult<Json<ChartResponse<StatusMonthCount>>> {
    let id = parse_session_id(&session_id)?;

    let (rows, total) = state
        .sessions
        .with_session(id, |session| (session.status_by_month(), session.len()))
        .map_err(api_error)?;

    Ok(Json(ChartResponse {
        chart: "statusByMonth",
        rows,
        total,
    }))
}

/// Ticket counts grouped by priority
///
/// # Errors
///
/// * `NOT_FOUND` - unknown session
pub async fn priority_distribution(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> ApiResult<Json<ChartResponse<PriorityCount>>> {
    let id = parse_session_id(&session_id)?;

    let (rows, total) = state
        .sessions
        .with_session(id, |session| (session.priority_distribution(), session.len()))
        .map_err(api_error)?;

    Ok(Json(ChartResponse {
        chart: "priorityDistribution",
        rows,
        total,
    }))
}

/// Ticket count, metrics and both charts from one consistent snapshot
///
/// # Errors
///
/// * `NOT_FOUND` - unknown session
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> ApiResult<Json<DashboardResponse>> {
    let id = parse_session_id(&session_id)?;

    state
        .sessions
        .with_session(id, |session| DashboardResponse {
            ticket_count: session.len(),
            metrics: session.metrics(&state.config.metrics),
            status_by_month: session.status_by_month(),
            priority_distribution: session.priority_distribution(),
        })
        .map(Json)
        .map_err(api_error)
}
