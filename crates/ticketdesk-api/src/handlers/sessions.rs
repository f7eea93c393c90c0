//! Session lifecycle endpoints

use super::{ApiResult, api_error, parse_session_id};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use ticketdesk_core::Error;
use ticketdesk_store::SessionId;

/// Body returned when a session is opened
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCreated {
    /// Handle for every later request
    pub session_id: SessionId,
    /// Number of seeded tickets in the new store
    pub ticket_count: usize,
}

/// Open a session with a freshly seeded ticket store
///
/// # Errors
///
/// * `SERVICE_UNAVAILABLE` - `sessions.max_sessions` sessions are already live
pub async fn create_session(
    State(state): State<Arc<AppState>>,
) -> ApiResult<(StatusCode, Json<SessionCreated>)> {
    let (session_id, ticket_count) = state.sessions.create().map_err(api_error)?;

    Ok((
        StatusCode::CREATED,
        Json(SessionCreated {
            session_id,
            ticket_count,
        }),
    ))
}

/// Discard a session and its tickets
///
/// # Errors
///
/// * `NOT_FOUND` - no such session
pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_session_id(&session_id)?;

    if state.sessions.remove(id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(api_error(Error::NotFound {
            resource: format!("session {id}"),
        }))
    }
}
