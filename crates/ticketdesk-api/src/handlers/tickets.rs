//! Ticket list, creation form and editable grid endpoints

use super::{ApiResult, api_error, parse_session_id, parse_ticket_id};
use crate::{
    extractors::{SortParams, ValidatedJson},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use ticketdesk_core::{Error, NewTicket, Ticket, TicketPatch, types::TicketEdit};
use tracing::debug;
use validator::Validate;

/// Ticket listing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketList {
    /// Tickets, newest first unless a sort was requested
    pub tickets: Vec<Ticket>,
    /// Number of tickets
    pub count: usize,
}

impl From<Vec<Ticket>> for TicketList {
    fn from(tickets: Vec<Ticket>) -> Self {
        Self {
            count: tickets.len(),
            tickets,
        }
    }
}

/// Full contents of the editable grid
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GridEdits {
    /// Every row of the grid, in display order
    #[validate(nested)]
    pub tickets: Vec<TicketEdit>,
}

/// List a session's tickets
///
/// Accepts optional `sort` (`id`, `issue`, `status`, `priority`,
/// `dateSubmitted`) and `order` (`asc`, `desc`) query parameters.
///
/// # Errors
///
/// * `NOT_FOUND` - unknown session
/// * `BAD_REQUEST` - unknown sort column or order
pub async fn list_tickets(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
    SortParams(sort): SortParams,
) -> ApiResult<Json<TicketList>> {
    let id = parse_session_id(&session_id)?;

    let tickets = state
        .sessions
        .with_session(id, |session| match sort {
            Some(sort) => session.sorted_tickets(sort),
            None => session.tickets().to_vec(),
        })
        .map_err(api_error)?;

    debug!(session_id = %id, count = tickets.len(), ?sort, "Listed tickets");
    Ok(Json(tickets.into()))
}

/// Submit the creation form
///
/// The new ticket gets the next sequential id, status `Open` and today's
/// local date, and is listed first.
///
/// # Errors
///
/// * `NOT_FOUND` - unknown session
/// * `BAD_REQUEST` - missing or blank `issue`, missing or unknown `priority`
pub async fn create_ticket(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
    ValidatedJson(form): ValidatedJson<NewTicket>,
) -> ApiResult<(StatusCode, Json<Ticket>)> {
    let id = parse_session_id(&session_id)?;
    let today = chrono::Local::now().date_naive();

    let ticket = state
        .sessions
        .with_session(id, |session| session.create(form, today))
        .and_then(|created| created)
        .map_err(api_error)?;

    Ok((StatusCode::CREATED, Json(ticket)))
}

/// Edit one row of the grid
///
/// # Errors
///
/// * `NOT_FOUND` - unknown session or ticket
/// * `BAD_REQUEST` - malformed ticket id, blank `issue`, unknown enum label
pub async fn update_ticket(
    State(state): State<Arc<AppState>>,
    Path((session_id, ticket_id)): Path<(String, String)>,
    ValidatedJson(patch): ValidatedJson<TicketPatch>,
) -> ApiResult<Json<Ticket>> {
    let id = parse_session_id(&session_id)?;
    let ticket_id = parse_ticket_id(&ticket_id)?;

    let updated = state
        .sessions
        .with_session(id, |session| session.update(ticket_id, patch))
        .and_then(|updated| updated)
        .map_err(api_error)?;

    updated.map(Json).ok_or_else(|| {
        api_error(Error::NotFound {
            resource: format!("ticket {ticket_id}"),
        })
    })
}

/// Overwrite the store with the edited grid
///
/// # Errors
///
/// * `NOT_FOUND` - unknown session
/// * `BAD_REQUEST` - the grid adds, drops or repeats a row, or a row is invalid
pub async fn apply_edits(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
    ValidatedJson(grid): ValidatedJson<GridEdits>,
) -> ApiResult<Json<TicketList>> {
    let id = parse_session_id(&session_id)?;

    let tickets = state
        .sessions
        .with_session(id, |session| {
            session
                .apply_edits(grid.tickets)
                .map(|()| session.tickets().to_vec())
        })
        .and_then(|applied| applied)
        .map_err(api_error)?;

    Ok(Json(tickets.into()))
}
