//! Sort extractor for ticket listings

use crate::extractors::ExtractorError;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use serde::Deserialize;
use ticketdesk_store::{SortColumn, SortOrder, TicketSort};

/// Raw `?sort=&order=` parameters
#[derive(Debug, Default, Deserialize)]
struct RawSort {
    sort: Option<SortColumn>,
    order: Option<SortOrder>,
}

/// Optional listing order taken from the query string
///
/// `None` keeps store order (newest first). Giving only `order` sorts by id.
#[derive(Debug, Clone, Copy, Default)]
pub struct SortParams(pub Option<TicketSort>);

#[async_trait]
impl<S> FromRequestParts<S> for SortParams
where
    S: Send + Sync,
{
    type Rejection = ExtractorError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let query = parts.uri.query().unwrap_or_default();

        let raw: RawSort = serde_urlencoded::from_str(query).map_err(|e| {
            ExtractorError::invalid_request(format!("Invalid sort parameters: {e}"))
        })?;

        if raw.sort.is_none() && raw.order.is_none() {
            return Ok(Self(None));
        }

        Ok(Self(Some(TicketSort {
            column: raw.sort.unwrap_or_default(),
            order: raw.order.unwrap_or_default(),
        })))
    }
}
