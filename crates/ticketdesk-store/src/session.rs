//! A single session's ticket store

use crate::{
    seed::generate_tickets,
    views::{DerivedViews, MetricsSummary, PriorityCount, StatusMonthCount},
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::{cmp::Ordering, collections::HashMap, time::Instant};
use ticketdesk_core::{
    Error, NewTicket, Result, Ticket, TicketId, TicketPatch,
    config::{MetricsConfig, SeedConfig},
    types::TicketEdit,
    utils::{ensure_unique_ids, next_ticket_id},
};
use tracing::{debug, info};

/// Grid column a listing can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortColumn {
    /// Ticket id (numeric)
    #[default]
    Id,
    /// Issue text
    Issue,
    /// Status, in workflow order
    Status,
    /// Priority, highest first
    Priority,
    /// Submission date
    DateSubmitted,
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Smallest first
    Asc,
    /// Largest first
    #[default]
    Desc,
}

/// How a ticket listing should be ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TicketSort {
    /// Column to sort by
    pub column: SortColumn,
    /// Direction
    pub order: SortOrder,
}

impl TicketSort {
    fn compare(self, a: &Ticket, b: &Ticket) -> Ordering {
        let ordering = match self.column {
            SortColumn::Id => a.id.cmp(&b.id),
            SortColumn::Issue => a.issue.cmp(&b.issue),
            SortColumn::Status => a.status.cmp(&b.status),
            SortColumn::Priority => a.priority.cmp(&b.priority),
            SortColumn::DateSubmitted => a.date_submitted.cmp(&b.date_submitted),
        };
        match self.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

/// Ticket store for one session plus its derived views
#[derive(Debug, Clone)]
pub struct TicketSession {
    tickets: Vec<Ticket>,
    views: DerivedViews,
    last_active: Instant,
}

impl Default for TicketSession {
    fn default() -> Self {
        Self {
            tickets: Vec::new(),
            views: DerivedViews::default(),
            last_active: Instant::now(),
        }
    }
}

impl TicketSession {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with the seeded ticket set
    #[must_use]
    pub fn seeded(seed: &SeedConfig) -> Self {
        let mut session = Self::new();
        session.initialize(seed);
        session
    }

    /// Store holding an existing ticket list, newest first
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataIntegrity`] if two tickets share an id.
    pub fn from_tickets(tickets: Vec<Ticket>) -> Result<Self> {
        ensure_unique_ids(&tickets)?;
        Ok(Self {
            views: DerivedViews::from_tickets(&tickets),
            tickets,
            last_active: Instant::now(),
        })
    }

    /// Fill an empty store with seeded tickets; a populated store is left alone
    pub fn initialize(&mut self, seed: &SeedConfig) {
        if !self.tickets.is_empty() {
            return;
        }
        self.tickets = generate_tickets(seed);
        self.views = DerivedViews::from_tickets(&self.tickets);
        debug!(count = self.tickets.len(), "Seeded ticket store");
    }

    /// Tickets in store order, newest first
    #[must_use]
    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    /// Tickets ordered for display; the store itself is not reordered
    #[must_use]
    pub fn sorted_tickets(&self, sort: TicketSort) -> Vec<Ticket> {
        let mut tickets = self.tickets.clone();
        tickets.sort_by(|a, b| sort.compare(a, b));
        tickets
    }

    /// Number of tickets
    #[must_use]
    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    /// Whether the store holds no tickets
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    /// Look up one ticket
    #[must_use]
    pub fn get(&self, id: TicketId) -> Option<&Ticket> {
        self.tickets.iter().find(|ticket| ticket.id == id)
    }

    /// Identifier the next created ticket will receive
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataIntegrity`] once the id space is exhausted.
    pub fn next_id(&self) -> Result<TicketId> {
        next_ticket_id(self.tickets.iter().map(|ticket| &ticket.id))
    }

    /// Insert a record at the front of the store
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataIntegrity`] if the id is already taken.
    pub fn append(&mut self, ticket: Ticket) -> Result<()> {
        if self.get(ticket.id).is_some() {
            return Err(Error::DataIntegrity(format!(
                "duplicate ticket id {}",
                ticket.id
            )));
        }
        self.views.record(&ticket);
        self.tickets.insert(0, ticket);
        Ok(())
    }

    /// Submit the creation form: allocate the next id and prepend an open ticket
    ///
    /// # Errors
    ///
    /// Returns a validation error if the issue text is blank, or
    /// [`Error::DataIntegrity`] if no larger id is left to hand out.
    pub fn create(&mut self, form: NewTicket, today: NaiveDate) -> Result<Ticket> {
        if form.issue.trim().is_empty() {
            return Err(Error::validation("issue", "must not be blank"));
        }

        let ticket = Ticket::open(self.next_id()?, form.issue, form.priority, today);
        self.append(ticket.clone())?;
        info!(id = %ticket.id, priority = %ticket.priority, "Ticket created");
        Ok(ticket)
    }

    /// Edit one ticket's editable columns
    ///
    /// Returns `Ok(None)` and changes nothing when no ticket has that id.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the patch sets a blank issue text.
    pub fn update(&mut self, id: TicketId, patch: TicketPatch) -> Result<Option<Ticket>> {
        if patch.issue.as_deref().is_some_and(|issue| issue.trim().is_empty()) {
            return Err(Error::validation("issue", "must not be blank"));
        }

        let Some(ticket) = self.tickets.iter_mut().find(|ticket| ticket.id == id) else {
            debug!(%id, "Update ignored, no such ticket");
            return Ok(None);
        };

        self.views.retract(ticket);
        if let Some(status) = patch.status {
            ticket.status = status;
        }
        if let Some(priority) = patch.priority {
            ticket.priority = priority;
        }
        if let Some(issue) = patch.issue {
            ticket.issue = issue;
        }
        self.views.record(ticket);

        info!(%id, status = %ticket.status, priority = %ticket.priority, "Ticket updated");
        Ok(Some(ticket.clone()))
    }

    /// Replace the store with the edited grid
    ///
    /// The grid must contain exactly the ids already in the store, each once.
    /// Submission dates are carried over from the existing records and the
    /// grid's row order becomes the store order. On error nothing changes.
    ///
    /// # Errors
    ///
    /// Returns a validation error on unknown, missing, or repeated ids or on
    /// a blank issue text.
    pub fn apply_edits(&mut self, rows: Vec<TicketEdit>) -> Result<()> {
        let mut dates: HashMap<TicketId, NaiveDate> = self
            .tickets
            .iter()
            .map(|ticket| (ticket.id, ticket.date_submitted))
            .collect();

        let mut edited = Vec::with_capacity(rows.len());
        for row in rows {
            if row.issue.trim().is_empty() {
                return Err(Error::validation(
                    "issue",
                    format!("{} must not be blank", row.id),
                ));
            }
            let date_submitted = dates.remove(&row.id).ok_or_else(|| {
                Error::validation("id", format!("{} is unknown or repeated", row.id))
            })?;
            edited.push(Ticket {
                id: row.id,
                issue: row.issue,
                status: row.status,
                priority: row.priority,
                date_submitted,
            });
        }

        if let Some(missing) = dates.keys().min() {
            return Err(Error::validation(
                "id",
                format!(
                    "{missing} is missing from the edited grid ({} rows absent)",
                    dates.len()
                ),
            ));
        }

        self.views = DerivedViews::from_tickets(&edited);
        self.tickets = edited;
        info!(count = self.tickets.len(), "Applied grid edits");
        Ok(())
    }

    /// Current derived views
    #[must_use]
    pub const fn views(&self) -> &DerivedViews {
        &self.views
    }

    /// Metrics panel
    #[must_use]
    pub fn metrics(&self, placeholders: &MetricsConfig) -> MetricsSummary {
        self.views.metrics(placeholders)
    }

    /// Status-by-month chart rows
    #[must_use]
    pub fn status_by_month(&self) -> Vec<StatusMonthCount> {
        self.views.status_by_month()
    }

    /// Priority distribution chart rows
    #[must_use]
    pub fn priority_distribution(&self) -> Vec<PriorityCount> {
        self.views.priority_distribution()
    }

    /// Mark the session as used now
    pub fn touch(&mut self) {
        self.last_active = Instant::now();
    }

    /// When the session was last used
    #[must_use]
    pub const fn last_active(&self) -> Instant {
        self.last_active
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use ticketdesk_core::{MonthKey, TicketPriority, TicketStatus};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn ticket(id: &str, status: TicketStatus) -> Ticket {
        Ticket {
            id: id.parse().unwrap(),
            issue: format!("issue for {id}"),
            status,
            priority: TicketPriority::Medium,
            date_submitted: NaiveDate::from_ymd_opt(2023, 7, 4).unwrap(),
        }
    }

    fn form(issue: &str, priority: TicketPriority) -> NewTicket {
        NewTicket {
            issue: issue.to_string(),
            priority,
        }
    }

    fn seeded() -> TicketSession {
        TicketSession::seeded(&SeedConfig::default())
    }

    fn grid(session: &TicketSession) -> Vec<TicketEdit> {
        session.tickets().iter().map(TicketEdit::from).collect()
    }

    #[test]
    fn test_create_on_empty_store_starts_at_one() {
        let mut session = TicketSession::new();

        let created = session
            .create(form("VPN down", TicketPriority::Medium), today())
            .unwrap();

        assert_eq!(session.len(), 1);
        assert_eq!(created.id.to_string(), "TICKET-1");
        assert_eq!(created.status, TicketStatus::Open);
        assert_eq!(created.priority, TicketPriority::Medium);
        assert_eq!(created.date_submitted, today());
    }

    #[test]
    fn test_create_on_seeded_store_follows_seed_max() {
        let mut session = seeded();

        let created = session
            .create(form("VPN down", TicketPriority::Medium), today())
            .unwrap();

        assert_eq!(created.id.to_string(), "TICKET-1101");
        assert_eq!(session.len(), 101);
        assert_eq!(session.tickets()[0], created);
    }

    #[test]
    fn test_next_id_uses_numeric_maximum() {
        let session = TicketSession::from_tickets(vec![
            ticket("TICKET-1005", TicketStatus::Open),
            ticket("TICKET-1002", TicketStatus::Open),
            ticket("TICKET-1099", TicketStatus::Open),
        ])
        .unwrap();

        assert_eq!(session.next_id().unwrap().to_string(), "TICKET-1100");
    }

    #[test]
    fn test_create_fails_cleanly_when_ids_run_out() {
        let mut session = TicketSession::from_tickets(vec![Ticket {
            id: TicketId::new(u64::MAX),
            ..ticket("TICKET-1", TicketStatus::Open)
        }])
        .unwrap();

        let err = session
            .create(form("VPN down", TicketPriority::Medium), today())
            .unwrap_err();

        assert!(matches!(err, Error::DataIntegrity(_)));
        assert_eq!(session.len(), 1);
        assert_eq!(session.views().open_count(), 1);
    }

    #[test]
    fn test_repeated_creates_are_strictly_increasing_and_newest_first() {
        let mut session = seeded();
        let mut previous = session.next_id().unwrap();

        for n in 0..5 {
            let created = session
                .create(form(&format!("issue {n}"), TicketPriority::Low), today())
                .unwrap();
            assert!(session.tickets()[1..].iter().all(|t| t.id < created.id));
            assert_eq!(session.tickets()[0].id, created.id);
            assert!(created.id >= previous);
            previous = created.id.next().unwrap();
        }
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\n\t")]
    fn test_blank_issue_blocks_submission(#[case] issue: &str) {
        let mut session = seeded();

        let err = session
            .create(form(issue, TicketPriority::High), today())
            .unwrap_err();

        assert!(matches!(err, Error::Validation { .. }));
        assert_eq!(session.len(), 100);
    }

    #[test]
    fn test_from_tickets_rejects_duplicates() {
        let err = TicketSession::from_tickets(vec![
            ticket("TICKET-5", TicketStatus::Open),
            ticket("TICKET-5", TicketStatus::Closed),
        ])
        .unwrap_err();

        assert!(matches!(err, Error::DataIntegrity(_)));
    }

    #[test]
    fn test_append_rejects_taken_id() {
        let mut session =
            TicketSession::from_tickets(vec![ticket("TICKET-5", TicketStatus::Open)]).unwrap();

        assert!(session.append(ticket("TICKET-5", TicketStatus::Open)).is_err());
        assert!(session.append(ticket("TICKET-6", TicketStatus::Open)).is_ok());
        assert_eq!(session.tickets()[0].id.to_string(), "TICKET-6");
    }

    #[test]
    fn test_initialize_leaves_populated_store_alone() {
        let mut session = TicketSession::new();
        session
            .create(form("VPN down", TicketPriority::Medium), today())
            .unwrap();

        session.initialize(&SeedConfig::default());

        assert_eq!(session.len(), 1);
    }

    #[test]
    fn test_close_ticket_shifts_metrics_and_chart() {
        let mut session = seeded();
        let id: TicketId = "TICKET-1050".parse().unwrap();

        // Force a known starting state
        session
            .update(
                id,
                TicketPatch {
                    status: Some(TicketStatus::Open),
                    ..TicketPatch::default()
                },
            )
            .unwrap();
        let month = MonthKey::from(session.get(id).unwrap().date_submitted);
        let count_for = |session: &TicketSession, status: TicketStatus| {
            session
                .status_by_month()
                .into_iter()
                .find(|row| row.month == month && row.status == status)
                .map_or(0, |row| row.count)
        };

        let open_before = session.views().open_count();
        let month_open_before = count_for(&session, TicketStatus::Open);
        let month_closed_before = count_for(&session, TicketStatus::Closed);

        let updated = session
            .update(
                id,
                TicketPatch {
                    status: Some(TicketStatus::Closed),
                    ..TicketPatch::default()
                },
            )
            .unwrap()
            .unwrap();

        assert_eq!(updated.status, TicketStatus::Closed);
        assert_eq!(session.views().open_count(), open_before - 1);
        assert_eq!(count_for(&session, TicketStatus::Open), month_open_before - 1);
        assert_eq!(count_for(&session, TicketStatus::Closed), month_closed_before + 1);
    }

    #[test]
    fn test_update_unknown_id_is_silent_noop() {
        let mut session = seeded();
        let before = session.tickets().to_vec();

        let result = session
            .update(
                TicketId::new(9999),
                TicketPatch {
                    status: Some(TicketStatus::Closed),
                    ..TicketPatch::default()
                },
            )
            .unwrap();

        assert!(result.is_none());
        assert_eq!(session.tickets(), before.as_slice());
    }

    #[test]
    fn test_update_keeps_id_and_date() {
        let mut session = seeded();
        let original = session.tickets()[10].clone();

        let updated = session
            .update(
                original.id,
                TicketPatch {
                    issue: Some("Rewritten".to_string()),
                    priority: Some(TicketPriority::Low),
                    status: None,
                },
            )
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.date_submitted, original.date_submitted);
        assert_eq!(updated.status, original.status);
        assert_eq!(updated.issue, "Rewritten");
        assert_eq!(session.views(), &DerivedViews::from_tickets(session.tickets()));
    }

    #[test]
    fn test_apply_edits_overwrites_and_keeps_dates() {
        let mut session = seeded();
        let dates: HashMap<TicketId, NaiveDate> = session
            .tickets()
            .iter()
            .map(|t| (t.id, t.date_submitted))
            .collect();

        let mut rows = grid(&session);
        for row in &mut rows {
            row.status = TicketStatus::Closed;
        }
        rows.reverse();

        session.apply_edits(rows).unwrap();

        assert_eq!(session.views().open_count(), 0);
        assert_eq!(session.tickets()[0].id.to_string(), "TICKET-1001");
        assert!(
            session
                .tickets()
                .iter()
                .all(|t| dates[&t.id] == t.date_submitted)
        );
        assert_eq!(session.views(), &DerivedViews::from_tickets(session.tickets()));
    }

    #[test]
    fn test_apply_edits_rejects_added_row() {
        let mut session = seeded();
        let before = session.tickets().to_vec();

        let mut rows = grid(&session);
        rows.push(TicketEdit {
            id: TicketId::new(5000),
            issue: "sneaky".to_string(),
            status: TicketStatus::Open,
            priority: TicketPriority::High,
        });

        assert!(session.apply_edits(rows).is_err());
        assert_eq!(session.tickets(), before.as_slice());
    }

    #[test]
    fn test_apply_edits_rejects_dropped_row() {
        let mut session = seeded();
        let mut rows = grid(&session);
        rows.pop();

        let err = session.apply_edits(rows).unwrap_err();

        assert!(err.to_string().contains("TICKET-1001"));
        assert_eq!(session.len(), 100);
    }

    #[test]
    fn test_apply_edits_rejects_repeated_row() {
        let mut session = seeded();
        let mut rows = grid(&session);
        let first = rows[0].clone();
        rows[1] = first;

        assert!(session.apply_edits(rows).is_err());
    }

    #[rstest]
    #[case(SortColumn::Id, SortOrder::Asc, "TICKET-1001")]
    #[case(SortColumn::Id, SortOrder::Desc, "TICKET-1100")]
    fn test_sorted_listing_by_id(
        #[case] column: SortColumn,
        #[case] order: SortOrder,
        #[case] first: &str,
    ) {
        let session = seeded();

        let sorted = session.sorted_tickets(TicketSort { column, order });

        assert_eq!(sorted[0].id.to_string(), first);
        assert_eq!(session.tickets()[0].id.to_string(), "TICKET-1100");
    }

    #[test]
    fn test_sorted_listing_by_date_and_priority() {
        let session = seeded();

        let by_date = session.sorted_tickets(TicketSort {
            column: SortColumn::DateSubmitted,
            order: SortOrder::Asc,
        });
        assert!(by_date.windows(2).all(|w| w[0].date_submitted <= w[1].date_submitted));

        let by_priority = session.sorted_tickets(TicketSort {
            column: SortColumn::Priority,
            order: SortOrder::Asc,
        });
        assert_eq!(by_priority[0].priority, TicketPriority::High);
    }
}
