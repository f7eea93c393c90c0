//! Metrics and chart aggregates derived from a session's tickets

use serde::Serialize;
use std::collections::BTreeMap;
use ticketdesk_core::{
    MonthKey, Ticket, TicketPriority, TicketStatus, config::MetricsConfig,
};

/// Aggregates kept in step with the ticket list
///
/// Counts never hold zero entries, so an empty store yields empty charts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivedViews {
    total: usize,
    open_count: usize,
    status_by_month: BTreeMap<(MonthKey, TicketStatus), usize>,
    priority_counts: BTreeMap<TicketPriority, usize>,
}

/// One bar of the status-by-month chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusMonthCount {
    /// Submission month
    pub month: MonthKey,
    /// Status
    pub status: TicketStatus,
    /// Tickets submitted that month currently in that status
    pub count: usize,
}

/// One slice of the priority distribution chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityCount {
    /// Priority
    pub priority: TicketPriority,
    /// Tickets with that priority
    pub count: usize,
}

/// Metrics panel contents
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSummary {
    /// Tickets currently open; the only figure derived from data
    pub open_count: usize,
    /// Placeholder first response time in hours
    pub first_response_hours: f64,
    /// Placeholder average resolution time in hours
    pub avg_resolution_hours: f64,
    /// Placeholder deltas shown beside each metric
    pub deltas: MetricDeltas,
    /// Names of the fields above that are fixed demo values
    pub placeholders: Vec<&'static str>,
}

/// Change indicators shown beside each metric
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricDeltas {
    /// Delta for the open-ticket count
    pub open_count: i64,
    /// Delta for first response time
    pub first_response_hours: f64,
    /// Delta for average resolution time
    pub avg_resolution_hours: f64,
}

const PLACEHOLDER_FIELDS: [&str; 3] = ["firstResponseHours", "avgResolutionHours", "deltas"];

impl DerivedViews {
    /// Compute every aggregate from scratch
    #[must_use]
    pub fn from_tickets(tickets: &[Ticket]) -> Self {
        let mut views = Self::default();
        for ticket in tickets {
            views.record(ticket);
        }
        views
    }

    /// Account for a ticket entering the store (or its new state after an edit)
    pub fn record(&mut self, ticket: &Ticket) {
        self.total += 1;
        if ticket.status == TicketStatus::Open {
            self.open_count += 1;
        }
        *self
            .status_by_month
            .entry((ticket.month(), ticket.status))
            .or_insert(0) += 1;
        *self.priority_counts.entry(ticket.priority).or_insert(0) += 1;
    }

    /// Withdraw a ticket previously passed to [`Self::record`]
    pub fn retract(&mut self, ticket: &Ticket) {
        self.total = self.total.saturating_sub(1);
        if ticket.status == TicketStatus::Open {
            self.open_count = self.open_count.saturating_sub(1);
        }
        decrement(&mut self.status_by_month, (ticket.month(), ticket.status));
        decrement(&mut self.priority_counts, ticket.priority);
    }

    /// Number of tickets accounted for
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Number of open tickets
    #[must_use]
    pub const fn open_count(&self) -> usize {
        self.open_count
    }

    /// Status-by-month rows, ordered by month then status
    #[must_use]
    pub fn status_by_month(&self) -> Vec<StatusMonthCount> {
        self.status_by_month
            .iter()
            .map(|(&(month, status), &count)| StatusMonthCount {
                month,
                status,
                count,
            })
            .collect()
    }

    /// Priority distribution rows, in priority order
    #[must_use]
    pub fn priority_distribution(&self) -> Vec<PriorityCount> {
        self.priority_counts
            .iter()
            .map(|(&priority, &count)| PriorityCount { priority, count })
            .collect()
    }

    /// Metrics panel with the configured placeholder figures
    #[must_use]
    pub fn metrics(&self, placeholders: &MetricsConfig) -> MetricsSummary {
        MetricsSummary {
            open_count: self.open_count,
            first_response_hours: placeholders.first_response_hours,
            avg_resolution_hours: placeholders.avg_resolution_hours,
            deltas: MetricDeltas {
                open_count: placeholders.open_count_delta,
                first_response_hours: placeholders.first_response_delta,
                avg_resolution_hours: placeholders.avg_resolution_delta,
            },
            placeholders: PLACEHOLDER_FIELDS.to_vec(),
        }
    }
}

fn decrement<K: Ord>(counts: &mut BTreeMap<K, usize>, key: K) {
    if let Some(count) = counts.get_mut(&key) {
        *count = count.saturating_sub(1);
        if *count == 0 {
            counts.remove(&key);
        }
    }
}
