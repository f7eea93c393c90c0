//! Session-scoped ticket store and derived views for `TicketDesk`
//!
//! Each [`TicketSession`] owns an ordered ticket list (newest first) plus
//! the metrics and chart aggregates derived from it. Creation and single
//! edits adjust the aggregates in place; a full grid overwrite rebuilds them.
//! The [`SessionRegistry`] hands sessions out by id to whoever serves them.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod registry;
pub mod seed;
pub mod session;
pub mod views;

pub use registry::{SessionId, SessionRegistry};
pub use seed::{ISSUE_DESCRIPTIONS, generate_tickets};
pub use session::{SortColumn, SortOrder, TicketSession, TicketSort};
pub use views::{
    DerivedViews, MetricDeltas, MetricsSummary, PriorityCount, StatusMonthCount,
};
