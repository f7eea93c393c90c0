//! Core data types for the `TicketDesk` dashboard

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use validator::{Validate, ValidationError};

/// Prefix shared by every ticket identifier
pub const TICKET_ID_PREFIX: &str = "TICKET-";

/// Ticket identifier, `TICKET-<n>` on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TicketId(u64);

impl TicketId {
    /// Wrap a numeric suffix
    #[must_use]
    pub const fn new(number: u64) -> Self {
        Self(number)
    }

    /// Numeric suffix of the identifier
    #[must_use]
    pub const fn number(self) -> u64 {
        self.0
    }

    /// The identifier that follows this one, or `None` once the numbering is exhausted
    #[must_use]
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{TICKET_ID_PREFIX}{}", self.0)
    }
}

impl FromStr for TicketId {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        let invalid = || crate::Error::InvalidTicketId {
            input: s.to_string(),
        };

        let digits = s.strip_prefix(TICKET_ID_PREFIX).ok_or_else(invalid)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        // One spelling per id, so `TICKET-0042` is not an alias of `TICKET-42`
        if digits.len() > 1 && digits.starts_with('0') {
            return Err(invalid());
        }

        digits.parse::<u64>().map(Self).map_err(|_| invalid())
    }
}

impl TryFrom<String> for TicketId {
    type Error = crate::Error;

    fn try_from(value: String) -> crate::Result<Self> {
        value.parse()
    }
}

impl From<TicketId> for String {
    fn from(id: TicketId) -> Self {
        id.to_string()
    }
}

/// Ticket workflow status
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TicketStatus {
    /// Waiting to be picked up
    Open,
    /// Being worked on
    #[serde(rename = "In-Progress")]
    InProgress,
    /// Resolved
    Closed,
}

impl TicketStatus {
    /// Every status, in display order
    pub const ALL: [Self; 3] = [Self::Open, Self::InProgress, Self::Closed];

    /// Wire label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::InProgress => "In-Progress",
            Self::Closed => "Closed",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                crate::Error::validation("status", format!("unknown status {s:?}"))
            })
    }
}

/// Ticket priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TicketPriority {
    /// High priority
    High,
    /// Medium priority
    Medium,
    /// Low priority
    Low,
}

impl TicketPriority {
    /// Every priority, in display order
    pub const ALL: [Self; 3] = [Self::High, Self::Medium, Self::Low];

    /// Wire label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl fmt::Display for TicketPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketPriority {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        Self::ALL
            .into_iter()
            .find(|priority| priority.as_str() == s)
            .ok_or_else(|| {
                crate::Error::validation("priority", format!("unknown priority {s:?}"))
            })
    }
}

/// A single support ticket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    /// Unique identifier
    pub id: TicketId,
    /// Free-text issue description
    pub issue: String,
    /// Current status
    pub status: TicketStatus,
    /// Priority
    pub priority: TicketPriority,
    /// Day the ticket was submitted
    pub date_submitted: NaiveDate,
}

impl Ticket {
    /// Build a freshly submitted ticket; new tickets always start out open
    #[must_use]
    pub const fn open(
        id: TicketId,
        issue: String,
        priority: TicketPriority,
        date_submitted: NaiveDate,
    ) -> Self {
        Self {
            id,
            issue,
            status: TicketStatus::Open,
            priority,
            date_submitted,
        }
    }

    /// Calendar month the ticket was submitted in
    #[must_use]
    pub fn month(&self) -> MonthKey {
        MonthKey::from(self.date_submitted)
    }
}

/// Creation form payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewTicket {
    /// Issue description; must contain something besides whitespace
    #[validate(custom(function = "validate_not_blank"))]
    pub issue: String,
    /// Requested priority
    pub priority: TicketPriority,
}

/// Partial edit of one ticket's editable columns
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TicketPatch {
    /// New status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TicketStatus>,
    /// New priority
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TicketPriority>,
    /// New issue text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_not_blank"))]
    pub issue: Option<String>,
}

impl TicketPatch {
    /// Whether the patch changes nothing
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.status.is_none() && self.priority.is_none() && self.issue.is_none()
    }
}

/// One row of the editable grid: the key plus every editable column
///
/// `dateSubmitted` is intentionally absent; it is read-only in the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TicketEdit {
    /// Row key
    pub id: TicketId,
    /// Issue text
    #[validate(custom(function = "validate_not_blank"))]
    pub issue: String,
    /// Status
    pub status: TicketStatus,
    /// Priority
    pub priority: TicketPriority,
}

impl From<&Ticket> for TicketEdit {
    fn from(ticket: &Ticket) -> Self {
        Self {
            id: ticket.id,
            issue: ticket.issue.clone(),
            status: ticket.status,
            priority: ticket.priority,
        }
    }
}

/// Calendar month, `YYYY-MM` on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Build a month key; `month` is 1-based
    ///
    /// # Errors
    ///
    /// Returns a validation error if `month` is outside 1..=12.
    pub fn new(year: i32, month: u32) -> crate::Result<Self> {
        if (1..=12).contains(&month) {
            Ok(Self { year, month })
        } else {
            Err(crate::Error::validation(
                "month",
                format!("month {month} out of range"),
            ))
        }
    }

    /// Year component
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// Month component, 1-based
    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }
}

impl From<NaiveDate> for MonthKey {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        let invalid = || crate::Error::validation("month", format!("expected YYYY-MM, got {s:?}"));
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

impl TryFrom<String> for MonthKey {
    type Error = crate::Error;

    fn try_from(value: String) -> crate::Result<Self> {
        value.parse()
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.to_string()
    }
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("must not be blank".into());
        return Err(error);
    }
    Ok(())
}
