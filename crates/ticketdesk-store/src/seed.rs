//! Reproducible synthetic ticket data

use chrono::Days;
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};
use ticketdesk_core::{
    Ticket, TicketId, TicketPriority, TicketStatus, config::SeedConfig,
};

/// Canned issue descriptions the generator draws from
pub const ISSUE_DESCRIPTIONS: [&str; 20] = [
    "Network connectivity issues in the office",
    "Software application crashing on startup",
    "Printer not responding to print commands",
    "Email server downtime",
    "Data backup failure",
    "Login authentication problems",
    "Website performance degradation",
    "Security vulnerability identified",
    "Hardware malfunction in the server room",
    "Employee unable to access shared files",
    "Database connection failure",
    "Mobile application not syncing data",
    "VoIP phone system issues",
    "VPN connection problems for remote employees",
    "System updates causing compatibility issues",
    "File server running out of storage space",
    "Intrusion detection system alerts",
    "Inventory management system errors",
    "Customer data not loading in CRM",
    "Collaboration tool not sending notifications",
];

/// Generate the seeded ticket set, newest id first
///
/// Every column is drawn in turn (all issues, then all statuses, then all
/// priorities, then all dates) from one RNG seeded with
/// [`SeedConfig::rng_seed`], so a given config always yields the same tickets.
#[must_use]
pub fn generate_tickets(config: &SeedConfig) -> Vec<Ticket> {
    let count = config.ticket_count;
    let mut rng = StdRng::seed_from_u64(config.rng_seed);

    let issues: Vec<&str> = (0..count)
        .map(|_| ISSUE_DESCRIPTIONS.choose(&mut rng).copied().unwrap_or_default())
        .collect();
    let statuses: Vec<TicketStatus> = (0..count)
        .map(|_| {
            TicketStatus::ALL
                .choose(&mut rng)
                .copied()
                .unwrap_or(TicketStatus::Open)
        })
        .collect();
    let priorities: Vec<TicketPriority> = (0..count)
        .map(|_| {
            TicketPriority::ALL
                .choose(&mut rng)
                .copied()
                .unwrap_or(TicketPriority::Medium)
        })
        .collect();
    let dates: Vec<_> = (0..count)
        .map(|_| {
            let offset = rng.gen_range(0..=config.span_days);
            config
                .start_date
                .checked_add_days(Days::new(u64::from(offset)))
                .unwrap_or(config.start_date)
        })
        .collect();

    issues
        .into_iter()
        .zip(statuses)
        .zip(priorities)
        .zip(dates)
        .zip(0u64..)
        .map(|((((issue, status), priority), date_submitted), index)| Ticket {
            id: TicketId::new(config.first_ticket_number.saturating_sub(index)),
            issue: issue.to_string(),
            status,
            priority,
            date_submitted,
        })
        .collect()
}
