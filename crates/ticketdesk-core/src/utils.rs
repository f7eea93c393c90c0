//! Utility functions for the `TicketDesk` dashboard

use crate::types::{Ticket, TicketId};
use std::collections::HashSet;

/// Identifier for the next ticket: highest existing suffix plus one
///
/// An empty store starts numbering at `TICKET-1`.
///
/// # Errors
///
/// Returns [`crate::Error::DataIntegrity`] when the highest id is already
/// `u64::MAX` and no larger id exists.
pub fn next_ticket_id<'a, I>(ids: I) -> crate::Result<TicketId>
where
    I: IntoIterator<Item = &'a TicketId>,
{
    match ids.into_iter().max() {
        None => Ok(TicketId::new(1)),
        Some(max) => max.next().ok_or_else(|| {
            crate::Error::DataIntegrity(format!("no ticket id left after {max}"))
        }),
    }
}

/// Check that no two tickets share an identifier
///
/// # Errors
///
/// Returns [`crate::Error::DataIntegrity`] naming the first duplicate found.
pub fn ensure_unique_ids(tickets: &[Ticket]) -> crate::Result<()> {
    let mut seen = HashSet::with_capacity(tickets.len());
    for ticket in tickets {
        if !seen.insert(ticket.id) {
            return Err(crate::Error::DataIntegrity(format!(
                "duplicate ticket id {}",
                ticket.id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::TicketPriority;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn ticket(number: u64) -> Ticket {
        Ticket::open(
            TicketId::new(number),
            format!("issue {number}"),
            TicketPriority::Medium,
            NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
        )
    }

    fn ids(raw: &[&str]) -> Vec<TicketId> {
        raw.iter().map(|s| s.parse().unwrap()).collect()
    }

    #[test]
    fn test_next_id_uses_numeric_maximum_not_position() {
        let ids = ids(&["TICKET-1005", "TICKET-1002", "TICKET-1099"]);
        assert_eq!(next_ticket_id(&ids).unwrap().to_string(), "TICKET-1100");
    }

    #[test]
    fn test_next_id_compares_numerically() {
        let ids = ids(&["TICKET-999", "TICKET-1000"]);
        assert_eq!(next_ticket_id(&ids).unwrap(), TicketId::new(1001));
    }

    #[test]
    fn test_next_id_on_empty_store() {
        let ids: Vec<TicketId> = Vec::new();
        assert_eq!(next_ticket_id(&ids).unwrap(), TicketId::new(1));
    }

    #[test]
    fn test_next_id_exhausted_at_maximum() {
        let ids = vec![TicketId::new(5), TicketId::new(u64::MAX)];

        let err = next_ticket_id(&ids).unwrap_err();

        assert!(matches!(err, crate::Error::DataIntegrity(_)));
    }

    #[test]
    fn test_unique_ids_accepted() {
        let tickets = vec![ticket(3), ticket(2), ticket(1)];
        assert!(ensure_unique_ids(&tickets).is_ok());
        assert!(ensure_unique_ids(&[]).is_ok());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let tickets = vec![ticket(3), ticket(2), ticket(3)];
        let err = ensure_unique_ids(&tickets).unwrap_err();
        assert_eq!(err.to_string(), "Data integrity error: duplicate ticket id TICKET-3");
    }

    proptest! {
        #[test]
        fn prop_next_id_exceeds_every_existing_id(numbers in prop::collection::vec(0u64..1_000_000, 0..64)) {
            let ids: Vec<TicketId> = numbers.iter().copied().map(TicketId::new).collect();
            let next = next_ticket_id(&ids).unwrap();
            prop_assert!(ids.iter().all(|id| *id < next));
        }
    }
}
