//! Ticket store boundary
//!
//! The ticket store belongs to the host; this crate only resolves listed
//! ids back to their keywords field. `MemoryStore` backs the preview
//! server and the test suite.

use crate::render::FieldValue;
use std::collections::BTreeMap;

pub type TicketId = u32;

/// Read-only view of a tracked ticket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub id: TicketId,
    pub keywords: FieldValue,
}

impl Ticket {
    pub fn new(id: TicketId, keywords: FieldValue) -> Self {
        Self { id, keywords }
    }
}

/// Resolves a ticket id to its current state
///
/// `None` means the ticket vanished between listing and render; callers
/// skip it silently.
pub trait TicketStore {
    fn ticket(&self, id: TicketId) -> Option<Ticket>;
}

/// In-memory ticket store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tickets: BTreeMap<TicketId, Ticket>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, ticket: Ticket) {
        self.tickets.insert(ticket.id, ticket);
    }

    /// Convenience: insert a ticket with a plain-text keywords field
    pub fn add(&mut self, id: TicketId, keywords: &str) {
        self.insert(Ticket::new(id, FieldValue::text(keywords)));
    }
}

impl TicketStore for MemoryStore {
    fn ticket(&self, id: TicketId) -> Option<Ticket> {
        self.tickets.get(&id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_resolves_inserted_tickets() {
        let mut store = MemoryStore::new();
        store.add(42, "bug, urgent");

        let ticket = store.ticket(42).unwrap();
        assert_eq!(ticket.id, 42);
        assert_eq!(ticket.keywords, FieldValue::text("bug, urgent"));
    }

    #[test]
    fn test_missing_ticket_resolves_to_none() {
        let store = MemoryStore::new();
        assert!(store.ticket(7).is_none());
    }
}
