//! In-memory ticket store implementation.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use tracing::debug;

use super::{
    CreateTicketRequest, Ticket, TicketError, TicketStatus, TicketStore, TicketUpdate,
    UpdatedTicket,
};

/// First id handed out by a fresh store.
const FIRST_TICKET_ID: u64 = 1;

struct Inner {
    /// Tickets in creation order.
    tickets: Vec<Ticket>,
    /// Next id to assign. Only ever incremented.
    next_id: u64,
}

impl Inner {
    fn position(&self, id: u64) -> Result<usize, TicketError> {
        self.tickets
            .iter()
            .position(|t| t.id == id)
            .ok_or(TicketError::NotFound(id))
    }
}

/// Ticket store that keeps every ticket in process memory.
///
/// Contents are lost when the process exits.
pub struct InMemoryTicketStore {
    inner: Mutex<Inner>,
}

impl InMemoryTicketStore {
    /// Create an empty store whose first ticket gets id 1.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                tickets: Vec::new(),
                next_id: FIRST_TICKET_ID,
            }),
        }
    }

    /// Number of tickets currently held.
    pub fn len(&self) -> usize {
        self.lock().tickets.len()
    }

    /// Whether the store holds no tickets.
    pub fn is_empty(&self) -> bool {
        self.lock().tickets.is_empty()
    }

    // No operation can panic while holding the lock, so a poisoned guard
    // still protects consistent data.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for InMemoryTicketStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TicketStore for InMemoryTicketStore {
    fn create(&self, request: CreateTicketRequest) -> Result<Ticket, TicketError> {
        let mut inner = self.lock();

        let ticket = Ticket {
            id: inner.next_id,
            title: request.title,
            description: request.description,
            status: TicketStatus::Open,
            priority: request.priority,
            assignee: request.assignee,
            created_at: Utc::now(),
        };
        inner.next_id += 1;
        inner.tickets.push(ticket.clone());

        debug!(ticket_id = ticket.id, priority = %ticket.priority, "Created ticket");
        Ok(ticket)
    }

    fn list(&self) -> Result<Vec<Ticket>, TicketError> {
        Ok(self.lock().tickets.clone())
    }

    fn get(&self, id: u64) -> Result<Ticket, TicketError> {
        let inner = self.lock();
        let index = inner.position(id)?;
        Ok(inner.tickets[index].clone())
    }

    fn update_with_previous(
        &self,
        id: u64,
        update: TicketUpdate,
    ) -> Result<UpdatedTicket, TicketError> {
        let mut inner = self.lock();
        let index = inner.position(id)?;

        let ticket = &mut inner.tickets[index];
        let previous_status = ticket.status;
        update.apply_to(ticket);

        debug!(ticket_id = id, status = %ticket.status, "Updated ticket");
        Ok(UpdatedTicket {
            ticket: ticket.clone(),
            previous_status,
        })
    }

    fn delete(&self, id: u64) -> Result<Ticket, TicketError> {
        let mut inner = self.lock();
        let index = inner.position(id)?;

        // Vec::remove shifts the tail, keeping relative order.
        let ticket = inner.tickets.remove(index);

        debug!(ticket_id = id, "Deleted ticket");
        Ok(ticket)
    }
}
