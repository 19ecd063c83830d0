//! Ticket storage trait and request types.

use thiserror::Error;

use crate::ticket::{Ticket, TicketPriority, TicketStatus};

/// Error type for ticket operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TicketError {
    /// No ticket with this id.
    #[error("Ticket not found: {0}")]
    NotFound(u64),
}

/// Request to create a new ticket.
///
/// Field bounds are checked by the caller before the request reaches a store.
#[derive(Debug, Clone)]
pub struct CreateTicketRequest {
    pub title: String,
    pub description: String,
    pub priority: TicketPriority,
    pub assignee: Option<String>,
}

impl CreateTicketRequest {
    /// Create a request with default priority and no assignee.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            priority: TicketPriority::default(),
            assignee: None,
        }
    }

    /// Set the priority.
    pub fn with_priority(mut self, priority: TicketPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the assignee.
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }
}

/// Partial update of a ticket.
///
/// The fields follow two different policies:
/// - `title` is replace-if-non-empty: `None` and `Some("")` both keep the
///   current title.
/// - `status` and `assignee` are replace-if-provided: any `Some` value is
///   applied, so `assignee: Some("")` clears the assignee.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketUpdate {
    pub title: Option<String>,
    pub status: Option<TicketStatus>,
    pub assignee: Option<String>,
}

impl TicketUpdate {
    /// An update that changes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the status.
    pub fn with_status(mut self, status: TicketStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Set the assignee. An empty string clears it.
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    /// Fill every unset field from `other`.
    pub fn or(self, other: TicketUpdate) -> Self {
        Self {
            title: self.title.or(other.title),
            status: self.status.or(other.status),
            assignee: self.assignee.or(other.assignee),
        }
    }

    /// Apply the update to `ticket` in place.
    pub fn apply_to(self, ticket: &mut Ticket) {
        // replace-if-non-empty
        if let Some(title) = self.title.filter(|t| !t.is_empty()) {
            ticket.title = title;
        }
        // replace-if-provided
        if let Some(status) = self.status {
            ticket.status = status;
        }
        if let Some(assignee) = self.assignee {
            ticket.assignee = Some(assignee);
        }
    }
}

/// Result of an update: the new version of the ticket and the status it
/// held just before the update was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatedTicket {
    pub ticket: Ticket,
    pub previous_status: TicketStatus,
}

impl UpdatedTicket {
    /// Whether the update moved the ticket to a different status.
    pub fn status_changed(&self) -> bool {
        self.ticket.status != self.previous_status
    }
}

/// Trait for ticket storage backends.
///
/// Every method is atomic with respect to the others.
pub trait TicketStore: Send + Sync {
    /// Create a new ticket, assigning the next id and the creation time.
    fn create(&self, request: CreateTicketRequest) -> Result<Ticket, TicketError>;

    /// List all tickets in creation order.
    fn list(&self) -> Result<Vec<Ticket>, TicketError>;

    /// Get a ticket by ID.
    fn get(&self, id: u64) -> Result<Ticket, TicketError>;

    /// Update a ticket in place and return the new version.
    fn update(&self, id: u64, update: TicketUpdate) -> Result<Ticket, TicketError> {
        self.update_with_previous(id, update).map(|updated| updated.ticket)
    }

    /// Update a ticket in place, also reporting the status it had before,
    /// both read under the same lock.
    fn update_with_previous(
        &self,
        id: u64,
        update: TicketUpdate,
    ) -> Result<UpdatedTicket, TicketError>;

    /// Permanently delete a ticket.
    /// Returns the deleted ticket if found.
    fn delete(&self, id: u64) -> Result<Ticket, TicketError>;
}
