//! Ticket system for tracking support requests.

mod memory_store;
mod store;
mod types;

pub use memory_store::InMemoryTicketStore;
pub use store::{CreateTicketRequest, TicketError, TicketStore, TicketUpdate, UpdatedTicket};
pub use types::{
    Ticket, TicketPriority, TicketStatus, DESCRIPTION_MAX_LEN, DESCRIPTION_MIN_LEN,
    TITLE_MAX_LEN, TITLE_MIN_LEN,
};
