pub mod config;
pub mod ticket;

pub use config::{
    load_config, load_config_from_str, load_config_or_default, validate_config, Config,
    ConfigError, ServerConfig, ServiceConfig,
};
pub use ticket::{
    CreateTicketRequest, InMemoryTicketStore, Ticket, TicketError, TicketPriority, TicketStatus,
    TicketStore, TicketUpdate, UpdatedTicket,
};
