pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod tickets;

pub use error::ApiError;
pub use routes::create_router;
