//! HTTP surface: search, filtered listing, catalog mutations, health.

pub mod error;
pub mod handler;
pub mod state;


pub use error::GatewayError;
pub use handler::create_router;
pub use state::HandlerState;
