//! HTTP request handlers.

pub mod account_handler;
pub mod upload_handler;

pub use account_handler::{account_routes, session_routes};
pub use upload_handler::upload_routes;
