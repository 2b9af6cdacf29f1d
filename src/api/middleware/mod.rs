//! Middleware components for the HTTP API.

pub mod error_handler;
pub mod logging;
pub mod request_id;

pub use logging::logging_middleware;
pub use request_id::{RequestId, request_id_middleware};
