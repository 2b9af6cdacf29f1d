//! Data transfer objects for the HTTP API.

pub mod error;
pub mod ping;

pub use error::ErrorResponse;
pub use ping::PingCreatedRequest;
