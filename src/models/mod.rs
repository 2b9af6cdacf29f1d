//! Domain models for groups and pings.

mod group;
mod ping;

pub use group::Group;
pub use ping::{PingCreated, PingFields, DEFAULT_CREATOR_NAME, DEFAULT_PING_NAME};
