//! FCM multicast push client.

pub mod client;
pub mod types;

pub use client::FcmClient;
