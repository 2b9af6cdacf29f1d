//! Business logic services.

pub mod notifier;

pub use notifier::PingNotifier;
