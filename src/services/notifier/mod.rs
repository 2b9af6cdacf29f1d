//! Ping fan-out notification service.

mod ping_notifier;
mod traits;

pub use ping_notifier::{NotifyOutcome, PingNotifier};
pub use traits::{GroupStore, PingMessage, PushReport, PushSender, TokenStore};
