//! Seams between the fan-out pipeline and its external collaborators.
//!
//! The document store and the push-delivery service sit behind these traits
//! so the pipeline can be exercised against in-memory implementations.

use crate::error::AppResult;
use crate::models::Group;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Notification message for one ping-creation fan-out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingMessage {
    /// Notification title
    pub title: String,
    /// Notification body
    pub body: String,
    /// Alert sound name
    pub sound: String,
    /// Client-side routing marker
    pub click_action: String,
    /// Ping document id for deep-linking
    pub ping_id: String,
    /// Group document id for deep-linking
    pub group_id: String,
}

/// Aggregate result of a multicast send attempt
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushReport {
    /// Number of tokens the push service accepted the message for
    pub success_count: u64,
    /// Number of tokens that rejected the message
    pub failure_count: u64,
}

/// Read access to group records
#[async_trait]
pub trait GroupStore: Send + Sync {
    /// Fetches a group by id
    ///
    /// # Returns
    /// `Ok(None)` when no such group exists; this is a normal terminal
    /// outcome for the pipeline, not an error.
    async fn get_group(&self, group_id: &str) -> AppResult<Option<Group>>;
}

/// Read access to user push tokens
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Resolves the non-empty push tokens for the given user ids.
    ///
    /// Result order follows the underlying query and carries no meaning.
    /// Ids without a stored token are silently absent from the result.
    async fn fetch_tokens(&self, user_ids: &[String]) -> AppResult<Vec<String>>;
}

/// Multicast push delivery
///
/// Uses `async_trait` to support async methods with dynamic dispatch.
/// All implementations must be Send + Sync for use in async contexts.
#[async_trait]
pub trait PushSender: Send + Sync {
    /// Sends one message to all given tokens in a single batched call
    ///
    /// # Arguments
    /// * `tokens` - Recipient device tokens; never empty when called by the pipeline
    /// * `message` - The notification message to deliver
    ///
    /// # Returns
    /// Aggregate per-token success/failure counts
    async fn send_multicast(&self, tokens: &[String], message: &PingMessage)
        -> AppResult<PushReport>;

    /// Returns the sender name for logging/debugging
    fn name(&self) -> &'static str;
}
