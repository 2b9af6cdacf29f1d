//! The ping fan-out pipeline.
//!
//! One invocation per ping-creation event: load the owning group, drop the
//! creator from the member list, resolve the remaining members' push tokens,
//! and send a single multicast notification. Missing group, no targets, and
//! no tokens are normal terminal outcomes; upstream failures propagate so
//! the invoking platform can apply its retry policy.

use std::sync::Arc;

use super::traits::{GroupStore, PingMessage, PushReport, PushSender, TokenStore};
use crate::error::AppResult;
use crate::models::PingCreated;

/// Fixed notification title
const NOTIFICATION_TITLE: &str = "New Ping in the Group!";

/// Alert sound name
const NOTIFICATION_SOUND: &str = "default";

/// Client-side routing marker the mobile client matches on
const CLICK_ACTION: &str = "FLUTTER_NOTIFICATION_CLICK";

/// Terminal outcome of one fan-out invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyOutcome {
    /// The owning group does not exist; nothing was sent
    GroupMissing,
    /// The member list minus the creator was empty; nothing was sent
    NoTargets,
    /// No target member had a non-empty token; nothing was sent
    NoTokens,
    /// The multicast call was made
    Sent(PushReport),
}

/// Ping fan-out notification service
///
/// Cloning is cheap; the stores and sender are shared behind Arc.
#[derive(Clone)]
pub struct PingNotifier {
    groups: Arc<dyn GroupStore>,
    tokens: Arc<dyn TokenStore>,
    push: Arc<dyn PushSender>,
}

impl PingNotifier {
    /// Creates a new PingNotifier
    ///
    /// # Arguments
    /// * `groups` - Group record reads
    /// * `tokens` - User token reads
    /// * `push` - Multicast push delivery
    pub fn new(
        groups: Arc<dyn GroupStore>,
        tokens: Arc<dyn TokenStore>,
        push: Arc<dyn PushSender>,
    ) -> Self {
        Self {
            groups,
            tokens,
            push,
        }
    }

    /// Handles one ping-creation event.
    ///
    /// Steps run strictly sequentially; each early exit is logged and
    /// completes the invocation successfully.
    ///
    /// # Errors
    /// Upstream failures (group fetch, token query, push send) propagate
    /// unhandled; retry is delegated to the invoking platform.
    pub async fn handle_ping_created(&self, event: &PingCreated) -> AppResult<NotifyOutcome> {
        let ping_name = event.fields.ping_name();
        let creator_name = event.fields.creator_name();
        let created_by = event.fields.created_by.as_deref();

        let Some(group) = self.groups.get_group(&event.group_id).await? else {
            tracing::info!(
                group_id = %event.group_id,
                ping_id = %event.ping_id,
                "Group does not exist, aborting notification"
            );
            return Ok(NotifyOutcome::GroupMissing);
        };

        let targets = group.targets_excluding(created_by);
        if targets.is_empty() {
            tracing::info!(
                group_id = %event.group_id,
                ping_id = %event.ping_id,
                "No members to notify"
            );
            return Ok(NotifyOutcome::NoTargets);
        }

        let tokens = self.tokens.fetch_tokens(&targets).await?;
        if tokens.is_empty() {
            tracing::info!(
                group_id = %event.group_id,
                ping_id = %event.ping_id,
                target_count = targets.len(),
                "No valid push tokens found for members"
            );
            return Ok(NotifyOutcome::NoTokens);
        }

        let message = PingMessage {
            title: NOTIFICATION_TITLE.to_string(),
            body: format!("{} started a ping: \"{}\"", creator_name, ping_name),
            sound: NOTIFICATION_SOUND.to_string(),
            click_action: CLICK_ACTION.to_string(),
            ping_id: event.ping_id.clone(),
            group_id: event.group_id.clone(),
        };

        let report = self.push.send_multicast(&tokens, &message).await?;

        tracing::info!(
            group_id = %event.group_id,
            ping_id = %event.ping_id,
            sender = self.push.name(),
            token_count = tokens.len(),
            success_count = report.success_count,
            failure_count = report.failure_count,
            "Notifications sent"
        );

        Ok(NotifyOutcome::Sent(report))
    }
}
