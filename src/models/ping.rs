//! Ping model and creation event.

use serde::{Deserialize, Serialize};

/// Fallback topic name when the created document carries none.
pub const DEFAULT_PING_NAME: &str = "A new topic";

/// Fallback creator display name.
pub const DEFAULT_CREATOR_NAME: &str = "Someone";

/// Field values of a newly created ping document.
///
/// All fields are optional in the trigger payload; display fields fall back
/// to fixed defaults when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingFields {
    /// Topic name
    #[serde(default)]
    pub name: Option<String>,
    /// Display name of the creator
    #[serde(rename = "creatorName", default)]
    pub creator_name: Option<String>,
    /// User id of the creator
    #[serde(rename = "createdBy", default)]
    pub created_by: Option<String>,
}

impl PingFields {
    /// Topic name, defaulting to [`DEFAULT_PING_NAME`] when absent
    pub fn ping_name(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_PING_NAME)
    }

    /// Creator display name, defaulting to [`DEFAULT_CREATOR_NAME`] when absent
    pub fn creator_name(&self) -> &str {
        self.creator_name.as_deref().unwrap_or(DEFAULT_CREATOR_NAME)
    }
}

/// A ping-creation event: the trigger subject of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PingCreated {
    /// Id of the group the ping was created in
    pub group_id: String,
    /// Document id of the created ping
    pub ping_id: String,
    /// Field values of the created document
    pub fields: PingFields,
}
