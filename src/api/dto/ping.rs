//! Ping trigger request DTOs.

use serde::Deserialize;

use crate::models::{PingCreated, PingFields};

/// Body of a ping-creation trigger invocation.
///
/// Mirrors the field values of the created ping document. Every field is
/// optional; the pipeline applies display defaults for absent ones.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PingCreatedRequest {
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

impl PingCreatedRequest {
    /// Combines the body with the path parameters into a creation event.
    pub fn into_event(self, group_id: String, ping_id: String) -> PingCreated {
        PingCreated {
            group_id,
            ping_id,
            fields: PingFields {
                name: self.name,
                creator_name: self.creator_name,
                created_by: self.created_by,
            },
        }
    }
}
