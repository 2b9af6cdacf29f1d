//! Group model.

use serde::{Deserialize, Serialize};

/// A named collection of user ids ("members").
///
/// Groups are owned by the external document store; this service only reads
/// them to resolve notification targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Document id of the group
    pub id: String,
    /// Member user ids. Assumed unique upstream, but deduplicated defensively
    /// before any token lookup.
    #[serde(default)]
    pub members: Vec<String>,
}

impl Group {
    /// Member ids excluding the given creator, deduplicated in first-seen order.
    ///
    /// The creator is excluded even when their id appears multiple times in
    /// the member list.
    pub fn targets_excluding(&self, creator: Option<&str>) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        self.members
            .iter()
            .filter(|id| Some(id.as_str()) != creator)
            .filter(|id| seen.insert(id.as_str()))
            .cloned()
            .collect()
    }
}
