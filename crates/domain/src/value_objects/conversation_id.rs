//! Transcript identifier

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifies one chat transcript in logs
///
/// The sanitized copy of a transcript and the health chat prompt built from
/// it keep the id, so a provider call can be traced back to its session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(Uuid);

impl ConversationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConversationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // First group only; enough to tell sessions apart in a log stream
        let id = self.0.simple().to_string();
        f.write_str(&id[..8])
    }
}
