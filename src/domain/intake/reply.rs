//! Reply returned to the chat surface for every message.

use serde::{Deserialize, Serialize};

use super::tier::Tier;
use super::topic::Topic;
use crate::domain::foundation::SessionId;

/// Client-side action attached to a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyAction {
    /// Client should run its emergency protocol.
    Emergency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    pub session_id: SessionId,
    pub message: String,
    pub emergency_flag: bool,
    /// True when this reply closed the active topic.
    pub topic_closed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<ReplyAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<Topic>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<Tier>,
}

impl Reply {
    pub fn is_emergency(&self) -> bool {
        self.emergency_flag
    }
}
