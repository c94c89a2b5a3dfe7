//! Transcript Sink Port - Outbound copy of every chat turn.
//!
//! The session history is the source of truth for the chat surface. A sink
//! receives each user and assistant message as it happens, for audit or
//! display elsewhere. Failures are logged by the caller and never affect the
//! reply.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SessionId, Timestamp};

#[derive(Debug, thiserror::Error)]
pub enum TranscriptError {
    #[error("Transcript sink unavailable: {0}")]
    Unavailable(String),
}

/// One chat message forwarded to the sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptEntry {
    pub session_id: SessionId,
    pub message: String,
    pub is_user: bool,
    pub timestamp: Timestamp,
}

#[async_trait]
pub trait TranscriptSink: Send + Sync {
    async fn append(&self, entry: TranscriptEntry) -> Result<(), TranscriptError>;
}
