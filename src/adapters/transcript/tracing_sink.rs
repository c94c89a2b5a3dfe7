//! Transcript sink that writes each turn to the tracing log.

use async_trait::async_trait;

use crate::ports::{TranscriptEntry, TranscriptError, TranscriptSink};

/// Logs chat turns at `info` under the `transcript` target.
///
/// Message bodies are only included at `debug`, since they may contain
/// health details.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingTranscriptSink;

impl TracingTranscriptSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TranscriptSink for TracingTranscriptSink {
    async fn append(&self, entry: TranscriptEntry) -> Result<(), TranscriptError> {
        tracing::info!(
            target: "transcript",
            session_id = %entry.session_id,
            is_user = entry.is_user,
            length = entry.message.len(),
            timestamp = %entry.timestamp.as_datetime().to_rfc3339(),
            "Chat turn"
        );
        tracing::debug!(
            target: "transcript",
            session_id = %entry.session_id,
            message = %entry.message,
            "Chat turn body"
        );
        Ok(())
    }
}
