//! In-memory transcript sink for testing.
//!
//! Captures every entry for assertions. Can be switched into a failing
//! mode to check that sink errors never reach the caller.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::SessionId;
use crate::ports::{TranscriptEntry, TranscriptError, TranscriptSink};

/// Transcript sink that keeps entries in memory.
///
/// # Example
///
/// ```ignore
/// let sink = Arc::new(InMemoryTranscriptSink::new());
/// orchestrator.handle_message("s1", "hello").await;
/// assert_eq!(sink.entry_count().await, 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryTranscriptSink {
    entries: Arc<RwLock<Vec<TranscriptEntry>>>,
    failing: Arc<AtomicBool>,
}

impl InMemoryTranscriptSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following append fail.
    pub fn fail_appends(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    // === Test Helpers ===

    pub async fn entries(&self) -> Vec<TranscriptEntry> {
        self.entries.read().await.clone()
    }

    pub async fn entries_for(&self, session_id: &SessionId) -> Vec<TranscriptEntry> {
        self.entries
            .read()
            .await
            .iter()
            .filter(|e| &e.session_id == session_id)
            .cloned()
            .collect()
    }

    pub async fn entry_count(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[async_trait]
impl TranscriptSink for InMemoryTranscriptSink {
    async fn append(&self, entry: TranscriptEntry) -> Result<(), TranscriptError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(TranscriptError::Unavailable("sink disabled".to_string()));
        }
        self.entries.write().await.push(entry);
        Ok(())
    }
}
