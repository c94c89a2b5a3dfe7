//! ResetSessionHandler - Clears a session ("clear chat").

use std::sync::Arc;
use tracing::info;

use super::SessionLocks;
use crate::domain::foundation::{DomainError, ErrorCode, SessionId};
use crate::ports::SessionStore;

#[derive(Debug, Clone)]
pub struct ResetSessionCommand {
    pub session_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetSessionResult {
    pub session_id: SessionId,
    /// False when there was nothing to clear.
    pub cleared: bool,
}

pub struct ResetSessionHandler {
    store: Arc<dyn SessionStore>,
    locks: Arc<SessionLocks>,
}

impl ResetSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>, locks: Arc<SessionLocks>) -> Self {
        Self { store, locks }
    }

    pub async fn handle(&self, cmd: ResetSessionCommand) -> Result<ResetSessionResult, DomainError> {
        let session_id = SessionId::new(cmd.session_id)?;

        let _guard = self.locks.acquire(&session_id).await;
        let cleared = self.store.delete(&session_id).await.map_err(|e| {
            DomainError::new(ErrorCode::StorageError, e.to_string())
                .with_detail("session_id", session_id.as_str())
        })?;

        info!(session_id = %session_id, cleared, "Session reset");
        Ok(ResetSessionResult {
            session_id,
            cleared,
        })
    }
}
