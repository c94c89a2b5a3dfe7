//! In-Memory Session Store Adapter
//!
//! Keeps intake sessions in a map guarded by an async lock.
//! The default backend for single-instance deployments and tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{SessionId, Timestamp};
use crate::domain::intake::IntakeSession;
use crate::ports::{SessionStore, SessionStoreError};

/// In-memory storage for intake sessions
#[derive(Debug, Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, IntakeSession>>>,
    idle_timeout_secs: u64,
}

impl InMemorySessionStore {
    /// Create a store evicting sessions idle for longer than `idle_timeout_secs`
    pub fn new(idle_timeout_secs: u64) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            idle_timeout_secs,
        }
    }

    /// Number of stored sessions, expired ones included
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        self.sessions.write().await.clear();
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, session_id: &SessionId) -> Result<Option<IntakeSession>, SessionStoreError> {
        let now = Timestamp::now();
        {
            let sessions = self.sessions.read().await;
            match sessions.get(session_id) {
                None => return Ok(None),
                Some(session) if !session.is_expired(self.idle_timeout_secs, &now) => {
                    return Ok(Some(session.clone()));
                }
                Some(_) => {}
            }
        }

        // Expired: drop it so the caller starts fresh
        self.sessions.write().await.remove(session_id);
        Ok(None)
    }

    async fn save(&self, session: &IntakeSession) -> Result<(), SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.session_id().clone(), session.clone());
        Ok(())
    }

    async fn delete(&self, session_id: &SessionId) -> Result<bool, SessionStoreError> {
        Ok(self.sessions.write().await.remove(session_id).is_some())
    }

    async fn purge_expired(&self) -> Result<usize, SessionStoreError> {
        let now = Timestamp::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(self.idle_timeout_secs, &now));
        Ok(before - sessions.len())
    }
}
