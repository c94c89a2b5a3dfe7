//! Session Store Port - Interface for persisting intake sessions.
//!
//! This port defines how intake sessions are saved, loaded and evicted,
//! supporting in-memory, file-based and Redis-backed storage. Every backend
//! enforces the idle timeout: an expired session is never returned.

use async_trait::async_trait;

use crate::domain::foundation::SessionId;
use crate::domain::intake::IntakeSession;

/// Errors that can occur during session storage operations
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    /// The stored record exists but cannot be read back.
    #[error("Corrupt session {session_id}: {reason}")]
    Corrupt {
        session_id: SessionId,
        reason: String,
    },

    #[error("Failed to serialize session: {0}")]
    SerializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),

    /// The backing service could not be reached.
    #[error("Session store unavailable: {0}")]
    Unavailable(String),
}

/// Port for persisting and loading intake sessions
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load a session
    ///
    /// # Returns
    /// `None` if no live session exists for the id (never stored, deleted
    /// or idle for longer than the timeout)
    ///
    /// # Errors
    /// Returns `SessionStoreError::Corrupt` if the record cannot be decoded
    async fn load(&self, session_id: &SessionId) -> Result<Option<IntakeSession>, SessionStoreError>;

    /// Save a session, replacing any previous version
    async fn save(&self, session: &IntakeSession) -> Result<(), SessionStoreError>;

    /// Delete a session. Deleting an unknown id is not an error.
    ///
    /// # Returns
    /// `true` if a session was removed
    async fn delete(&self, session_id: &SessionId) -> Result<bool, SessionStoreError>;

    /// Evict every session idle for longer than the timeout
    ///
    /// # Returns
    /// Number of sessions removed
    async fn purge_expired(&self) -> Result<usize, SessionStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corrupt_error_names_session() {
        let err = SessionStoreError::Corrupt {
            session_id: SessionId::new("s1").unwrap(),
            reason: "bad yaml".to_string(),
        };
        assert_eq!(err.to_string(), "Corrupt session s1: bad yaml");
    }

    #[test]
    fn unavailable_error_displays_reason() {
        let err = SessionStoreError::Unavailable("connection refused".to_string());
        assert_eq!(
            err.to_string(),
            "Session store unavailable: connection refused"
        );
    }
}
