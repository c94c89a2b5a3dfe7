//! GetTranscriptHandler - Query handler for a session's chat history.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, SessionId};
use crate::domain::intake::Turn;
use crate::ports::{SessionStore, SessionStoreError};

#[derive(Debug, Clone)]
pub struct GetTranscriptQuery {
    pub session_id: String,
}

pub struct GetTranscriptHandler {
    store: Arc<dyn SessionStore>,
}

impl GetTranscriptHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Returns the history in order. Unknown or expired sessions have an
    /// empty history.
    pub async fn handle(&self, query: GetTranscriptQuery) -> Result<Vec<Turn>, DomainError> {
        let session_id = SessionId::new(query.session_id)?;

        match self.store.load(&session_id).await {
            Ok(Some(session)) => Ok(session.history().to_vec()),
            Ok(None) => Ok(Vec::new()),
            // A history the dialogue would discard is not worth showing either
            Err(SessionStoreError::Corrupt { .. }) => Ok(Vec::new()),
            Err(e) => Err(DomainError::new(ErrorCode::StorageError, e.to_string())
                .with_detail("session_id", session_id.as_str())),
        }
    }
}
