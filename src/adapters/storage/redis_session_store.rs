//! Redis-backed session store for multi-instance deployments.
//!
//! Each session is one JSON string key written with `SET ... EX`, so Redis
//! evicts idle sessions by itself. Every save refreshes the expiry.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use crate::domain::foundation::{SessionId, Timestamp};
use crate::domain::intake::IntakeSession;
use crate::ports::{SessionStore, SessionStoreError};

const KEY_PREFIX: &str = "symptom-intake:session:";

/// Redis-backed storage for intake sessions
#[derive(Clone)]
pub struct RedisSessionStore {
    conn: MultiplexedConnection,
    idle_timeout_secs: u64,
}

impl RedisSessionStore {
    pub fn new(conn: MultiplexedConnection, idle_timeout_secs: u64) -> Self {
        Self {
            conn,
            idle_timeout_secs,
        }
    }

    /// Open a multiplexed connection to `url`.
    pub async fn connect(url: &str, idle_timeout_secs: u64) -> Result<Self, SessionStoreError> {
        let client =
            redis::Client::open(url).map_err(|e| SessionStoreError::Unavailable(e.to_string()))?;
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| SessionStoreError::Unavailable(e.to_string()))?;
        Ok(Self::new(conn, idle_timeout_secs))
    }

    fn key(session_id: &SessionId) -> String {
        format!("{}{}", KEY_PREFIX, session_id)
    }

    /// Expiry in seconds; Redis rejects a zero expiry.
    fn expiry(&self) -> u64 {
        self.idle_timeout_secs.max(1)
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn load(&self, session_id: &SessionId) -> Result<Option<IntakeSession>, SessionStoreError> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn
            .get(Self::key(session_id))
            .await
            .map_err(|e: redis::RedisError| SessionStoreError::Unavailable(e.to_string()))?;

        let Some(raw) = raw else {
            return Ok(None);
        };

        let session: IntakeSession =
            serde_json::from_str(&raw).map_err(|e| SessionStoreError::Corrupt {
                session_id: session_id.clone(),
                reason: e.to_string(),
            })?;

        // Key TTL and last activity can drift if the timeout was lowered
        if session.is_expired(self.idle_timeout_secs, &Timestamp::now()) {
            return Ok(None);
        }

        Ok(Some(session))
    }

    async fn save(&self, session: &IntakeSession) -> Result<(), SessionStoreError> {
        let json = serde_json::to_string(session)
            .map_err(|e| SessionStoreError::SerializationFailed(e.to_string()))?;

        let mut conn = self.conn.clone();
        conn.set_ex::<_, _, ()>(Self::key(session.session_id()), json, self.expiry())
            .await
            .map_err(|e: redis::RedisError| SessionStoreError::Unavailable(e.to_string()))?;
        Ok(())
    }

    async fn delete(&self, session_id: &SessionId) -> Result<bool, SessionStoreError> {
        let mut conn = self.conn.clone();
        let removed: i64 = conn
            .del(Self::key(session_id))
            .await
            .map_err(|e: redis::RedisError| SessionStoreError::Unavailable(e.to_string()))?;
        Ok(removed > 0)
    }

    async fn purge_expired(&self) -> Result<usize, SessionStoreError> {
        // Keys carry their own expiry
        Ok(0)
    }
}
