//! File-based Session Store Adapter
//!
//! Stores each intake session as a YAML file on disk, one file per session
//! id. Handy for single-instance deployments that must survive restarts and
//! for inspecting conversations while debugging.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::warn;

use crate::domain::foundation::{SessionId, Timestamp};
use crate::domain::intake::IntakeSession;
use crate::ports::{SessionStore, SessionStoreError};

const EXTENSION: &str = "yaml";

/// File-based storage for intake sessions
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    base_path: PathBuf,
    idle_timeout_secs: u64,
}

impl FileSessionStore {
    /// Create a new file store rooted at `base_path`
    ///
    /// # Example
    /// ```ignore
    /// let store = FileSessionStore::new("./data/sessions", 1800);
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P, idle_timeout_secs: u64) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
            idle_timeout_secs,
        }
    }

    /// Path of the file for a session.
    ///
    /// Ids made of safe characters are used as-is; anything else becomes a
    /// SHA-256 digest so a client id can never escape the base directory and
    /// the name stays well under filesystem limits.
    fn session_path(&self, session_id: &SessionId) -> PathBuf {
        let raw = session_id.as_str();
        let is_safe = !raw.starts_with('.')
            && raw
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        let stem = if is_safe {
            format!("s-{}", raw)
        } else {
            let mut hasher = Sha256::new();
            hasher.update(raw.as_bytes());
            format!("h-{:x}", hasher.finalize())
        };
        self.base_path.join(format!("{}.{}", stem, EXTENSION))
    }

    async fn ensure_dir(&self) -> Result<(), SessionStoreError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| SessionStoreError::IoError(e.to_string()))
    }

    async fn read(&self, path: &Path) -> Result<Option<String>, SessionStoreError> {
        match fs::read_to_string(path).await {
            Ok(yaml) => Ok(Some(yaml)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SessionStoreError::IoError(e.to_string())),
        }
    }

    /// Removes the file only if it still holds `expected`.
    ///
    /// A save that lands after the sweep read the file replaces it with a
    /// fresh session, which must survive.
    async fn remove_if_unchanged(
        &self,
        path: &Path,
        expected: &str,
    ) -> Result<bool, SessionStoreError> {
        match self.read(path).await? {
            Some(current) if current == expected => self.remove(path).await,
            _ => Ok(false),
        }
    }

    async fn remove(&self, path: &Path) -> Result<bool, SessionStoreError> {
        match fs::remove_file(path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(SessionStoreError::IoError(e.to_string())),
        }
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self, session_id: &SessionId) -> Result<Option<IntakeSession>, SessionStoreError> {
        let path = self.session_path(session_id);
        let Some(yaml) = self.read(&path).await? else {
            return Ok(None);
        };

        let session: IntakeSession =
            serde_yaml::from_str(&yaml).map_err(|e| SessionStoreError::Corrupt {
                session_id: session_id.clone(),
                reason: e.to_string(),
            })?;

        if session.session_id() != session_id {
            return Err(SessionStoreError::Corrupt {
                session_id: session_id.clone(),
                reason: format!("file holds session {}", session.session_id()),
            });
        }

        if session.is_expired(self.idle_timeout_secs, &Timestamp::now()) {
            self.remove(&path).await?;
            return Ok(None);
        }

        Ok(Some(session))
    }

    async fn save(&self, session: &IntakeSession) -> Result<(), SessionStoreError> {
        self.ensure_dir().await?;

        let yaml = serde_yaml::to_string(session)
            .map_err(|e| SessionStoreError::SerializationFailed(e.to_string()))?;

        // Write to a sibling temp file first so readers never see half a session
        let path = self.session_path(session.session_id());
        let tmp = path.with_extension("yaml.tmp");
        fs::write(&tmp, yaml)
            .await
            .map_err(|e| SessionStoreError::IoError(e.to_string()))?;
        fs::rename(&tmp, &path)
            .await
            .map_err(|e| SessionStoreError::IoError(e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, session_id: &SessionId) -> Result<bool, SessionStoreError> {
        self.remove(&self.session_path(session_id)).await
    }

    async fn purge_expired(&self) -> Result<usize, SessionStoreError> {
        let mut entries = match fs::read_dir(&self.base_path).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(SessionStoreError::IoError(e.to_string())),
        };

        let now = Timestamp::now();
        let mut purged = 0;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| SessionStoreError::IoError(e.to_string()))?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            let Some(yaml) = self.read(&path).await? else {
                continue;
            };
            match serde_yaml::from_str::<IntakeSession>(&yaml) {
                Ok(session) if session.is_expired(self.idle_timeout_secs, &now) => {
                    if self.remove_if_unchanged(&path, &yaml).await? {
                        purged += 1;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping unreadable session file");
                }
            }
        }

        Ok(purged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::MAX_SESSION_ID_LENGTH;
    use crate::domain::intake::Topic;
    use tempfile::TempDir;

    fn session(id: &str, idle_for_secs: u64) -> IntakeSession {
        IntakeSession::new(
            SessionId::new(id).unwrap(),
            Timestamp::now().minus_secs(idle_for_secs),
        )
    }

    #[tokio::test]
    async fn save_and_load_session() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path(), 1800);

        let mut s = session("session-1718031234567", 0);
        s.enter_topic(Topic::Cough);
        s.append_turn(true, "bad cough", Some(Topic::Cough), Timestamp::now());
        store.save(&s).await.unwrap();

        let loaded = store.load(s.session_id()).await.unwrap();
        assert_eq!(loaded, Some(s));
    }

    #[tokio::test]
    async fn load_nonexistent_session_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path().join("not-created"), 1800);
        let id = SessionId::new("nobody").unwrap();
        assert_eq!(store.load(&id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn garbage_file_is_reported_corrupt() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path(), 1800);
        let id = SessionId::new("broken").unwrap();
        std::fs::write(store.session_path(&id), "{{ not: [yaml").unwrap();

        let result = store.load(&id).await;
        assert!(matches!(result, Err(SessionStoreError::Corrupt { .. })));
    }

    #[tokio::test]
    async fn unsafe_ids_stay_inside_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path(), 1800);
        let id = SessionId::new("../../etc/passwd").unwrap();
        let path = store.session_path(&id);
        assert_eq!(path.parent(), Some(temp_dir.path()));

        store.save(&session("../../etc/passwd", 0)).await.unwrap();
        assert!(store.load(&id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn longest_unsafe_id_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path(), 1800);
        let raw = format!("user:tenant/{}", "a".repeat(MAX_SESSION_ID_LENGTH - 12));
        assert_eq!(raw.len(), MAX_SESSION_ID_LENGTH);

        let mut s = session(&raw, 0);
        s.enter_topic(Topic::Fever);
        store.save(&s).await.unwrap();

        let path = store.session_path(s.session_id());
        assert_eq!(path.parent(), Some(temp_dir.path()));
        assert!(path.file_name().unwrap().len() < 80);
        assert_eq!(store.load(s.session_id()).await.unwrap(), Some(s));
    }

    #[tokio::test]
    async fn distinct_unsafe_ids_do_not_collide() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path(), 1800);
        let a = SessionId::new("user:a").unwrap();
        let b = SessionId::new("user:b").unwrap();
        assert_ne!(store.session_path(&a), store.session_path(&b));
    }

    #[tokio::test]
    async fn sweep_keeps_a_session_saved_after_it_was_read() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path(), 60);
        let stale = session("busy", 600);
        store.save(&stale).await.unwrap();
        let path = store.session_path(stale.session_id());
        let seen_by_sweep = std::fs::read_to_string(&path).unwrap();

        // A message arrives and refreshes the session before the removal
        store.save(&session("busy", 0)).await.unwrap();

        assert!(!store.remove_if_unchanged(&path, &seen_by_sweep).await.unwrap());
        assert!(store.load(stale.session_id()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn sweep_removes_an_untouched_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path(), 60);
        let stale = session("idle", 600);
        store.save(&stale).await.unwrap();
        let path = store.session_path(stale.session_id());
        let seen_by_sweep = std::fs::read_to_string(&path).unwrap();

        assert!(store.remove_if_unchanged(&path, &seen_by_sweep).await.unwrap());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn expired_session_is_removed_on_load() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path(), 60);
        let s = session("old", 3600);
        store.save(&s).await.unwrap();

        assert_eq!(store.load(s.session_id()).await.unwrap(), None);
        assert!(!store.session_path(s.session_id()).exists());
    }

    #[tokio::test]
    async fn purge_counts_expired_files() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path(), 60);
        store.save(&session("fresh", 0)).await.unwrap();
        store.save(&session("stale", 600)).await.unwrap();

        assert_eq!(store.purge_expired().await.unwrap(), 1);
        assert!(store
            .load(&SessionId::new("fresh").unwrap())
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn delete_removes_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path(), 1800);
        let s = session("s1", 0);
        store.save(&s).await.unwrap();
        assert!(store.delete(s.session_id()).await.unwrap());
        assert!(!store.delete(s.session_id()).await.unwrap());
    }
}
