//! SessionSweeper - Periodic eviction of idle sessions.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

use super::SessionLocks;
use crate::ports::SessionStore;

/// Outcome of one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub sessions_purged: usize,
    pub locks_pruned: usize,
}

pub struct SessionSweeper {
    store: Arc<dyn SessionStore>,
    locks: Arc<SessionLocks>,
}

impl SessionSweeper {
    pub fn new(store: Arc<dyn SessionStore>, locks: Arc<SessionLocks>) -> Self {
        Self { store, locks }
    }

    /// Purges expired sessions and drops idle per-session locks.
    pub async fn sweep(&self) -> SweepReport {
        let sessions_purged = match self.store.purge_expired().await {
            Ok(n) => n,
            Err(e) => {
                error!(error = %e, "Session sweep failed");
                0
            }
        };
        let locks_pruned = self.locks.prune().await;

        let report = SweepReport {
            sessions_purged,
            locks_pruned,
        };
        if sessions_purged > 0 {
            info!(sessions_purged, locks_pruned, "Evicted idle sessions");
        } else {
            debug!(locks_pruned, "Session sweep found nothing to evict");
        }
        report
    }

    /// Sweeps every `interval` until the task is aborted.
    pub async fn run(self, interval: Duration) {
        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            self.sweep().await;
        }
    }

    /// Spawns [`run`](Self::run) on the current runtime.
    pub fn spawn(self, interval: Duration) -> tokio::task::JoinHandle<()> {
        tokio::spawn(self.run(interval))
    }
}
