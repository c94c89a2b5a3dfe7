//! In-memory emergency notifier for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{EmergencyAlert, EmergencyNotifier, NotifyError};

/// Captures raised alerts for assertions.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEmergencyNotifier {
    alerts: Arc<RwLock<Vec<EmergencyAlert>>>,
    failing: Arc<AtomicBool>,
}

impl InMemoryEmergencyNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following notification fail.
    pub fn fail_notifications(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    // === Test Helpers ===

    pub async fn alerts(&self) -> Vec<EmergencyAlert> {
        self.alerts.read().await.clone()
    }

    pub async fn alert_count(&self) -> usize {
        self.alerts.read().await.len()
    }
}

#[async_trait]
impl EmergencyNotifier for InMemoryEmergencyNotifier {
    async fn notify(&self, alert: EmergencyAlert) -> Result<(), NotifyError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(NotifyError::DeliveryFailed("notifier disabled".to_string()));
        }
        self.alerts.write().await.push(alert);
        Ok(())
    }
}
