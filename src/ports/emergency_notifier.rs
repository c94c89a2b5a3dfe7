//! Emergency Notifier Port - Raised when a reply carries the emergency flag.
//!
//! Downstream alerting (paging staff, dashboards) is the adapter's job.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SessionId, Timestamp};
use crate::domain::intake::Topic;

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Emergency notification failed: {0}")]
    DeliveryFailed(String),
}

/// Alert describing why a reply was flagged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyAlert {
    pub session_id: SessionId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<Topic>,
    pub matched_keywords: Vec<String>,
    pub raised_at: Timestamp,
}

#[async_trait]
pub trait EmergencyNotifier: Send + Sync {
    async fn notify(&self, alert: EmergencyAlert) -> Result<(), NotifyError>;
}
