//! Emergency notifier that raises a `warn!` event per alert.
//!
//! Log shippers can route the `emergency` target to on-call alerting.

use async_trait::async_trait;

use crate::ports::{EmergencyAlert, EmergencyNotifier, NotifyError};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEmergencyNotifier;

impl TracingEmergencyNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EmergencyNotifier for TracingEmergencyNotifier {
    async fn notify(&self, alert: EmergencyAlert) -> Result<(), NotifyError> {
        tracing::warn!(
            target: "emergency",
            session_id = %alert.session_id,
            topic = alert.topic.map(|t| t.as_str()).unwrap_or("none"),
            matched = %alert.matched_keywords.join(","),
            raised_at = %alert.raised_at.as_datetime().to_rfc3339(),
            "Emergency keywords detected"
        );
        Ok(())
    }
}
