//! Dialogue configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::application::DEFAULT_MAX_HISTORY_TURNS;
use crate::domain::intake::DEFAULT_MAX_SLOT_RETRIES;

/// Dialogue behaviour and session lifetime
#[derive(Debug, Clone, Deserialize)]
pub struct IntakeConfig {
    /// Unrecognized answers tolerated per slot before the topic is dropped; 0 disables the cap
    #[serde(default = "default_max_slot_retries")]
    pub max_slot_retries: u32,

    /// Idle time after which a session is discarded
    #[serde(default = "default_idle_timeout")]
    pub session_idle_timeout_secs: u64,

    /// How often the background sweeper evicts idle sessions
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,

    /// Turns kept per session, oldest dropped first; 0 keeps everything
    #[serde(default = "default_max_history_turns")]
    pub max_history_turns: usize,
}

impl IntakeConfig {
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.session_idle_timeout_secs == 0 {
            return Err(ValidationError::InvalidIdleTimeout);
        }
        if self.sweep_interval_secs == 0 {
            return Err(ValidationError::InvalidSweepInterval);
        }
        Ok(())
    }
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            max_slot_retries: default_max_slot_retries(),
            session_idle_timeout_secs: default_idle_timeout(),
            sweep_interval_secs: default_sweep_interval(),
            max_history_turns: default_max_history_turns(),
        }
    }
}

fn default_max_slot_retries() -> u32 {
    DEFAULT_MAX_SLOT_RETRIES
}

fn default_idle_timeout() -> u64 {
    30 * 60
}

fn default_sweep_interval() -> u64 {
    60
}

fn default_max_history_turns() -> usize {
    DEFAULT_MAX_HISTORY_TURNS
}
