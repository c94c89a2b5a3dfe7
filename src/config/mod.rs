//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `SYMPTOM_INTAKE` prefix and nested values use double underscores as separators.
//! Every section has defaults, so the service starts with an empty environment.
//!
//! # Example
//!
//! ```no_run
//! use symptom_intake::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod error;
mod intake;
mod redis;
mod server;
mod storage;

pub use error::{ConfigError, ValidationError};
pub use intake::IntakeConfig;
pub use redis::RedisConfig;
pub use server::{Environment, ServerConfig};
pub use storage::{StorageBackend, StorageConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Dialogue behaviour and session lifetime
    #[serde(default)]
    pub intake: IntakeConfig,

    /// Session store backend selection
    #[serde(default)]
    pub storage: StorageConfig,

    /// Redis connection, used when `storage.backend = redis`
    #[serde(default)]
    pub redis: RedisConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `SYMPTOM_INTAKE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `SYMPTOM_INTAKE__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `SYMPTOM_INTAKE__STORAGE__BACKEND=redis` -> `storage.backend = redis`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SYMPTOM_INTAKE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid, or
    /// if the redis backend is selected without a usable Redis URL.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.intake.validate()?;
        if self.storage.backend == StorageBackend::Redis {
            self.redis.validate()?;
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
