//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `PRAYERGLOW` prefix
//! and nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use prayerglow::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod error;
mod premium;
mod server;

pub use auth::{AuthConfig, IdentityMode, DEFAULT_USER_ID_HEADER};
pub use error::{ConfigError, ValidationError};
pub use premium::PremiumConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has working defaults, so the service starts in header
/// identity mode with no environment at all.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Identity configuration (header or bearer JWT)
    #[serde(default)]
    pub auth: AuthConfig,

    /// Upgrade offer settings
    #[serde(default)]
    pub premium: PremiumConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with the `PRAYERGLOW` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `PRAYERGLOW__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `PRAYERGLOW__AUTH__MODE=bearer` -> `auth.mode = bearer`
    /// - `PRAYERGLOW__PREMIUM__DETAILED_UPGRADE_INFO=true`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PRAYERGLOW")
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
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.auth.validate(&self.server.environment)?;
        self.premium.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
