//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `BILLOGRAM_GATEWAY`
//! prefix and nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use billogram_gateway::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod billogram;
mod error;
mod gateway;
mod server;

pub use billogram::BillogramConfig;
pub use error::{ConfigError, ValidationError};
pub use gateway::GatewayConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Payment method settings
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Billogram API credentials and environment
    #[serde(default)]
    pub billogram: BillogramConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` if present, then reads variables with the
    /// `BILLOGRAM_GATEWAY` prefix:
    ///
    /// - `BILLOGRAM_GATEWAY__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `BILLOGRAM_GATEWAY__GATEWAY__INVOICE_FEE=29` -> `gateway.invoice_fee = 29`
    /// - `BILLOGRAM_GATEWAY__BILLOGRAM__SANDBOX=true` -> `billogram.sandbox = true`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("BILLOGRAM_GATEWAY")
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
    /// Returns `ValidationError` for the first invalid value found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.gateway.validate(self.is_production())?;
        self.billogram.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
