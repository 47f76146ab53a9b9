//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid URL for {0}")]
    InvalidUrl(&'static str),

    #[error("Callback URL must use HTTPS in production")]
    CallbackMustBeHttps,

    #[error("Invalid currency code: {0}")]
    InvalidCurrency(String),

    #[error("Invalid country code: {0}")]
    InvalidCountry(String),

    #[error("Due days must be at least 1")]
    InvalidDueDays,

    #[error("Invoice fee cannot be negative")]
    NegativeInvoiceFee,
}
