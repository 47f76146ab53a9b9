//! Billogram API configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Billogram API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BillogramConfig {
    /// API user id
    #[serde(default)]
    pub api_user: String,

    /// API password
    #[serde(default = "empty_secret")]
    pub api_password: SecretString,

    /// Use the sandbox environment
    #[serde(default)]
    pub sandbox: bool,

    /// Override the API base URL
    pub base_url: Option<String>,

    /// Outbound request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl BillogramConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate Billogram configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.api_user.trim().is_empty() {
            return Err(ValidationError::MissingRequired("BILLOGRAM__API_USER"));
        }
        if self.api_password.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("BILLOGRAM__API_PASSWORD"));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        if let Some(url) = &self.base_url {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(ValidationError::InvalidUrl("billogram.base_url"));
            }
        }
        Ok(())
    }
}

impl Default for BillogramConfig {
    fn default() -> Self {
        Self {
            api_user: String::new(),
            api_password: empty_secret(),
            sandbox: false,
            base_url: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn empty_secret() -> SecretString {
    SecretString::new(String::new())
}

fn default_timeout() -> u64 {
    30
}
