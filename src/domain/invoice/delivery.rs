//! How Billogram delivers an invoice to the customer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Delivery method for the `send` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DeliveryMethod {
    #[default]
    Email,
    Letter,
    #[serde(rename = "Email+Letter")]
    EmailAndLetter,
}

impl DeliveryMethod {
    /// Maps the numeric admin setting: 1 is letter, 2 is both, anything else email.
    pub fn from_setting(setting: u8) -> Self {
        match setting {
            1 => DeliveryMethod::Letter,
            2 => DeliveryMethod::EmailAndLetter,
            _ => DeliveryMethod::Email,
        }
    }

    /// Name Billogram expects in the send command.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryMethod::Email => "Email",
            DeliveryMethod::Letter => "Letter",
            DeliveryMethod::EmailAndLetter => "Email+Letter",
        }
    }
}

impl fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
