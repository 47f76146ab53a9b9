//! Billogram callback payloads.
//!
//! Only fields relevant to our processing are captured. Billogram also sends
//! a full copy of the invoice under `billogram`; we keep just its id.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Callback document posted by Billogram.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CallbackPayload {
    /// Unique id of this callback delivery.
    pub callback_id: String,

    /// Correlation payload: the order id the invoice was created for.
    #[serde(deserialize_with = "string_or_number")]
    pub custom: String,

    /// `md5(callback_id + sign_key)`, hex encoded.
    pub signature: String,

    pub event: CallbackEvent,

    #[serde(default)]
    pub billogram: Option<CallbackBillogram>,
}

/// The event that triggered the callback.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CallbackEvent {
    /// Event type, e.g. `Payment`.
    #[serde(rename = "type")]
    pub event_type: String,

    /// Type-specific data.
    #[serde(default)]
    pub data: serde_json::Value,

    #[serde(default)]
    pub created_at: Option<String>,
}

/// Invoice summary included with the callback.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CallbackBillogram {
    pub id: String,
}

impl CallbackEvent {
    pub fn parsed_type(&self) -> BillogramEventType {
        BillogramEventType::from_str(&self.event_type)
    }

    /// Outstanding balance after a payment or credit.
    ///
    /// A missing or null `remaining_sum` counts as zero. Returns `None` when
    /// the field is present but is not a number or numeric string.
    pub fn remaining_sum(&self) -> Option<Decimal> {
        match self.data.get("remaining_sum") {
            None | Some(serde_json::Value::Null) => Some(Decimal::ZERO),
            Some(value) => serde_json::from_value(value.clone()).ok(),
        }
    }
}

/// Billogram event types we understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillogramEventType {
    BillogramCreated,
    BillogramSent,
    DeliveryAccepted,
    EmailNotAccepted,
    DeliveryFailed,
    LetterSent,
    Resent,
    Overdue,
    Payment,
    Credit,
    /// Unknown or unhandled event type.
    Unknown,
}

impl BillogramEventType {
    /// Parse event type from string.
    pub fn from_str(s: &str) -> Self {
        match s {
            "BillogramCreated" => Self::BillogramCreated,
            "BillogramSent" => Self::BillogramSent,
            "DeliveryAccepted" => Self::DeliveryAccepted,
            "EmailNotAccepted" => Self::EmailNotAccepted,
            "DeliveryFailed" => Self::DeliveryFailed,
            "LetterSent" => Self::LetterSent,
            "Resent" => Self::Resent,
            "Overdue" => Self::Overdue,
            "Payment" => Self::Payment,
            "Credit" => Self::Credit,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BillogramCreated => "BillogramCreated",
            Self::BillogramSent => "BillogramSent",
            Self::DeliveryAccepted => "DeliveryAccepted",
            Self::EmailNotAccepted => "EmailNotAccepted",
            Self::DeliveryFailed => "DeliveryFailed",
            Self::LetterSent => "LetterSent",
            Self::Resent => "Resent",
            Self::Overdue => "Overdue",
            Self::Payment => "Payment",
            Self::Credit => "Credit",
            Self::Unknown => "unknown",
        }
    }
}

/// Shops send order ids as numbers or strings; Billogram echoes whichever it got.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Int(i64),
        UInt(u64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s,
        Raw::Int(i) => i.to_string(),
        Raw::UInt(u) => u.to_string(),
    })
}
