//! HTTP DTOs for the gateway endpoints.
//!
//! Request and response shapes for checkout, the payment method listing and
//! cart fees. Callback bodies are not modelled here; the handler takes them
//! as raw bytes so the signature can be checked against exactly what arrived.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::application::ProcessCheckoutResult;
use crate::domain::customer::CheckoutFields;
use crate::domain::gateway::GatewayDescriptor;
use crate::domain::order::CartFee;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to pay an order by invoice.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutRequest {
    pub order_id: String,
    #[serde(default)]
    pub fields: CheckoutFields,
}

/// Request for the fees a payment method adds to the cart.
#[derive(Debug, Clone, Deserialize)]
pub struct FeesRequest {
    /// Payment method id the buyer picked.
    pub chosen_payment_method: String,
    /// Store currency; when absent the settlement currency is assumed.
    #[serde(default)]
    pub currency: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Successful checkout.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutResponse {
    pub result: String,
    pub redirect: String,
    pub customer_no: String,
    pub invoice_id: String,
    pub invoice_sent: bool,
}

impl From<ProcessCheckoutResult> for CheckoutResponse {
    fn from(result: ProcessCheckoutResult) -> Self {
        Self {
            result: result.result.to_string(),
            redirect: result.redirect,
            customer_no: result.customer_no.to_string(),
            invoice_id: result.invoice_id.to_string(),
            invoice_sent: result.invoice_sent,
        }
    }
}

/// Payment method as listed at checkout.
#[derive(Debug, Clone, Serialize)]
pub struct GatewayResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub available: bool,
    pub currency: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub invoice_fee: Decimal,
}

impl From<&GatewayDescriptor> for GatewayResponse {
    fn from(descriptor: &GatewayDescriptor) -> Self {
        Self {
            id: descriptor.id.clone(),
            title: descriptor.title.clone(),
            description: descriptor.description.clone(),
            available: descriptor.is_available(),
            currency: descriptor.settlement_currency.clone(),
            invoice_fee: descriptor.invoice_fee,
        }
    }
}

/// One cart fee.
#[derive(Debug, Clone, Serialize)]
pub struct FeeResponse {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl From<CartFee> for FeeResponse {
    fn from(fee: CartFee) -> Self {
        Self {
            name: fee.name,
            amount: fee.amount,
        }
    }
}

/// Fees to add to the cart.
#[derive(Debug, Clone, Serialize)]
pub struct FeesResponse {
    pub fees: Vec<FeeResponse>,
}

/// Standard error response format.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
    /// Whether the same request may succeed later.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub retryable: bool,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            retryable: false,
        }
    }

    pub fn retryable(mut self, retryable: bool) -> Self {
        self.retryable = retryable;
        self
    }
}
