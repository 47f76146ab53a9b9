//! The payment method as the shop's checkout sees it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::order::CartFee;

/// Identifier the checkout uses for this payment method.
pub const GATEWAY_ID: &str = "billogram";

/// Name of the cart fee added when the buyer picks invoice payment.
pub const INVOICE_FEE_NAME: &str = "Invoice fee";

/// Invoice payment method offered at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayDescriptor {
    pub id: String,
    pub enabled: bool,
    pub title: String,
    pub description: String,

    /// Only carts in this currency may pay by invoice.
    pub settlement_currency: String,

    /// Fee added to the cart; zero means no fee.
    pub invoice_fee: Decimal,
}

impl GatewayDescriptor {
    pub fn new(
        enabled: bool,
        title: impl Into<String>,
        description: impl Into<String>,
        settlement_currency: impl Into<String>,
        invoice_fee: Decimal,
    ) -> Self {
        Self {
            id: GATEWAY_ID.to_string(),
            enabled,
            title: title.into(),
            description: description.into(),
            settlement_currency: settlement_currency.into(),
            invoice_fee,
        }
    }

    pub fn is_available(&self) -> bool {
        self.enabled
    }

    pub fn supports_currency(&self, code: &str) -> bool {
        self.settlement_currency.eq_ignore_ascii_case(code.trim())
    }

    /// Fees to add for the chosen payment method.
    pub fn invoice_fee_for(&self, chosen_method: &str) -> Option<CartFee> {
        if self.invoice_fee > Decimal::ZERO && chosen_method == self.id {
            Some(CartFee {
                name: INVOICE_FEE_NAME.to_string(),
                amount: self.invoice_fee,
            })
        } else {
            None
        }
    }
}
