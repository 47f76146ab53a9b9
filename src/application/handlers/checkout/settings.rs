//! Settings the checkout handlers read.

use crate::domain::foundation::OrderId;
use crate::domain::invoice::DeliveryMethod;

/// Checkout settings, resolved from configuration at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSettings {
    /// Settlement currency of created invoices.
    pub currency: String,

    /// Days until the invoice is due.
    pub due_days: u32,

    /// Public URL Billogram posts callbacks to.
    pub callback_url: String,

    /// Send invoices right after creation.
    pub send_invoice: bool,

    pub delivery_method: DeliveryMethod,

    /// Leave stock and cart untouched.
    pub debug: bool,

    /// Country code that counts as domestic.
    pub home_country: String,

    /// Base of the order-received page the buyer is sent to.
    pub receipt_url_base: String,
}

impl CheckoutSettings {
    /// Receipt page for an order.
    pub fn receipt_url(&self, order_id: &OrderId) -> String {
        format!("{}/{}", self.receipt_url_base.trim_end_matches('/'), order_id)
    }
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        Self {
            currency: "SEK".to_string(),
            due_days: 14,
            callback_url: "http://localhost:8080/api/callbacks/billogram".to_string(),
            send_invoice: true,
            delivery_method: DeliveryMethod::Email,
            debug: false,
            home_country: "SE".to_string(),
            receipt_url_base: "http://localhost:8080/checkout/order-received".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receipt_url_appends_order_id() {
        let settings = CheckoutSettings {
            receipt_url_base: "https://shop.example/checkout/order-received/".to_string(),
            ..Default::default()
        };
        assert_eq!(
            settings.receipt_url(&OrderId::new("1001").unwrap()),
            "https://shop.example/checkout/order-received/1001"
        );
    }
}
