//! Cart snapshot taken from the host shop at order placement.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One product row in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product title shown on the invoice.
    pub title: String,

    /// Unit price excluding tax.
    pub unit_price_excl_tax: Decimal,

    /// VAT rate in percent, e.g. `25`.
    pub tax_rate: Decimal,

    pub quantity: u32,
}

/// A discount code applied to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedCoupon {
    pub code: String,

    /// Discount granted by this code, as a positive amount.
    pub discount_amount: Decimal,
}

/// An additional cart-level fee (for example the invoice fee).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartFee {
    pub name: String,
    pub amount: Decimal,
}

/// Shipping charged on the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingCharge {
    /// Shipping method name, e.g. "Flat rate".
    pub method: String,

    /// Shipping cost excluding tax.
    pub cost: Decimal,

    pub tax: Decimal,
}

impl ShippingCharge {
    /// Shipping cost including tax.
    pub fn gross(&self) -> Decimal {
        self.cost + self.tax
    }
}

/// Cart contents in the order the shop listed them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    #[serde(default)]
    pub items: Vec<CartItem>,

    #[serde(default)]
    pub coupons: Vec<AppliedCoupon>,

    #[serde(default)]
    pub fees: Vec<CartFee>,
}

impl Cart {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.coupons.is_empty() && self.fees.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn shipping_gross_includes_tax() {
        let shipping = ShippingCharge {
            method: "Flat rate".to_string(),
            cost: dec!(49.00),
            tax: dec!(12.25),
        };
        assert_eq!(shipping.gross(), dec!(61.25));
    }

    #[test]
    fn cart_deserializes_with_missing_sections() {
        let cart: Cart = serde_json::from_str(
            r#"{"items":[{"title":"Mug","unit_price_excl_tax":"80.00","tax_rate":"25","quantity":2}]}"#,
        )
        .unwrap();
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].unit_price_excl_tax, dec!(80.00));
        assert!(cart.coupons.is_empty());
        assert!(cart.fees.is_empty());
        assert!(!cart.is_empty());
    }
}
