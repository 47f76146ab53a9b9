//! Invoice line items and their assembly from an order.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::order::Order;

/// Unit label Billogram prints next to quantities.
pub const UNIT: &str = "unit";

/// One row on a Billogram invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub title: String,

    /// Unit price. Negative for discounts.
    pub price: Decimal,

    /// VAT rate in percent. Only product rows carry one.
    pub vat: Option<Decimal>,

    pub count: u32,

    pub unit: String,
}

impl LineItem {
    fn single(title: impl Into<String>, price: Decimal) -> Self {
        Self {
            title: title.into(),
            price,
            vat: None,
            count: 1,
            unit: UNIT.to_string(),
        }
    }
}

/// Builds the invoice rows for an order.
///
/// Row order is products, shipping, coupons, fees. Billogram prints rows in
/// the order they are sent.
pub fn build_invoice_items(order: &Order) -> Vec<LineItem> {
    let cart = &order.cart;
    let mut items = Vec::with_capacity(cart.items.len() + cart.coupons.len() + cart.fees.len() + 1);

    items.extend(cart.items.iter().map(|item| LineItem {
        title: item.title.clone(),
        price: item.unit_price_excl_tax,
        vat: Some(item.tax_rate),
        count: item.quantity,
        unit: UNIT.to_string(),
    }));

    if let Some(shipping) = order.shipping.as_ref().filter(|s| s.cost > Decimal::ZERO) {
        items.push(LineItem::single(
            format!("Shipping and Handling - {}", shipping.method),
            shipping.gross(),
        ));
    }

    items.extend(cart.coupons.iter().map(|coupon| {
        LineItem::single(format!("Coupon: {}", coupon.code), -coupon.discount_amount.abs())
    }));

    items.extend(
        cart.fees
            .iter()
            .map(|fee| LineItem::single(fee.name.clone(), fee.amount)),
    );

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::OrderId;
    use crate::domain::order::{AppliedCoupon, Cart, CartFee, CartItem, ShippingCharge};
    use rust_decimal_macros::dec;

    fn full_order() -> Order {
        let cart = Cart {
            items: vec![
                CartItem {
                    title: "Coffee mug".to_string(),
                    unit_price_excl_tax: dec!(80.00),
                    tax_rate: dec!(25),
                    quantity: 2,
                },
                CartItem {
                    title: "Cookbook".to_string(),
                    unit_price_excl_tax: dec!(188.68),
                    tax_rate: dec!(6),
                    quantity: 1,
                },
            ],
            coupons: vec![AppliedCoupon {
                code: "SUMMER10".to_string(),
                discount_amount: dec!(20),
            }],
            fees: vec![CartFee {
                name: "Invoice fee".to_string(),
                amount: dec!(29),
            }],
        };
        let shipping = ShippingCharge {
            method: "Flat rate".to_string(),
            cost: dec!(49),
            tax: dec!(12.25),
        };
        Order::new(OrderId::new("1001").unwrap(), cart, Some(shipping), dec!(447.93))
    }

    #[test]
    fn rows_are_products_then_shipping_then_coupons_then_fees() {
        let items = build_invoice_items(&full_order());

        let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Coffee mug",
                "Cookbook",
                "Shipping and Handling - Flat rate",
                "Coupon: SUMMER10",
                "Invoice fee",
            ]
        );
    }

    #[test]
    fn product_rows_carry_price_vat_and_quantity() {
        let items = build_invoice_items(&full_order());

        assert_eq!(items[0].price, dec!(80.00));
        assert_eq!(items[0].vat, Some(dec!(25)));
        assert_eq!(items[0].count, 2);
        assert_eq!(items[0].unit, UNIT);
    }

    #[test]
    fn shipping_row_includes_shipping_tax() {
        let items = build_invoice_items(&full_order());

        assert_eq!(items[2].price, dec!(61.25));
        assert_eq!(items[2].count, 1);
        assert_eq!(items[2].vat, None);
    }

    #[test]
    fn coupon_rows_are_negative() {
        let items = build_invoice_items(&full_order());
        assert_eq!(items[3].price, dec!(-20));
    }

    #[test]
    fn free_shipping_adds_no_row() {
        let mut order = full_order();
        order.shipping = Some(ShippingCharge {
            method: "Free shipping".to_string(),
            cost: dec!(0),
            tax: dec!(0),
        });

        let items = build_invoice_items(&order);
        assert!(items.iter().all(|i| !i.title.starts_with("Shipping")));
        assert_eq!(items.len(), 4);
    }

    #[test]
    fn order_without_shipping_coupons_or_fees_has_only_products() {
        let mut order = full_order();
        order.shipping = None;
        order.cart.coupons.clear();
        order.cart.fees.clear();

        let items = build_invoice_items(&order);
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn multiple_coupons_and_fees_keep_their_cart_order() {
        let mut order = full_order();
        order.cart.coupons.push(AppliedCoupon {
            code: "VIP".to_string(),
            discount_amount: dec!(5),
        });
        order.cart.fees.insert(
            0,
            CartFee {
                name: "Gift wrap".to_string(),
                amount: dec!(15),
            },
        );

        let items = build_invoice_items(&order);
        let tail: Vec<&str> = items[3..].iter().map(|i| i.title.as_str()).collect();
        assert_eq!(tail, vec!["Coupon: SUMMER10", "Coupon: VIP", "Gift wrap", "Invoice fee"]);
    }
}
