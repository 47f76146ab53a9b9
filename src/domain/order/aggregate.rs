//! Order aggregate.
//!
//! The host shop owns orders. This crate reads the cart and totals, and
//! writes status, the note log, and two attributes: the normalized buyer
//! identifier and the Billogram invoice id.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::customer::NationalId;
use crate::domain::foundation::{InvoiceId, OrderId, StateMachine, Timestamp, ValidationError};

use super::{Cart, OrderStatus, ShippingCharge};

/// A free-text entry in the order's note log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderNote {
    pub message: String,
    pub created_at: Timestamp,
}

/// Result of asking an order to move to a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChange {
    Changed { from: OrderStatus, to: OrderStatus },
    Unchanged,
}

/// Order aggregate.
///
/// # Invariants
///
/// - Status only moves forward (see `OrderStatus`)
/// - Notes are append-only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,

    pub status: OrderStatus,

    /// Cart contents at placement.
    #[serde(default)]
    pub cart: Cart,

    /// Shipping, when the order ships.
    #[serde(default)]
    pub shipping: Option<ShippingCharge>,

    /// Order total including tax.
    pub total: Decimal,

    #[serde(default)]
    pub notes: Vec<OrderNote>,

    /// Normalized identifier entered at checkout (`_org_no`).
    #[serde(default)]
    pub org_no: Option<NationalId>,

    /// Billogram invoice id (`_invoice_no`).
    #[serde(default)]
    pub invoice_no: Option<InvoiceId>,
}

impl Order {
    /// Creates a new pending order.
    pub fn new(
        id: OrderId,
        cart: Cart,
        shipping: Option<ShippingCharge>,
        total: Decimal,
    ) -> Self {
        Self {
            id,
            status: OrderStatus::Pending,
            cart,
            shipping,
            total,
            notes: Vec::new(),
            org_no: None,
            invoice_no: None,
        }
    }

    /// Appends a note to the log.
    pub fn add_note(&mut self, message: impl Into<String>) {
        self.notes.push(OrderNote {
            message: message.into(),
            created_at: Timestamp::now(),
        });
    }

    /// Moves the order to `target`.
    ///
    /// Asking for the current status is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for backward moves and moves out of a
    /// terminal status.
    pub fn advance_status(&mut self, target: OrderStatus) -> Result<StatusChange, ValidationError> {
        if self.status == target {
            return Ok(StatusChange::Unchanged);
        }

        let from = self.status;
        self.status = from.transition_to(target)?;
        Ok(StatusChange::Changed { from, to: target })
    }

    pub fn record_identifier(&mut self, org_no: NationalId) {
        self.org_no = Some(org_no);
    }

    pub fn record_invoice(&mut self, invoice_id: InvoiceId) {
        self.invoice_no = Some(invoice_id);
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Most recent note, if any.
    pub fn last_note(&self) -> Option<&str> {
        self.notes.last().map(|n| n.message.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn order() -> Order {
        Order::new(OrderId::new("1001").unwrap(), Cart::default(), None, dec!(100))
    }

    #[test]
    fn new_order_is_pending_without_notes() {
        let order = order();
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.notes.is_empty());
        assert!(order.org_no.is_none());
        assert!(order.invoice_no.is_none());
    }

    #[test]
    fn add_note_appends_in_order() {
        let mut order = order();
        order.add_note("first");
        order.add_note("second");
        assert_eq!(order.notes.len(), 2);
        assert_eq!(order.notes[0].message, "first");
        assert_eq!(order.last_note(), Some("second"));
    }

    #[test]
    fn advance_status_moves_forward() {
        let mut order = order();
        let change = order.advance_status(OrderStatus::Processing).unwrap();
        assert_eq!(
            change,
            StatusChange::Changed {
                from: OrderStatus::Pending,
                to: OrderStatus::Processing
            }
        );
        assert_eq!(order.status, OrderStatus::Processing);
    }

    #[test]
    fn advance_status_to_same_status_is_noop() {
        let mut order = order();
        order.advance_status(OrderStatus::Processing).unwrap();
        let change = order.advance_status(OrderStatus::Processing).unwrap();
        assert_eq!(change, StatusChange::Unchanged);
    }

    #[test]
    fn advance_status_rejects_leaving_terminal_state() {
        let mut order = order();
        order.advance_status(OrderStatus::Completed).unwrap();
        assert!(order.is_terminal());

        let result = order.advance_status(OrderStatus::Processing);
        assert!(result.is_err());
        assert_eq!(order.status, OrderStatus::Completed);
    }

    #[test]
    fn records_attributes() {
        let mut order = order();
        order.record_identifier(NationalId::parse("8001011234").unwrap());
        order.record_invoice(InvoiceId::new("inv_1"));
        assert_eq!(order.org_no.as_ref().map(|n| n.as_str()), Some("800101-1234"));
        assert_eq!(order.invoice_no, Some(InvoiceId::new("inv_1")));
    }
}
