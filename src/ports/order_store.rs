//! Order store port.
//!
//! The host shop owns orders, stock and carts. This port is the narrow
//! surface the gateway needs from it.
//!
//! Writes are targeted: each one changes a single field of the order as it
//! is stored at the time of the write. There is no whole-order write.

use async_trait::async_trait;

use crate::domain::customer::NationalId;
use crate::domain::foundation::{DomainError, InvoiceId, OrderId};
use crate::domain::order::{Order, OrderStatus, StatusChange};

/// Port for the host shop's order persistence.
///
/// Every write returns `OrderNotFound` if the order doesn't exist and
/// `StoreError` on persistence failure.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Find an order by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, DomainError>;

    /// Append a note to the order's log.
    async fn add_note(&self, id: &OrderId, message: String) -> Result<(), DomainError>;

    /// Move the order to `target` from whatever status it has now.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` for a backward move or a move out of a
    ///   terminal status; the stored status is left as it was
    async fn advance_status(
        &self,
        id: &OrderId,
        target: OrderStatus,
    ) -> Result<StatusChange, DomainError>;

    /// Store the normalized buyer identifier (`_org_no`).
    async fn record_identifier(&self, id: &OrderId, org_no: NationalId) -> Result<(), DomainError>;

    /// Store the Billogram invoice id (`_invoice_no`).
    async fn record_invoice(&self, id: &OrderId, invoice_id: InvoiceId) -> Result<(), DomainError>;

    /// Reduce stock levels for the order's items.
    async fn reduce_stock(&self, id: &OrderId) -> Result<(), DomainError>;

    /// Empty the buyer's cart after a placed order.
    async fn empty_cart(&self, id: &OrderId) -> Result<(), DomainError>;
}
