//! In-Memory Order Store Adapter
//!
//! Keeps orders, stock reductions and emptied carts in memory.
//! Stands in for the host shop in development and tests.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::customer::NationalId;
use crate::domain::foundation::{DomainError, ErrorCode, InvoiceId, OrderId};
use crate::domain::order::{Order, OrderStatus, StatusChange};
use crate::ports::OrderStore;

/// In-memory order store
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<HashMap<OrderId, Order>>>,
    stock_reduced: Arc<RwLock<HashSet<OrderId>>>,
    emptied_carts: Arc<RwLock<HashSet<OrderId>>>,
    failing: Arc<AtomicBool>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with the given orders
    pub async fn with_orders(orders: impl IntoIterator<Item = Order>) -> Self {
        let store = Self::new();
        for order in orders {
            store.insert(order).await;
        }
        store
    }

    /// Load orders from a JSON file holding an array of orders
    pub async fn load_json(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            DomainError::store(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let orders: Vec<Order> = serde_json::from_str(&raw).map_err(|e| {
            DomainError::store(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        Ok(Self::with_orders(orders).await)
    }

    pub async fn insert(&self, order: Order) {
        self.orders.write().await.insert(order.id.clone(), order);
    }

    pub async fn get(&self, id: &OrderId) -> Option<Order> {
        self.orders.read().await.get(id).cloned()
    }

    pub async fn stock_reduced(&self, id: &OrderId) -> bool {
        self.stock_reduced.read().await.contains(id)
    }

    pub async fn cart_emptied(&self, id: &OrderId) -> bool {
        self.emptied_carts.read().await.contains(id)
    }

    /// Make every operation fail with a store error (useful for tests)
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::store("Order store unavailable"));
        }
        Ok(())
    }

    /// Applies `change` to the stored order while holding the write lock.
    async fn modify<T>(
        &self,
        id: &OrderId,
        change: impl FnOnce(&mut Order) -> T,
    ) -> Result<T, DomainError> {
        self.check_available()?;
        let mut orders = self.orders.write().await;
        let order = orders.get_mut(id).ok_or_else(|| not_found(id))?;
        Ok(change(order))
    }

    async fn require(&self, id: &OrderId) -> Result<(), DomainError> {
        if self.orders.read().await.contains_key(id) {
            Ok(())
        } else {
            Err(not_found(id))
        }
    }
}

fn not_found(id: &OrderId) -> DomainError {
    DomainError::new(ErrorCode::OrderNotFound, format!("Order {} not found", id))
        .with_detail("order_id", id.as_str())
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, DomainError> {
        self.check_available()?;
        Ok(self.orders.read().await.get(id).cloned())
    }

    async fn add_note(&self, id: &OrderId, message: String) -> Result<(), DomainError> {
        self.modify(id, |order| order.add_note(message)).await
    }

    async fn advance_status(
        &self,
        id: &OrderId,
        target: OrderStatus,
    ) -> Result<StatusChange, DomainError> {
        self.modify(id, |order| order.advance_status(target))
            .await?
            .map_err(|e| DomainError::from(e).with_detail("order_id", id.as_str()))
    }

    async fn record_identifier(&self, id: &OrderId, org_no: NationalId) -> Result<(), DomainError> {
        self.modify(id, |order| order.record_identifier(org_no)).await
    }

    async fn record_invoice(&self, id: &OrderId, invoice_id: InvoiceId) -> Result<(), DomainError> {
        self.modify(id, |order| order.record_invoice(invoice_id)).await
    }

    async fn reduce_stock(&self, id: &OrderId) -> Result<(), DomainError> {
        self.check_available()?;
        self.require(id).await?;
        self.stock_reduced.write().await.insert(id.clone());
        Ok(())
    }

    async fn empty_cart(&self, id: &OrderId) -> Result<(), DomainError> {
        self.check_available()?;
        self.require(id).await?;
        self.emptied_carts.write().await.insert(id.clone());
        Ok(())
    }
}
