//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `BillingService` - Remote invoicing service (customers, invoices)
//! - `OrderStore` - Host shop orders, stock and carts

mod billing_service;
mod order_store;

pub use billing_service::{BillingError, BillingErrorCode, BillingService};
pub use order_store::OrderStore;
