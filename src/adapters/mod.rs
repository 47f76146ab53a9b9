//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `billogram` - Billogram REST client and an in-memory mock
//! - `memory` - In-memory order store
//! - `http` - Axum routes for checkout and callbacks

pub mod billogram;
pub mod http;
pub mod memory;

pub use billogram::{BillogramAdapter, BillogramApiConfig, MockBillingService};
pub use http::{gateway_router, GatewayAppState};
pub use memory::InMemoryOrderStore;
