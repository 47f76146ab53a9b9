//! Billogram billing service adapter.
//!
//! Implements the `BillingService` port against Billogram REST v2:
//! - Customer lookup by org number and creation
//! - Invoice creation with signed callbacks
//! - Send command (email, letter or both)
//!
//! Credentials are handled via `secrecy::SecretString` and sent as HTTP
//! basic auth. Every request carries the configured timeout.

mod api_types;
mod billogram_adapter;
mod mock_billing_service;

pub use billogram_adapter::{BillogramAdapter, BillogramApiConfig, LIVE_BASE_URL, SANDBOX_BASE_URL};
pub use mock_billing_service::{MethodCall, MockBillingService};
