//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, errors, state machine)
//! - `order` - Order aggregate, cart snapshot and status lifecycle
//! - `customer` - Buyer identity, classification and customer records
//! - `invoice` - Line items, drafts and delivery methods
//! - `callback` - Billogram callback parsing, signing and event mapping
//! - `gateway` - Payment method availability and invoice fee

pub mod callback;
pub mod customer;
pub mod foundation;
pub mod gateway;
pub mod invoice;
pub mod order;
