//! Invoice domain module.
//!
//! # Module Structure
//!
//! - `line_item` - Invoice rows and their assembly from an order
//! - `delivery` - Email/letter delivery methods
//! - `draft` - Invoice drafts, callback descriptors, created invoices

mod delivery;
mod draft;
mod line_item;

pub use delivery::DeliveryMethod;
pub use draft::{CallbackDescriptor, Invoice, InvoiceDraft};
pub use line_item::{build_invoice_items, LineItem, UNIT};
