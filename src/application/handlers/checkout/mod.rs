//! Checkout handlers.
//!
//! ## Commands
//! - Processing an invoice checkout (identity check, customer, invoice)
//! - Resolving the Billogram customer for a buyer
//! - Submitting and sending the invoice

mod errors;
mod process_checkout;
mod resolve_customer;
mod settings;
mod submit_invoice;

pub use errors::{CheckoutError, RemoteResource, INVALID_IDENTIFIER_MESSAGE};
pub use process_checkout::{ProcessCheckoutCommand, ProcessCheckoutHandler, ProcessCheckoutResult};
pub use resolve_customer::ResolveCustomerHandler;
pub use settings::CheckoutSettings;
pub use submit_invoice::{SubmitInvoiceHandler, SubmittedInvoice};
