//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod callback;
pub mod checkout;

pub use callback::{HandleCallbackCommand, HandleCallbackHandler, HandleCallbackResult};
pub use checkout::{
    CheckoutError, CheckoutSettings, ProcessCheckoutCommand, ProcessCheckoutHandler,
    ProcessCheckoutResult, RemoteResource, ResolveCustomerHandler, SubmitInvoiceHandler,
    SubmittedInvoice, INVALID_IDENTIFIER_MESSAGE,
};
