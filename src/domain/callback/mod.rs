//! Billogram callback domain module.
//!
//! # Module Structure
//!
//! - `event` - Callback payload and event types
//! - `signature` - MD5 signature verification
//! - `outcome` - Event to note/status mapping
//! - `errors` - Callback error types

mod errors;
mod event;
mod outcome;
mod signature;

pub use errors::CallbackError;
pub use event::{BillogramEventType, CallbackBillogram, CallbackEvent, CallbackPayload};
pub use outcome::{outcome_for, EventOutcome};
pub use signature::{sign_callback, CallbackVerifier};
