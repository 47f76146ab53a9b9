//! Callback handlers.
//!
//! ## Commands
//! - Processing Billogram callbacks (signature check, note, status)

mod handle_callback;

pub use handle_callback::{HandleCallbackCommand, HandleCallbackHandler, HandleCallbackResult};
