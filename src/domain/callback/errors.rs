//! Callback error types.

use thiserror::Error;

use crate::domain::foundation::ErrorCode;

/// Errors that occur while processing a Billogram callback.
///
/// None of these reach Billogram as a failure status: a non-200 answer makes
/// it redeliver, and none of these get better on redelivery.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallbackError {
    /// Body was not a callback document.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Required field missing or empty.
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// `md5(callback_id + sign_key)` did not match the supplied signature.
    #[error("Invalid signature")]
    InvalidSignature,

    /// Correlated order does not exist in the shop.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// Order store failed.
    #[error("Store error: {0}")]
    Store(String),
}

impl CallbackError {
    pub fn is_signature_failure(&self) -> bool {
        matches!(self, CallbackError::InvalidSignature)
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            CallbackError::ParseError(_) | CallbackError::MissingField(_) => {
                ErrorCode::ValidationFailed
            }
            CallbackError::InvalidSignature => ErrorCode::InvalidWebhookSignature,
            CallbackError::OrderNotFound(_) => ErrorCode::OrderNotFound,
            CallbackError::Store(_) => ErrorCode::StoreError,
        }
    }
}
