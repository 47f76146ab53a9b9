//! Checkout error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | OrderNotFound | 404 |
//! | InvalidIdentifier | 422 |
//! | ValidationFailed | 400 |
//! | RemoteLookupFailure | 502 (503 if retryable) |
//! | RemoteCreateFailure | 502 (503 if retryable) |
//! | Store | 500 |

use crate::domain::foundation::{DomainError, ErrorCode, OrderId};
use crate::ports::BillingError;

/// Message shown to the buyer when the identity number is rejected.
pub const INVALID_IDENTIFIER_MESSAGE: &str = "Not a valid social security number.";

/// What is being created when a remote create fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteResource {
    Customer,
    Invoice,
}

impl RemoteResource {
    pub fn as_str(&self) -> &'static str {
        match self {
            RemoteResource::Customer => "customer",
            RemoteResource::Invoice => "invoice",
        }
    }
}

/// Checkout errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// No order with this id in the shop.
    OrderNotFound(OrderId),

    /// Identity number did not normalize to 10 digits.
    InvalidIdentifier,

    /// Request was malformed.
    ValidationFailed {
        field: String,
        message: String,
    },

    /// Customer lookup in Billogram failed.
    RemoteLookupFailure(BillingError),

    /// Customer or invoice creation in Billogram failed.
    RemoteCreateFailure {
        resource: RemoteResource,
        error: BillingError,
    },

    /// Order store failed.
    Store(String),
}

impl CheckoutError {
    pub fn order_not_found(id: OrderId) -> Self {
        CheckoutError::OrderNotFound(id)
    }

    pub fn invalid_identifier() -> Self {
        CheckoutError::InvalidIdentifier
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        CheckoutError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn remote_lookup(error: BillingError) -> Self {
        CheckoutError::RemoteLookupFailure(error)
    }

    pub fn remote_create(resource: RemoteResource, error: BillingError) -> Self {
        CheckoutError::RemoteCreateFailure { resource, error }
    }

    pub fn store(message: impl Into<String>) -> Self {
        CheckoutError::Store(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            CheckoutError::OrderNotFound(_) => ErrorCode::OrderNotFound,
            CheckoutError::InvalidIdentifier => ErrorCode::InvalidIdentifier,
            CheckoutError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            CheckoutError::RemoteLookupFailure(_) | CheckoutError::RemoteCreateFailure { .. } => {
                ErrorCode::ExternalServiceError
            }
            CheckoutError::Store(_) => ErrorCode::StoreError,
        }
    }

    /// Returns a user-facing error message.
    pub fn message(&self) -> String {
        match self {
            CheckoutError::OrderNotFound(id) => format!("Order not found: {}", id),
            CheckoutError::InvalidIdentifier => INVALID_IDENTIFIER_MESSAGE.to_string(),
            CheckoutError::ValidationFailed { field, message } => {
                format!("Validation failed for {}: {}", field, message)
            }
            CheckoutError::RemoteLookupFailure(error) => {
                format!("Billogram customer lookup failed: {}", error.message)
            }
            CheckoutError::RemoteCreateFailure { resource, error } => format!(
                "Billogram {} could not be created: {}",
                resource.as_str(),
                error.message
            ),
            CheckoutError::Store(message) => format!("Order store error: {}", message),
        }
    }

    /// Whether the buyer can try again later with the same input.
    pub fn is_retryable(&self) -> bool {
        match self {
            CheckoutError::RemoteLookupFailure(error)
            | CheckoutError::RemoteCreateFailure { error, .. } => error.retryable,
            _ => false,
        }
    }

    /// The remote error behind this failure, if any.
    pub fn billing_error(&self) -> Option<&BillingError> {
        match self {
            CheckoutError::RemoteLookupFailure(error)
            | CheckoutError::RemoteCreateFailure { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl std::fmt::Display for CheckoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for CheckoutError {}

impl From<DomainError> for CheckoutError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => CheckoutError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "request".to_string()),
                message: err.message,
            },
            _ => CheckoutError::Store(err.message),
        }
    }
}
