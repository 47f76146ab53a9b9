//! Billing service port for the remote invoicing platform.
//!
//! Defines the contract for the invoicing service (Billogram). The checkout
//! needs four remote operations: look up a customer by identity number,
//! create a customer, create an invoice and send it.
//!
//! # Design
//!
//! - **No retries**: failures are classified and surfaced, never retried here
//! - **One call per operation**: each method maps to exactly one remote request

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::customer::{CustomerRecord, NationalId, NewCustomer};
use crate::domain::foundation::{DomainError, InvoiceId};
use crate::domain::invoice::{DeliveryMethod, Invoice, InvoiceDraft};

/// Port for the remote invoicing service.
#[async_trait]
pub trait BillingService: Send + Sync {
    /// Find the customer registered under `org_no`.
    ///
    /// Returns `None` when no customer matches.
    async fn find_customer_by_org_no(
        &self,
        org_no: &NationalId,
    ) -> Result<Option<CustomerRecord>, BillingError>;

    /// Create a customer and return the assigned customer number.
    async fn create_customer(&self, customer: &NewCustomer)
        -> Result<CustomerRecord, BillingError>;

    /// Create an invoice.
    async fn create_invoice(&self, draft: &InvoiceDraft) -> Result<Invoice, BillingError>;

    /// Trigger delivery of an existing invoice.
    async fn send_invoice(
        &self,
        invoice_id: &InvoiceId,
        method: DeliveryMethod,
    ) -> Result<(), BillingError>;
}

/// Errors from billing service operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingError {
    /// Error code for categorization.
    pub code: BillingErrorCode,

    /// Human-readable message.
    pub message: String,

    /// Billogram's error code (if available).
    pub provider_code: Option<String>,

    /// Whether the operation could succeed if tried again later.
    pub retryable: bool,
}

impl BillingError {
    pub fn new(code: BillingErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            provider_code: None,
            retryable: code.is_retryable(),
        }
    }

    pub fn with_provider_code(mut self, code: impl Into<String>) -> Self {
        self.provider_code = Some(code.into());
        self
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(BillingErrorCode::NetworkError, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(BillingErrorCode::Timeout, message)
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(BillingErrorCode::AuthenticationError, message)
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(BillingErrorCode::RateLimitExceeded, message)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(BillingErrorCode::InvalidRequest, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(BillingErrorCode::ServiceUnavailable, message)
    }

    pub fn not_found(resource: &str) -> Self {
        Self::new(BillingErrorCode::NotFound, format!("{} not found", resource))
    }

    /// Response arrived but could not be understood.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(BillingErrorCode::ProviderError, message)
    }

    /// Classifies a non-success HTTP status.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let code = match status {
            401 | 403 => BillingErrorCode::AuthenticationError,
            404 => BillingErrorCode::NotFound,
            429 => BillingErrorCode::RateLimitExceeded,
            400..=499 => BillingErrorCode::InvalidRequest,
            500..=599 => BillingErrorCode::ServiceUnavailable,
            _ => BillingErrorCode::Unknown,
        };
        Self::new(code, message)
    }
}

impl std::fmt::Display for BillingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for BillingError {}

impl From<BillingError> for DomainError {
    fn from(err: BillingError) -> Self {
        use crate::domain::foundation::ErrorCode;

        let code = match err.code {
            BillingErrorCode::NotFound => ErrorCode::NotFound,
            _ => ErrorCode::ExternalServiceError,
        };

        DomainError::new(code, err.message)
    }
}

/// Billing error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingErrorCode {
    /// Connection could not be made or was dropped.
    NetworkError,

    /// Request exceeded the configured timeout.
    Timeout,

    /// API credentials rejected.
    AuthenticationError,

    /// Too many requests.
    RateLimitExceeded,

    /// Billogram rejected the request contents.
    InvalidRequest,

    /// Billogram answered with a server error.
    ServiceUnavailable,

    NotFound,

    /// Malformed or unexpected response body.
    ProviderError,

    Unknown,
}

impl BillingErrorCode {
    /// Check if this error type is typically retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            BillingErrorCode::NetworkError
                | BillingErrorCode::Timeout
                | BillingErrorCode::RateLimitExceeded
                | BillingErrorCode::ServiceUnavailable
        )
    }
}

impl std::fmt::Display for BillingErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BillingErrorCode::NetworkError => "network_error",
            BillingErrorCode::Timeout => "timeout",
            BillingErrorCode::AuthenticationError => "authentication_error",
            BillingErrorCode::RateLimitExceeded => "rate_limit_exceeded",
            BillingErrorCode::InvalidRequest => "invalid_request",
            BillingErrorCode::ServiceUnavailable => "service_unavailable",
            BillingErrorCode::NotFound => "not_found",
            BillingErrorCode::ProviderError => "provider_error",
            BillingErrorCode::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}
