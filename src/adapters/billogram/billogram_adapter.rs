//! Billogram billing service adapter.
//!
//! Implements the `BillingService` trait against the Billogram REST v2 API.
//! Authentication is HTTP basic auth with the API user id and password.
//!
//! # Configuration
//!
//! ```ignore
//! let config = BillogramApiConfig::new(api_user, api_password).sandbox(true);
//! let adapter = BillogramAdapter::new(config)?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::RequestBuilder;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;

use crate::domain::customer::{CustomerRecord, NationalId, NewCustomer};
use crate::domain::foundation::InvoiceId;
use crate::domain::invoice::{DeliveryMethod, Invoice, InvoiceDraft};
use crate::ports::{BillingError, BillingService};

use super::api_types::{
    BillogramCustomer, BillogramInvoice, CustomerBody, Envelope, ErrorData, InvoiceBody,
    SendCommand,
};

/// Production API base URL.
pub const LIVE_BASE_URL: &str = "https://billogram.com/api/v2";

/// Sandbox API base URL.
pub const SANDBOX_BASE_URL: &str = "https://sandbox.billogram.com/api/v2";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Billogram API configuration.
#[derive(Clone)]
pub struct BillogramApiConfig {
    api_user: String,
    api_password: SecretString,
    base_url: String,
    timeout: Duration,
}

impl BillogramApiConfig {
    /// Create a configuration against the live API.
    pub fn new(api_user: impl Into<String>, api_password: SecretString) -> Self {
        Self {
            api_user: api_user.into(),
            api_password,
            base_url: LIVE_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Switch between the sandbox and live API.
    pub fn sandbox(mut self, sandbox: bool) -> Self {
        self.base_url = if sandbox { SANDBOX_BASE_URL } else { LIVE_BASE_URL }.to_string();
        self
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Billogram billing service adapter.
pub struct BillogramAdapter {
    config: BillogramApiConfig,
    http_client: reqwest::Client,
}

impl BillogramAdapter {
    /// Create a new adapter with the given configuration.
    pub fn new(config: BillogramApiConfig) -> Result<Self, BillingError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BillingError::network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Sends an authenticated request and unwraps the response envelope.
    async fn execute<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<Option<T>, BillingError> {
        let response = request
            .basic_auth(
                &self.config.api_user,
                Some(self.config.api_password.expose_secret()),
            )
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            let err = error_from_body(status.as_u16(), &body);
            tracing::error!(
                operation,
                status = status.as_u16(),
                error = %err,
                "Billogram request failed"
            );
            return Err(err);
        }

        let envelope: Envelope<serde_json::Value> =
            serde_json::from_str(&body).map_err(|e| unreadable(operation, e))?;

        if !envelope.is_ok() {
            tracing::error!(operation, status = %envelope.status, "Billogram rejected request");
            return Err(BillingError::provider(format!(
                "Billogram returned status {}",
                envelope.status
            ))
            .with_provider_code(envelope.status));
        }

        envelope
            .data
            .filter(|data| !data.is_null())
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| unreadable(operation, e))
    }
}

fn unreadable(operation: &str, e: serde_json::Error) -> BillingError {
    tracing::error!(operation, error = %e, "Unreadable Billogram response");
    BillingError::provider(format!("Failed to parse Billogram response: {}", e))
}

fn transport_error(e: reqwest::Error) -> BillingError {
    if e.is_timeout() {
        BillingError::timeout(e.to_string())
    } else {
        BillingError::network(e.to_string())
    }
}

/// Builds an error from a non-success response, keeping Billogram's own code.
fn error_from_body(status: u16, body: &str) -> BillingError {
    match serde_json::from_str::<Envelope<ErrorData>>(body) {
        Ok(envelope) => {
            let message = envelope
                .data
                .and_then(|d| d.message)
                .unwrap_or_else(|| format!("HTTP {}", status));
            BillingError::from_status(status, message).with_provider_code(envelope.status)
        }
        Err(_) => BillingError::from_status(status, format!("HTTP {}: {}", status, body)),
    }
}

fn missing_data(operation: &str) -> BillingError {
    BillingError::provider(format!("Billogram {} response had no data", operation))
}

#[async_trait]
impl BillingService for BillogramAdapter {
    async fn find_customer_by_org_no(
        &self,
        org_no: &NationalId,
    ) -> Result<Option<CustomerRecord>, BillingError> {
        let request = self.http_client.get(self.url("/customer")).query(&[
            ("page", "1"),
            ("page_size", "1"),
            ("filter_type", "field"),
            ("filter_field", "org_no"),
            ("filter_value", org_no.as_str()),
        ]);

        let customers: Vec<BillogramCustomer> = self
            .execute("find_customer", request)
            .await?
            .unwrap_or_default();

        Ok(customers.into_iter().next().map(CustomerRecord::from))
    }

    async fn create_customer(
        &self,
        customer: &NewCustomer,
    ) -> Result<CustomerRecord, BillingError> {
        let request = self
            .http_client
            .post(self.url("/customer"))
            .json(&CustomerBody::from(customer));

        let created: BillogramCustomer = self
            .execute("create_customer", request)
            .await?
            .ok_or_else(|| missing_data("create_customer"))?;

        tracing::info!(
            customer_no = ?created.customer_no,
            company_type = %customer.company_type,
            "Billogram customer created"
        );
        Ok(created.into())
    }

    async fn create_invoice(&self, draft: &InvoiceDraft) -> Result<Invoice, BillingError> {
        let request = self
            .http_client
            .post(self.url("/billogram"))
            .json(&InvoiceBody::from(draft));

        let invoice: BillogramInvoice = self
            .execute("create_invoice", request)
            .await?
            .ok_or_else(|| missing_data("create_invoice"))?;

        tracing::info!(
            invoice_id = %invoice.id,
            customer_no = %draft.customer_no,
            "Billogram invoice created"
        );
        Ok(invoice.into())
    }

    async fn send_invoice(
        &self,
        invoice_id: &InvoiceId,
        method: DeliveryMethod,
    ) -> Result<(), BillingError> {
        let request = self
            .http_client
            .post(self.url(&format!("/billogram/{}/command/send", invoice_id)))
            .json(&SendCommand { method });

        self.execute::<serde::de::IgnoredAny>("send_invoice", request)
            .await?;

        tracing::info!(invoice_id = %invoice_id, method = %method, "Billogram invoice sent");
        Ok(())
    }
}
