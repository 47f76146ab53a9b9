//! Mock billing service for testing.
//!
//! Provides an in-memory implementation of `BillingService` for unit and
//! integration tests. Supports:
//! - Pre-registered customers
//! - Error injection, globally or per method
//! - Call tracking, including the drafts and customers that were submitted

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::customer::{CustomerRecord, NationalId, NewCustomer};
use crate::domain::foundation::{CustomerNo, InvoiceId};
use crate::domain::invoice::{DeliveryMethod, Invoice, InvoiceDraft};
use crate::ports::{BillingError, BillingService};

/// Mock billing service for testing.
///
/// # Example
///
/// ```ignore
/// let billing = MockBillingService::new();
/// billing.set_method_error("create_invoice", BillingError::unavailable("down"));
///
/// let result = billing.create_invoice(&draft).await;
/// assert!(result.is_err());
/// ```
#[derive(Default)]
pub struct MockBillingService {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    /// Known customers by normalized org number.
    customers: HashMap<String, CustomerRecord>,

    created_customers: Vec<NewCustomer>,
    drafts: Vec<InvoiceDraft>,
    sent: Vec<(InvoiceId, DeliveryMethod)>,

    next_customer_no: u64,
    next_invoice_no: u64,

    /// Error to return on next call.
    next_error: Option<BillingError>,

    /// Specific errors by method name.
    method_errors: HashMap<String, BillingError>,

    call_log: Vec<MethodCall>,
}

/// Recorded method call for assertions.
#[derive(Debug, Clone)]
pub struct MethodCall {
    pub method: String,
    pub args: Vec<String>,
}

impl MockBillingService {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════════

    /// Register an existing customer.
    pub fn add_customer(&self, org_no: &NationalId, customer_no: impl Into<String>) {
        let record = CustomerRecord {
            customer_no: CustomerNo::new(customer_no),
            name: String::new(),
            org_no: Some(org_no.to_string()),
        };
        self.state().customers.insert(org_no.to_string(), record);
    }

    /// Set an error to return on the next call to any method.
    pub fn set_error(&self, error: BillingError) {
        self.state().next_error = Some(error);
    }

    /// Set an error for a specific method.
    pub fn set_method_error(&self, method: &str, error: BillingError) {
        self.state().method_errors.insert(method.to_string(), error);
    }

    pub fn clear_errors(&self) {
        let mut state = self.state();
        state.next_error = None;
        state.method_errors.clear();
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Call Tracking
    // ════════════════════════════════════════════════════════════════════════════

    pub fn calls(&self) -> Vec<MethodCall> {
        self.state().call_log.clone()
    }

    pub fn was_called(&self, method: &str) -> bool {
        self.state().call_log.iter().any(|c| c.method == method)
    }

    pub fn call_count(&self, method: &str) -> usize {
        self.state()
            .call_log
            .iter()
            .filter(|c| c.method == method)
            .count()
    }

    /// Customers submitted to `create_customer`.
    pub fn created_customers(&self) -> Vec<NewCustomer> {
        self.state().created_customers.clone()
    }

    /// Drafts submitted to `create_invoice`.
    pub fn drafts(&self) -> Vec<InvoiceDraft> {
        self.state().drafts.clone()
    }

    /// Invoices passed to `send_invoice`, with their delivery method.
    pub fn sent_invoices(&self) -> Vec<(InvoiceId, DeliveryMethod)> {
        self.state().sent.clone()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Internal Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn record_call(&self, method: &str, args: Vec<String>) {
        self.state().call_log.push(MethodCall {
            method: method.to_string(),
            args,
        });
    }

    fn check_error(&self, method: &str) -> Result<(), BillingError> {
        let mut state = self.state();

        if let Some(error) = state.method_errors.get(method) {
            return Err(error.clone());
        }

        // Global error is consumed
        if let Some(error) = state.next_error.take() {
            return Err(error);
        }

        Ok(())
    }
}

impl Clone for MockBillingService {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl BillingService for MockBillingService {
    async fn find_customer_by_org_no(
        &self,
        org_no: &NationalId,
    ) -> Result<Option<CustomerRecord>, BillingError> {
        self.record_call("find_customer_by_org_no", vec![org_no.to_string()]);
        self.check_error("find_customer_by_org_no")?;

        Ok(self.state().customers.get(org_no.as_str()).cloned())
    }

    async fn create_customer(
        &self,
        customer: &NewCustomer,
    ) -> Result<CustomerRecord, BillingError> {
        self.record_call(
            "create_customer",
            vec![customer.org_no.to_string(), customer.company_type.to_string()],
        );
        self.check_error("create_customer")?;

        let mut state = self.state();
        state.next_customer_no += 1;
        let record = CustomerRecord {
            customer_no: CustomerNo::new(state.next_customer_no.to_string()),
            name: customer.name.clone(),
            org_no: Some(customer.org_no.to_string()),
        };
        state
            .customers
            .insert(customer.org_no.to_string(), record.clone());
        state.created_customers.push(customer.clone());
        Ok(record)
    }

    async fn create_invoice(&self, draft: &InvoiceDraft) -> Result<Invoice, BillingError> {
        self.record_call(
            "create_invoice",
            vec![draft.customer_no.to_string(), draft.callbacks.custom.clone()],
        );
        self.check_error("create_invoice")?;

        let mut state = self.state();
        state.next_invoice_no += 1;
        let id = InvoiceId::new(format!("inv_{}", state.next_invoice_no));
        state.drafts.push(draft.clone());
        Ok(Invoice {
            id,
            state: Some("Unattested".to_string()),
        })
    }

    async fn send_invoice(
        &self,
        invoice_id: &InvoiceId,
        method: DeliveryMethod,
    ) -> Result<(), BillingError> {
        self.record_call(
            "send_invoice",
            vec![invoice_id.to_string(), method.to_string()],
        );
        self.check_error("send_invoice")?;

        self.state().sent.push((invoice_id.clone(), method));
        Ok(())
    }
}
