//! ResolveCustomerHandler - find or create the Billogram customer for a buyer.

use std::sync::Arc;

use crate::domain::customer::{CheckoutFields, CustomerRecord, NationalId, NewCustomer};
use crate::ports::BillingService;

use super::errors::{CheckoutError, RemoteResource};

/// Looks up the customer by normalized identity number and creates one when
/// none exists.
///
/// Lookup and create are not atomic: two concurrent checkouts with the same
/// number can both create a customer.
pub struct ResolveCustomerHandler {
    billing: Arc<dyn BillingService>,
    home_country: String,
}

impl ResolveCustomerHandler {
    pub fn new(billing: Arc<dyn BillingService>, home_country: impl Into<String>) -> Self {
        Self {
            billing,
            home_country: home_country.into(),
        }
    }

    pub async fn handle(
        &self,
        fields: &CheckoutFields,
        org_no: &NationalId,
    ) -> Result<CustomerRecord, CheckoutError> {
        let existing = self
            .billing
            .find_customer_by_org_no(org_no)
            .await
            .map_err(|e| {
                tracing::error!(org_no = %org_no, error = %e, "Customer lookup failed");
                CheckoutError::remote_lookup(e)
            })?;

        if let Some(customer) = existing {
            tracing::debug!(customer_no = %customer.customer_no, "Reusing Billogram customer");
            return Ok(customer);
        }

        let new_customer = NewCustomer::from_checkout(fields, org_no.clone(), &self.home_country);
        self.billing
            .create_customer(&new_customer)
            .await
            .map_err(|e| {
                tracing::error!(org_no = %org_no, error = %e, "Customer creation failed");
                CheckoutError::remote_create(RemoteResource::Customer, e)
            })
    }
}
