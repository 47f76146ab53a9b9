//! ProcessCheckoutHandler - Command handler for invoice checkout.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::customer::{CheckoutFields, NationalId};
use crate::domain::foundation::{CustomerNo, InvoiceId, OrderId};
use crate::domain::invoice::build_invoice_items;
use crate::ports::{BillingService, OrderStore};

use super::errors::CheckoutError;
use super::resolve_customer::ResolveCustomerHandler;
use super::settings::CheckoutSettings;
use super::submit_invoice::SubmitInvoiceHandler;

/// Command to pay an order by invoice.
#[derive(Debug, Clone)]
pub struct ProcessCheckoutCommand {
    pub order_id: OrderId,
    pub fields: CheckoutFields,
}

/// Result of a successful checkout.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessCheckoutResult {
    /// Always `"success"`.
    pub result: &'static str,

    /// Receipt page for the order.
    pub redirect: String,

    pub customer_no: CustomerNo,
    pub invoice_id: InvoiceId,

    /// False when auto-send is off or the send command failed.
    pub invoice_sent: bool,
}

/// Handler for invoice checkout.
///
/// Validates the identity number, resolves the Billogram customer, creates
/// the invoice and then releases stock and cart. Nothing after a failed step
/// runs.
pub struct ProcessCheckoutHandler {
    orders: Arc<dyn OrderStore>,
    resolve_customer: ResolveCustomerHandler,
    submit_invoice: SubmitInvoiceHandler,
    settings: CheckoutSettings,
}

impl ProcessCheckoutHandler {
    pub fn new(
        billing: Arc<dyn BillingService>,
        orders: Arc<dyn OrderStore>,
        settings: CheckoutSettings,
    ) -> Self {
        Self {
            resolve_customer: ResolveCustomerHandler::new(
                billing.clone(),
                settings.home_country.clone(),
            ),
            submit_invoice: SubmitInvoiceHandler::new(billing, orders.clone(), settings.clone()),
            orders,
            settings,
        }
    }

    pub async fn handle(
        &self,
        cmd: ProcessCheckoutCommand,
    ) -> Result<ProcessCheckoutResult, CheckoutError> {
        let ProcessCheckoutCommand { order_id, fields } = cmd;

        // 1. Load order
        let order = self
            .orders
            .find_by_id(&order_id)
            .await?
            .ok_or_else(|| CheckoutError::order_not_found(order_id.clone()))?;

        // 2. Validate and store the identity number
        let org_no = NationalId::parse(fields.org_no.as_deref().unwrap_or_default())
            .map_err(|e| {
                tracing::info!(order_id = %order_id, reason = %e, "Rejected identity number");
                CheckoutError::invalid_identifier()
            })?;
        self.orders
            .record_identifier(&order_id, org_no.clone())
            .await?;

        // 3. Find or create the customer
        let customer = self.resolve_customer.handle(&fields, &org_no).await?;

        // 4. Create (and send) the invoice
        let items = build_invoice_items(&order);
        let submitted = match self
            .submit_invoice
            .handle(&order, &customer.customer_no, items)
            .await
        {
            Ok(submitted) => submitted,
            Err(err) => {
                let reason = err
                    .billing_error()
                    .map(|e| e.message.clone())
                    .unwrap_or_else(|| err.message());
                let note = format!("Invoice could not be created in Billogram: {}", reason);
                if let Err(store_err) = self.orders.add_note(&order_id, note).await {
                    tracing::error!(
                        order_id = %order_id,
                        error = %store_err,
                        "Failed to record invoice failure note"
                    );
                }
                return Err(err);
            }
        };

        // 5. Release stock and cart
        if self.settings.debug {
            tracing::debug!(order_id = %order_id, "Debug mode, stock and cart left untouched");
        } else {
            self.orders.reduce_stock(&order_id).await?;
            self.orders.empty_cart(&order_id).await?;
        }

        tracing::info!(
            order_id = %order_id,
            customer_no = %customer.customer_no,
            invoice_id = %submitted.invoice.id,
            sent = submitted.sent,
            "Invoice checkout completed"
        );

        Ok(ProcessCheckoutResult {
            result: "success",
            redirect: self.settings.receipt_url(&order_id),
            customer_no: customer.customer_no,
            invoice_id: submitted.invoice.id,
            invoice_sent: submitted.sent,
        })
    }
}
