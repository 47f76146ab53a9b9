//! SubmitInvoiceHandler - create the invoice in Billogram and optionally send it.

use std::sync::Arc;

use crate::domain::foundation::CustomerNo;
use crate::domain::invoice::{CallbackDescriptor, Invoice, InvoiceDraft, LineItem};
use crate::domain::order::Order;
use crate::ports::{BillingService, OrderStore};

use super::errors::{CheckoutError, RemoteResource};
use super::settings::CheckoutSettings;

/// Invoice created for an order.
#[derive(Debug, Clone)]
pub struct SubmittedInvoice {
    pub invoice: Invoice,

    /// Whether the send command was issued and accepted. A failed send
    /// leaves the invoice in Billogram to be sent by hand.
    pub sent: bool,
}

/// Creates the invoice for an order and records its id on the order.
pub struct SubmitInvoiceHandler {
    billing: Arc<dyn BillingService>,
    orders: Arc<dyn OrderStore>,
    settings: CheckoutSettings,
}

impl SubmitInvoiceHandler {
    pub fn new(
        billing: Arc<dyn BillingService>,
        orders: Arc<dyn OrderStore>,
        settings: CheckoutSettings,
    ) -> Self {
        Self {
            billing,
            orders,
            settings,
        }
    }

    /// Creates the invoice, stores its id on the order, then sends it when
    /// auto-send is on.
    ///
    /// # Errors
    ///
    /// - `RemoteCreateFailure` if Billogram did not create the invoice
    /// - `Store` if the invoice id could not be persisted
    pub async fn handle(
        &self,
        order: &Order,
        customer_no: &CustomerNo,
        items: Vec<LineItem>,
    ) -> Result<SubmittedInvoice, CheckoutError> {
        let draft = InvoiceDraft {
            currency: self.settings.currency.clone(),
            due_days: self.settings.due_days,
            customer_no: customer_no.clone(),
            items,
            callbacks: CallbackDescriptor::for_order(&order.id, &self.settings.callback_url),
        };

        let invoice = self.billing.create_invoice(&draft).await.map_err(|e| {
            tracing::error!(order_id = %order.id, error = %e, "Invoice creation failed");
            CheckoutError::remote_create(RemoteResource::Invoice, e)
        })?;

        self.orders
            .record_invoice(&order.id, invoice.id.clone())
            .await?;

        if !self.settings.send_invoice {
            return Ok(SubmittedInvoice {
                invoice,
                sent: false,
            });
        }

        let method = self.settings.delivery_method;
        match self.billing.send_invoice(&invoice.id, method).await {
            Ok(()) => Ok(SubmittedInvoice {
                invoice,
                sent: true,
            }),
            Err(e) => {
                tracing::warn!(
                    order_id = %order.id,
                    invoice_id = %invoice.id,
                    method = %method,
                    error = %e,
                    "Invoice created but not sent"
                );
                let note = format!(
                    "Invoice {} was created in Billogram but could not be sent: {}",
                    invoice.id, e.message
                );
                self.orders.add_note(&order.id, note).await?;
                Ok(SubmittedInvoice {
                    invoice,
                    sent: false,
                })
            }
        }
    }
}
