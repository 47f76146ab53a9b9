//! Invoice drafts sent to Billogram and the invoices that come back.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CustomerNo, InvoiceId, OrderId};

use super::LineItem;

/// Callback configuration embedded in an invoice.
///
/// Billogram signs each callback with `md5(callback_id + sign_key)` and
/// echoes `custom` back, which is how callbacks find their order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackDescriptor {
    pub sign_key: String,
    pub url: String,
    pub custom: String,
}

impl CallbackDescriptor {
    /// Both the sign key and the correlation payload are the order id.
    pub fn for_order(order_id: &OrderId, url: impl Into<String>) -> Self {
        Self {
            sign_key: order_id.to_string(),
            url: url.into(),
            custom: order_id.to_string(),
        }
    }
}

/// Invoice to be created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceDraft {
    pub currency: String,
    pub due_days: u32,
    pub customer_no: CustomerNo,
    pub items: Vec<LineItem>,
    pub callbacks: CallbackDescriptor,
}

/// Invoice as Billogram reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,

    /// Billogram state, e.g. `Unattested`, `Sending`.
    pub state: Option<String>,
}
