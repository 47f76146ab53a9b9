//! Billogram REST v2 wire types.
//!
//! Every response is wrapped as `{"status": "OK", "data": ...}`. Errors use
//! the same envelope with a status code such as `INVALID_PARAMETER` and a
//! `data.message`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::customer::{Address, Contact, CustomerRecord, DeliveryAddress, NewCustomer};
use crate::domain::foundation::{CustomerNo, InvoiceId};
use crate::domain::invoice::{CallbackDescriptor, DeliveryMethod, Invoice, InvoiceDraft, LineItem};

/// Response envelope.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub status: String,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn is_ok(&self) -> bool {
        self.status == "OK"
    }
}

/// `data` of an error envelope.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorData {
    #[serde(default)]
    pub message: Option<String>,
}

/// Customer numbers are integers on the wire; keep them opaque here.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumberOrString {
    Number(u64),
    Str(String),
}

impl NumberOrString {
    fn into_string(self) -> String {
        match self {
            NumberOrString::Number(n) => n.to_string(),
            NumberOrString::Str(s) => s,
        }
    }
}

/// Customer as returned by `GET /customer` and `POST /customer`.
#[derive(Debug, Clone, Deserialize)]
pub struct BillogramCustomer {
    pub customer_no: NumberOrString,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub org_no: Option<String>,
}

impl From<BillogramCustomer> for CustomerRecord {
    fn from(c: BillogramCustomer) -> Self {
        CustomerRecord {
            customer_no: CustomerNo::new(c.customer_no.into_string()),
            name: c.name.unwrap_or_default(),
            org_no: c.org_no,
        }
    }
}

/// Body of `POST /customer`.
#[derive(Debug, Serialize)]
pub struct CustomerBody<'a> {
    pub name: &'a str,
    pub company_type: &'a str,
    pub org_no: &'a str,
    pub notes: &'a str,
    pub contact: &'a Contact,
    pub address: &'a Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<&'a DeliveryAddress>,
}

impl<'a> From<&'a NewCustomer> for CustomerBody<'a> {
    fn from(c: &'a NewCustomer) -> Self {
        Self {
            name: &c.name,
            company_type: c.company_type.as_str(),
            org_no: c.org_no.as_str(),
            notes: &c.notes,
            contact: &c.contact,
            address: &c.address,
            delivery_address: c.delivery_address.as_ref(),
        }
    }
}

/// Reference to an existing customer inside an invoice.
#[derive(Debug, Serialize)]
pub struct CustomerRef {
    pub customer_no: serde_json::Value,
}

impl CustomerRef {
    /// Numeric customer numbers go out as numbers.
    fn new(customer_no: &CustomerNo) -> Self {
        let value = customer_no
            .as_str()
            .parse::<u64>()
            .map(serde_json::Value::from)
            .unwrap_or_else(|_| serde_json::Value::from(customer_no.as_str()));
        Self { customer_no: value }
    }
}

/// One row of an invoice body.
#[derive(Debug, Serialize)]
pub struct ItemBody<'a> {
    pub title: &'a str,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub vat: Option<Decimal>,
    pub count: u32,
    pub unit: &'a str,
}

impl<'a> From<&'a LineItem> for ItemBody<'a> {
    fn from(item: &'a LineItem) -> Self {
        Self {
            title: &item.title,
            price: item.price,
            vat: item.vat,
            count: item.count,
            unit: &item.unit,
        }
    }
}

/// Body of `POST /billogram`.
#[derive(Debug, Serialize)]
pub struct InvoiceBody<'a> {
    pub customer: CustomerRef,
    pub items: Vec<ItemBody<'a>>,
    pub currency: &'a str,
    pub due_days: u32,
    pub callbacks: &'a CallbackDescriptor,
}

impl<'a> From<&'a InvoiceDraft> for InvoiceBody<'a> {
    fn from(draft: &'a InvoiceDraft) -> Self {
        Self {
            customer: CustomerRef::new(&draft.customer_no),
            items: draft.items.iter().map(ItemBody::from).collect(),
            currency: &draft.currency,
            due_days: draft.due_days,
            callbacks: &draft.callbacks,
        }
    }
}

/// Invoice as returned by `POST /billogram`.
#[derive(Debug, Clone, Deserialize)]
pub struct BillogramInvoice {
    pub id: String,
    #[serde(default)]
    pub state: Option<String>,
}

impl From<BillogramInvoice> for Invoice {
    fn from(i: BillogramInvoice) -> Self {
        Invoice {
            id: InvoiceId::new(i.id),
            state: i.state,
        }
    }
}

/// Body of `POST /billogram/{id}/command/send`.
#[derive(Debug, Serialize)]
pub struct SendCommand {
    pub method: DeliveryMethod,
}
