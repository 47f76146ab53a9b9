//! Customer records on the Billogram side.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::CustomerNo;

use super::checkout_fields::{text, CheckoutFields};
use super::{EntityClassification, NationalId};

/// Note stored on customers created by this gateway.
pub const CUSTOMER_NOTE: &str = "Customer from Webshop";

/// Postal address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street_address: String,
    pub zipcode: String,
    pub city: String,
    pub country: String,
}

/// Contact person.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Alternate delivery address, attached when the buyer ships elsewhere.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryAddress {
    pub name: String,
    pub street_address: String,
    pub zipcode: String,
    pub city: String,
    pub country: String,
}

/// An existing Billogram customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub customer_no: CustomerNo,
    pub name: String,
    pub org_no: Option<String>,
}

/// A customer to be created in Billogram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub address: Address,
    pub contact: Contact,
    pub org_no: NationalId,
    pub company_type: EntityClassification,
    pub notes: String,
    pub delivery_address: Option<DeliveryAddress>,
}

impl NewCustomer {
    /// Builds a customer from checkout fields.
    ///
    /// A non-blank billing company makes the customer a business. Billing
    /// country equal to `home_country` makes it domestic.
    pub fn from_checkout(fields: &CheckoutFields, org_no: NationalId, home_country: &str) -> Self {
        let is_business = fields.billing_company().is_some();
        let is_domestic = fields
            .billing_country
            .as_deref()
            .map(|c| c.trim().eq_ignore_ascii_case(home_country))
            .unwrap_or(false);

        let name = fields.billing_name();

        let delivery_address = fields.ship_to_different_address.then(|| DeliveryAddress {
            name: fields.shipping_name(),
            street_address: text(&fields.shipping_address_1),
            zipcode: text(&fields.shipping_postcode),
            city: text(&fields.shipping_city),
            country: text(&fields.shipping_country),
        });

        Self {
            address: Address {
                street_address: text(&fields.billing_address_1),
                zipcode: text(&fields.billing_postcode),
                city: text(&fields.billing_city),
                country: text(&fields.billing_country),
            },
            contact: Contact {
                name: name.clone(),
                email: text(&fields.billing_email),
                phone: text(&fields.billing_phone),
            },
            name,
            org_no,
            company_type: EntityClassification::classify(is_business, is_domestic),
            notes: CUSTOMER_NOTE.to_string(),
            delivery_address,
        }
    }
}
