//! Customer domain module.
//!
//! # Module Structure
//!
//! - `national_id` - Identity/organisation number normalization
//! - `classification` - Individual/business, domestic/foreign
//! - `checkout_fields` - Buyer form data posted at checkout
//! - `record` - Existing and to-be-created Billogram customers

mod checkout_fields;
mod classification;
mod national_id;
mod record;

pub use checkout_fields::CheckoutFields;
pub use classification::EntityClassification;
pub use national_id::NationalId;
pub use record::{
    Address, Contact, CustomerRecord, DeliveryAddress, NewCustomer, CUSTOMER_NOTE,
};
