//! Gateway descriptor: availability, currency and invoice fee.

mod descriptor;

pub use descriptor::{GatewayDescriptor, GATEWAY_ID, INVOICE_FEE_NAME};
