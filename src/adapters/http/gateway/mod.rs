//! HTTP adapter for the invoice gateway.
//!
//! Exposes checkout, the Billogram callback endpoint, the payment method
//! descriptor and a health probe.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CheckoutRequest, CheckoutResponse, ErrorResponse, FeeResponse, FeesRequest, FeesResponse,
    GatewayResponse,
};
pub use handlers::{GatewayApiError, GatewayAppState};
pub use routes::{gateway_router, gateway_routes};
