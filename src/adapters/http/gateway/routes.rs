//! Axum router configuration for the gateway endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    get_fees, get_gateway, handle_billogram_callback, health, process_checkout, GatewayAppState,
};

/// Create the gateway API router.
///
/// # Routes
/// - `POST /checkout` - Pay an order by invoice
/// - `GET /gateway` - Describe the payment method
/// - `POST /gateway/fees` - Fees for the chosen payment method
/// - `POST /callbacks/billogram` - Billogram callbacks (signature verified)
pub fn gateway_routes() -> Router<GatewayAppState> {
    Router::new()
        .route("/checkout", post(process_checkout))
        .route("/gateway", get(get_gateway))
        .route("/gateway/fees", post(get_fees))
        .route("/callbacks/billogram", post(handle_billogram_callback))
}

/// Create the complete gateway router, mounted under `/api` with `/health`
/// at the root.
pub fn gateway_router() -> Router<GatewayAppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/api", gateway_routes())
}
