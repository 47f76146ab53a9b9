//! HTTP handlers for the gateway endpoints.
//!
//! These handlers connect Axum routes to the checkout and callback handlers.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::{
    CheckoutError, CheckoutSettings, HandleCallbackCommand, HandleCallbackHandler,
    HandleCallbackResult, ProcessCheckoutCommand, ProcessCheckoutHandler,
};
use crate::config::GatewayConfig;
use crate::domain::callback::CallbackError;
use crate::domain::foundation::OrderId;
use crate::domain::gateway::GatewayDescriptor;
use crate::ports::{BillingService, OrderStore};

use super::dto::{
    CheckoutRequest, CheckoutResponse, ErrorResponse, FeeResponse, FeesRequest, FeesResponse,
    GatewayResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for the gateway routes.
///
/// Cloned per request; ports are Arc-wrapped.
#[derive(Clone)]
pub struct GatewayAppState {
    pub billing: Arc<dyn BillingService>,
    pub orders: Arc<dyn OrderStore>,
    pub settings: CheckoutSettings,
    pub descriptor: GatewayDescriptor,
    /// Answer 401 to callbacks with a bad signature instead of 200.
    pub reject_invalid_signatures: bool,
}

impl GatewayAppState {
    pub fn new(
        billing: Arc<dyn BillingService>,
        orders: Arc<dyn OrderStore>,
        config: &GatewayConfig,
    ) -> Self {
        Self {
            billing,
            orders,
            settings: config.checkout_settings(),
            descriptor: config.descriptor(),
            reject_invalid_signatures: config.reject_invalid_signatures,
        }
    }

    pub fn checkout_handler(&self) -> ProcessCheckoutHandler {
        ProcessCheckoutHandler::new(
            self.billing.clone(),
            self.orders.clone(),
            self.settings.clone(),
        )
    }

    pub fn callback_handler(&self) -> HandleCallbackHandler {
        HandleCallbackHandler::new(self.orders.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/checkout - Pay an order by invoice
pub async fn process_checkout(
    State(state): State<GatewayAppState>,
    Json(request): Json<CheckoutRequest>,
) -> Result<impl IntoResponse, GatewayApiError> {
    let order_id = OrderId::new(request.order_id.trim())
        .map_err(|e| CheckoutError::validation("order_id", e.to_string()))?;

    let handler = state.checkout_handler();
    let cmd = ProcessCheckoutCommand {
        order_id,
        fields: request.fields,
    };

    let result = handler.handle(cmd).await?;
    Ok(Json(CheckoutResponse::from(result)))
}

/// POST /api/callbacks/billogram - Handle a Billogram callback
///
/// Answers 200 whatever the outcome so Billogram stops retrying. The only
/// exception is a bad signature when rejection is switched on.
pub async fn handle_billogram_callback(
    State(state): State<GatewayAppState>,
    body: Bytes,
) -> Response {
    let handler = state.callback_handler();
    let cmd = HandleCallbackCommand {
        payload: body.to_vec(),
    };

    match handler.handle(cmd).await {
        Ok(result) => {
            if let HandleCallbackResult::NoteAdded { order_id, status, .. } = &result {
                tracing::debug!(
                    order_id = %order_id,
                    status = %status,
                    "Callback recorded without status change"
                );
            }
            StatusCode::OK.into_response()
        }
        Err(err) => {
            tracing::warn!(error_code = %err.code(), error = %err, "Billogram callback rejected");
            if err.is_signature_failure() && state.reject_invalid_signatures {
                return GatewayApiError::from(err).into_response();
            }
            StatusCode::OK.into_response()
        }
    }
}

/// GET /api/gateway - Describe the payment method
pub async fn get_gateway(State(state): State<GatewayAppState>) -> impl IntoResponse {
    Json(GatewayResponse::from(&state.descriptor))
}

/// POST /api/gateway/fees - Fees to add to the cart for the chosen method
pub async fn get_fees(
    State(state): State<GatewayAppState>,
    Json(request): Json<FeesRequest>,
) -> impl IntoResponse {
    let descriptor = &state.descriptor;
    let currency_ok = request
        .currency
        .as_deref()
        .map_or(true, |code| descriptor.supports_currency(code));

    let fees = if descriptor.is_available() && currency_ok {
        descriptor
            .invoice_fee_for(&request.chosen_payment_method)
            .map(FeeResponse::from)
            .into_iter()
            .collect()
    } else {
        Vec::new()
    };

    Json(FeesResponse { fees })
}

/// GET /health
pub async fn health() -> &'static str {
    "ok"
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error wrapper that converts gateway errors to HTTP responses.
#[derive(Debug)]
pub enum GatewayApiError {
    Checkout(CheckoutError),
    Callback(CallbackError),
}

impl From<CheckoutError> for GatewayApiError {
    fn from(err: CheckoutError) -> Self {
        Self::Checkout(err)
    }
}

impl From<CallbackError> for GatewayApiError {
    fn from(err: CallbackError) -> Self {
        Self::Callback(err)
    }
}

impl IntoResponse for GatewayApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            GatewayApiError::Checkout(err) => {
                let status = match err {
                    CheckoutError::OrderNotFound(_) => StatusCode::NOT_FOUND,
                    CheckoutError::InvalidIdentifier => StatusCode::UNPROCESSABLE_ENTITY,
                    CheckoutError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
                    CheckoutError::RemoteLookupFailure(_)
                    | CheckoutError::RemoteCreateFailure { .. } => {
                        if err.is_retryable() {
                            StatusCode::SERVICE_UNAVAILABLE
                        } else {
                            StatusCode::BAD_GATEWAY
                        }
                    }
                    CheckoutError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                let body = ErrorResponse::new(err.code().to_string(), err.message())
                    .retryable(err.is_retryable());
                (status, body)
            }
            GatewayApiError::Callback(err) => {
                let status = match err {
                    CallbackError::InvalidSignature => StatusCode::UNAUTHORIZED,
                    CallbackError::ParseError(_) | CallbackError::MissingField(_) => {
                        StatusCode::BAD_REQUEST
                    }
                    CallbackError::OrderNotFound(_) => StatusCode::NOT_FOUND,
                    CallbackError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, ErrorResponse::new(err.code().to_string(), err.to_string()))
            }
        };

        (status, Json(body)).into_response()
    }
}
