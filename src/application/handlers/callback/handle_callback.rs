//! HandleCallbackHandler - Command handler for Billogram callbacks.

use std::sync::Arc;

use crate::domain::callback::{outcome_for, BillogramEventType, CallbackError, CallbackVerifier};
use crate::domain::foundation::{DomainError, ErrorCode, OrderId};
use crate::domain::order::{OrderStatus, StatusChange};
use crate::ports::OrderStore;

/// Command to handle a Billogram callback.
#[derive(Debug, Clone)]
pub struct HandleCallbackCommand {
    /// Raw callback body.
    pub payload: Vec<u8>,
}

/// Result of callback processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleCallbackResult {
    /// Note recorded and order moved to a new status.
    StatusUpdated {
        order_id: OrderId,
        from: OrderStatus,
        to: OrderStatus,
        note: &'static str,
    },
    /// Note recorded, status left as it was.
    NoteAdded {
        order_id: OrderId,
        status: OrderStatus,
        note: &'static str,
    },
    /// Event type we do not act on.
    Ignored {
        order_id: OrderId,
        event_type: String,
    },
}

/// Handler for Billogram callbacks.
///
/// Verifies the signature, maps the event to a note and target status, and
/// updates the order. Status only moves forward; a callback that would move
/// a finished order still has its note recorded.
pub struct HandleCallbackHandler {
    orders: Arc<dyn OrderStore>,
    verifier: CallbackVerifier,
}

impl HandleCallbackHandler {
    pub fn new(orders: Arc<dyn OrderStore>) -> Self {
        Self {
            orders,
            verifier: CallbackVerifier::new(),
        }
    }

    pub async fn handle(
        &self,
        cmd: HandleCallbackCommand,
    ) -> Result<HandleCallbackResult, CallbackError> {
        // 1. Parse and verify
        let callback = self.verifier.verify_and_parse(&cmd.payload)?;
        let order_id = OrderId::new(callback.custom.trim())
            .map_err(|_| CallbackError::MissingField("custom"))?;
        let event_type = callback.event.event_type.clone();

        // 2. Map event
        let Some(outcome) = outcome_for(&callback.event) else {
            if callback.event.parsed_type() == BillogramEventType::Unknown {
                tracing::info!(
                    order_id = %order_id,
                    event_type = %event_type,
                    "Ignoring unhandled Billogram event"
                );
            } else {
                tracing::warn!(
                    order_id = %order_id,
                    event_type = %event_type,
                    data = %callback.event.data,
                    "Ignoring Billogram event with unreadable remaining_sum"
                );
            }
            return Ok(HandleCallbackResult::Ignored {
                order_id,
                event_type,
            });
        };

        // 3. Record note and move status on the stored order
        self.orders
            .add_note(&order_id, outcome.note.to_string())
            .await
            .map_err(|e| store_error(&order_id, e))?;

        let change = match self.orders.advance_status(&order_id, outcome.status).await {
            Ok(change) => change,
            Err(e) if e.code == ErrorCode::InvalidStateTransition => {
                tracing::info!(
                    order_id = %order_id,
                    target = %outcome.status,
                    reason = %e,
                    "Status left unchanged"
                );
                StatusChange::Unchanged
            }
            Err(e) => return Err(store_error(&order_id, e)),
        };

        let result = match change {
            StatusChange::Changed { from, to } => HandleCallbackResult::StatusUpdated {
                order_id,
                from,
                to,
                note: outcome.note,
            },
            StatusChange::Unchanged => {
                let status = self
                    .orders
                    .find_by_id(&order_id)
                    .await
                    .map_err(|e| store_error(&order_id, e))?
                    .ok_or_else(|| CallbackError::OrderNotFound(order_id.to_string()))?
                    .status;
                HandleCallbackResult::NoteAdded {
                    order_id,
                    status,
                    note: outcome.note,
                }
            }
        };

        tracing::info!(
            event_type = %event_type,
            callback_id = %callback.callback_id,
            result = ?result,
            "Billogram callback processed"
        );

        Ok(result)
    }
}

fn store_error(order_id: &OrderId, err: DomainError) -> CallbackError {
    match err.code {
        ErrorCode::OrderNotFound => CallbackError::OrderNotFound(order_id.to_string()),
        _ => CallbackError::Store(err.message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryOrderStore;
    use crate::domain::callback::sign_callback;
    use crate::domain::order::{Cart, Order};
    use rust_decimal_macros::dec;

    fn order_id() -> OrderId {
        OrderId::new("1001").unwrap()
    }

    fn payload(event_type: &str, data: serde_json::Value) -> Vec<u8> {
        signed_payload("cb_1", "1001", event_type, data)
    }

    fn signed_payload(
        callback_id: &str,
        custom: &str,
        event_type: &str,
        data: serde_json::Value,
    ) -> Vec<u8> {
        serde_json::json!({
            "callback_id": callback_id,
            "custom": custom,
            "signature": sign_callback(callback_id, custom),
            "event": { "type": event_type, "data": data }
        })
        .to_string()
        .into_bytes()
    }

    async fn setup() -> (HandleCallbackHandler, InMemoryOrderStore) {
        let order = Order::new(order_id(), Cart::default(), None, dec!(100));
        let store = InMemoryOrderStore::with_orders([order]).await;
        (HandleCallbackHandler::new(Arc::new(store.clone())), store)
    }

    async fn handle(
        handler: &HandleCallbackHandler,
        payload: Vec<u8>,
    ) -> Result<HandleCallbackResult, CallbackError> {
        handler.handle(HandleCallbackCommand { payload }).await
    }

    #[tokio::test]
    async fn sent_event_moves_to_processing() {
        let (handler, store) = setup().await;

        let result = handle(&handler, payload("BillogramSent", serde_json::json!({})))
            .await
            .unwrap();

        assert_eq!(
            result,
            HandleCallbackResult::StatusUpdated {
                order_id: order_id(),
                from: OrderStatus::Pending,
                to: OrderStatus::Processing,
                note: "Invoice sent from Billogram.",
            }
        );
        let stored = store.get(&order_id()).await.unwrap();
        assert_eq!(stored.status, OrderStatus::Processing);
        assert_eq!(stored.last_note(), Some("Invoice sent from Billogram."));
    }

    #[tokio::test]
    async fn full_payment_completes_order() {
        let (handler, store) = setup().await;

        handle(
            &handler,
            payload("Payment", serde_json::json!({ "remaining_sum": 0 })),
        )
        .await
        .unwrap();

        let stored = store.get(&order_id()).await.unwrap();
        assert_eq!(stored.status, OrderStatus::Completed);
        assert_eq!(stored.last_note(), Some("Invoice paid."));
    }

    #[tokio::test]
    async fn partial_payment_keeps_processing() {
        let (handler, store) = setup().await;

        handle(
            &handler,
            payload("Payment", serde_json::json!({ "remaining_sum": 5 })),
        )
        .await
        .unwrap();

        let stored = store.get(&order_id()).await.unwrap();
        assert_eq!(stored.status, OrderStatus::Processing);
        assert_eq!(stored.last_note(), Some("Invoice paid but missing."));
    }

    #[tokio::test]
    async fn credit_with_balance_cancels() {
        let (handler, store) = setup().await;

        handle(
            &handler,
            payload("Credit", serde_json::json!({ "remaining_sum": 120 })),
        )
        .await
        .unwrap();

        let stored = store.get(&order_id()).await.unwrap();
        assert_eq!(stored.status, OrderStatus::Cancelled);
        assert_eq!(stored.last_note(), Some("Invoice credited."));
    }

    #[tokio::test]
    async fn completed_order_keeps_status_but_records_note() {
        let (handler, store) = setup().await;
        handle(
            &handler,
            payload("Payment", serde_json::json!({ "remaining_sum": 0 })),
        )
        .await
        .unwrap();

        let result = handle(&handler, payload("Overdue", serde_json::json!({})))
            .await
            .unwrap();

        assert_eq!(
            result,
            HandleCallbackResult::NoteAdded {
                order_id: order_id(),
                status: OrderStatus::Completed,
                note: "Invoice has past its due date.",
            }
        );
        let stored = store.get(&order_id()).await.unwrap();
        assert_eq!(stored.status, OrderStatus::Completed);
        assert_eq!(stored.notes.len(), 2);
    }

    #[tokio::test]
    async fn invalid_signature_has_no_side_effects() {
        let (handler, store) = setup().await;
        let mut body: serde_json::Value =
            serde_json::from_slice(&payload("Payment", serde_json::json!({}))).unwrap();
        body["signature"] = serde_json::Value::from("0".repeat(32));

        let err = handle(&handler, body.to_string().into_bytes())
            .await
            .unwrap_err();

        assert_eq!(err, CallbackError::InvalidSignature);
        let stored = store.get(&order_id()).await.unwrap();
        assert_eq!(stored.status, OrderStatus::Pending);
        assert!(stored.notes.is_empty());
    }

    #[tokio::test]
    async fn unknown_event_is_ignored() {
        let (handler, store) = setup().await;

        let result = handle(&handler, payload("ReminderSent", serde_json::json!({})))
            .await
            .unwrap();

        assert!(matches!(result, HandleCallbackResult::Ignored { .. }));
        assert!(store.get(&order_id()).await.unwrap().notes.is_empty());
    }

    #[tokio::test]
    async fn payment_with_unreadable_balance_is_ignored() {
        let (handler, store) = setup().await;

        let result = handle(
            &handler,
            payload("Payment", serde_json::json!({ "remaining_sum": "abc" })),
        )
        .await
        .unwrap();

        assert_eq!(
            result,
            HandleCallbackResult::Ignored {
                order_id: order_id(),
                event_type: "Payment".to_string(),
            }
        );
        let stored = store.get(&order_id()).await.unwrap();
        assert_eq!(stored.status, OrderStatus::Pending);
        assert!(stored.notes.is_empty());
    }

    #[tokio::test]
    async fn unknown_order_is_reported() {
        let (handler, _) = setup().await;

        let err = handle(
            &handler,
            signed_payload("cb_2", "4242", "BillogramSent", serde_json::json!({})),
        )
        .await
        .unwrap_err();

        assert_eq!(err, CallbackError::OrderNotFound("4242".to_string()));
    }

    #[tokio::test]
    async fn malformed_body_is_parse_error() {
        let (handler, _) = setup().await;
        let err = handle(&handler, b"{".to_vec()).await.unwrap_err();
        assert!(matches!(err, CallbackError::ParseError(_)));
    }
}
