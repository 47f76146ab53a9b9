//! End-to-end tests for the invoice lifecycle.
//!
//! A buyer checks out through the HTTP router, then Billogram reports back
//! through the callback endpoint. The first group runs against the in-crate
//! billing mock; the last test drives the real Billogram adapter against a
//! wiremock server.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use rust_decimal_macros::dec;
use secrecy::SecretString;
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use billogram_gateway::adapters::billogram::{
    BillogramAdapter, BillogramApiConfig, MockBillingService,
};
use billogram_gateway::adapters::http::{gateway_router, GatewayAppState};
use billogram_gateway::adapters::memory::InMemoryOrderStore;
use billogram_gateway::config::GatewayConfig;
use billogram_gateway::domain::callback::sign_callback;
use billogram_gateway::domain::foundation::OrderId;
use billogram_gateway::domain::invoice::DeliveryMethod;
use billogram_gateway::domain::order::{
    AppliedCoupon, Cart, CartFee, CartItem, Order, OrderStatus, ShippingCharge,
};
use billogram_gateway::ports::BillingService;

// ════════════════════════════════════════════════════════════════════════════════
// Fixtures
// ════════════════════════════════════════════════════════════════════════════════

const ORDER: &str = "1001";

fn order_id() -> OrderId {
    OrderId::new(ORDER).unwrap()
}

fn order() -> Order {
    let cart = Cart {
        items: vec![CartItem {
            title: "Widget".to_string(),
            unit_price_excl_tax: dec!(80),
            tax_rate: dec!(25),
            quantity: 2,
        }],
        coupons: vec![AppliedCoupon {
            code: "SAVE10".to_string(),
            discount_amount: dec!(10),
        }],
        fees: vec![CartFee {
            name: "Invoice fee".to_string(),
            amount: dec!(29),
        }],
    };
    let shipping = ShippingCharge {
        method: "Flat rate".to_string(),
        cost: dec!(40),
        tax: dec!(10),
    };
    Order::new(order_id(), cart, Some(shipping), dec!(269))
}

fn gateway_config() -> GatewayConfig {
    GatewayConfig {
        enabled: true,
        invoice_fee: dec!(29),
        delivery_method: 2,
        callback_url: "https://shop.example/api/callbacks/billogram".to_string(),
        ..Default::default()
    }
}

fn router(billing: Arc<dyn BillingService>, store: &InMemoryOrderStore) -> Router {
    let state = GatewayAppState::new(billing, Arc::new(store.clone()), &gateway_config());
    gateway_router().with_state(state)
}

fn checkout_request() -> Request<Body> {
    let body = serde_json::json!({
        "order_id": ORDER,
        "fields": {
            "org_no": "19800101-1234",
            "billing_first_name": "Anna",
            "billing_last_name": "Svensson",
            "billing_address_1": "Storgatan 1",
            "billing_postcode": "111 22",
            "billing_city": "Stockholm",
            "billing_country": "SE",
            "billing_email": "anna@example.com"
        }
    });
    Request::builder()
        .method("POST")
        .uri("/api/checkout")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn callback_request(callback_id: &str, event_type: &str, data: serde_json::Value) -> Request<Body> {
    let body = serde_json::json!({
        "callback_id": callback_id,
        "custom": ORDER,
        "signature": sign_callback(callback_id, ORDER),
        "event": { "type": event_type, "data": data, "created_at": "2026-10-01 12:00:00" },
        "billogram": { "id": "inv_1" }
    });
    Request::builder()
        .method("POST")
        .uri("/api/callbacks/billogram")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> axum::response::Response {
    app.clone().oneshot(request).await.unwrap()
}

// ════════════════════════════════════════════════════════════════════════════════
// Lifecycle against the billing mock
// ════════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn checkout_then_callbacks_drive_order_to_completed() {
    let billing = MockBillingService::new();
    let store = InMemoryOrderStore::with_orders([order()]).await;
    let app = router(Arc::new(billing.clone()), &store);

    // Checkout
    let response = send(&app, checkout_request()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["result"], "success");
    assert_eq!(body["redirect"], format!("/checkout/order-received/{}", ORDER));
    assert_eq!(body["invoice_sent"], true);

    let drafts = billing.drafts();
    assert_eq!(drafts.len(), 1);
    let titles: Vec<&str> = drafts[0].items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Widget",
            "Shipping and Handling - Flat rate",
            "Coupon: SAVE10",
            "Invoice fee"
        ]
    );
    assert_eq!(drafts[0].callbacks.custom, ORDER);
    assert_eq!(drafts[0].callbacks.sign_key, ORDER);

    let sent = billing.sent_invoices();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].1, DeliveryMethod::EmailAndLetter);

    let placed = store.get(&order_id()).await.unwrap();
    assert_eq!(placed.status, OrderStatus::Pending);
    assert!(placed.invoice_no.is_some());
    assert!(store.stock_reduced(&order_id()).await);
    assert!(store.cart_emptied(&order_id()).await);

    // Billogram reports creation and delivery
    let response = send(&app, callback_request("cb_1", "BillogramCreated", serde_json::json!({}))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = send(&app, callback_request("cb_2", "DeliveryAccepted", serde_json::json!({}))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let processing = store.get(&order_id()).await.unwrap();
    assert_eq!(processing.status, OrderStatus::Processing);
    assert_eq!(processing.last_note(), Some("Invoice received and opened in email."));

    // Partial payment keeps it processing
    let response = send(
        &app,
        callback_request("cb_3", "Payment", serde_json::json!({ "amount": 200, "remaining_sum": 69 })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let partial = store.get(&order_id()).await.unwrap();
    assert_eq!(partial.status, OrderStatus::Processing);
    assert_eq!(partial.last_note(), Some("Invoice paid but missing."));

    // Final payment completes it
    let response = send(
        &app,
        callback_request("cb_4", "Payment", serde_json::json!({ "amount": 69, "remaining_sum": 0 })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let paid = store.get(&order_id()).await.unwrap();
    assert_eq!(paid.status, OrderStatus::Completed);
    assert_eq!(paid.last_note(), Some("Invoice paid."));

    // A late reminder is noted but does not reopen the order
    let response = send(&app, callback_request("cb_5", "Resent", serde_json::json!({}))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let finished = store.get(&order_id()).await.unwrap();
    assert_eq!(finished.status, OrderStatus::Completed);
    assert_eq!(finished.last_note(), Some("A reminder has been sent."));
}

#[tokio::test]
async fn credit_with_balance_cancels_order() {
    let billing = MockBillingService::new();
    let store = InMemoryOrderStore::with_orders([order()]).await;
    let app = router(Arc::new(billing), &store);

    let response = send(&app, checkout_request()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(
        &app,
        callback_request("cb_1", "Credit", serde_json::json!({ "remaining_sum": 269 })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let credited = store.get(&order_id()).await.unwrap();
    assert_eq!(credited.status, OrderStatus::Cancelled);
    assert_eq!(credited.last_note(), Some("Invoice credited."));
}

#[tokio::test]
async fn forged_callback_changes_nothing() {
    let store = InMemoryOrderStore::with_orders([order()]).await;
    let app = router(Arc::new(MockBillingService::new()), &store);

    let body = serde_json::json!({
        "callback_id": "cb_1",
        "custom": ORDER,
        "signature": sign_callback("cb_1", "some-other-order"),
        "event": { "type": "Payment", "data": { "remaining_sum": 0 } }
    });
    let request = Request::builder()
        .method("POST")
        .uri("/api/callbacks/billogram")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let untouched = store.get(&order_id()).await.unwrap();
    assert_eq!(untouched.status, OrderStatus::Pending);
    assert!(untouched.notes.is_empty());
}

// ════════════════════════════════════════════════════════════════════════════════
// Checkout against the Billogram REST API
// ════════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn checkout_against_billogram_api_creates_customer_and_invoice() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/customer"))
        .and(query_param("filter_value", "800101-1234"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "OK",
            "data": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/customer"))
        .and(body_partial_json(serde_json::json!({
            "org_no": "800101-1234",
            "company_type": "individual"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "OK",
            "data": { "customer_no": 42, "name": "Anna Svensson", "org_no": "800101-1234" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/billogram"))
        .and(body_partial_json(serde_json::json!({
            "currency": "SEK",
            "customer": { "customer_no": 42 },
            "callbacks": { "custom": ORDER, "sign_key": ORDER }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "OK",
            "data": { "id": "inv_77", "state": "Unattested" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/billogram/inv_77/command/send"))
        .and(body_partial_json(serde_json::json!({ "method": "Email+Letter" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "OK",
            "data": { "id": "inv_77", "state": "Sending" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api_config = BillogramApiConfig::new("api-user", SecretString::new("api-pass".to_string()))
        .with_base_url(server.uri());
    let billing = BillogramAdapter::new(api_config).unwrap();
    let store = InMemoryOrderStore::with_orders([order()]).await;
    let app = router(Arc::new(billing), &store);

    let response = send(&app, checkout_request()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["customer_no"], "42");
    assert_eq!(body["invoice_id"], "inv_77");
    assert_eq!(body["invoice_sent"], true);

    let placed = store.get(&order_id()).await.unwrap();
    assert_eq!(placed.invoice_no.map(|id| id.to_string()), Some("inv_77".to_string()));
}
