//! Integration tests for the checkout flow.
//!
//! The test server runs with shortened delays (100 ms processing, 200 ms
//! confirmation); sleeps here leave a comfortable margin on either side of
//! each transition.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use reqwest::StatusCode;
use serde_json::{Value, json};
use venture_couture_integration_tests::{CONFIRMATION_MS, PROCESSING_MS, TestApp, spawn_app};

async fn add_tee(app: &TestApp) {
    let response = app
        .client
        .post(app.url("/cart/add"))
        .json(&json!({
            "id": "tee-black",
            "name": "Black Tee",
            "price": "100",
            "size": "M",
            "quantity": 2,
        }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
}

async fn checkout_view(app: &TestApp) -> Value {
    app.client
        .get(app.url("/checkout"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn cart_snapshot(app: &TestApp) -> Value {
    app.client
        .get(app.url("/cart"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn submit_processes_completes_and_resets() {
    let app = spawn_app().await;
    add_tee(&app).await;

    app.client
        .post(app.url("/checkout/open"))
        .send()
        .await
        .unwrap();

    let response = app
        .client
        .post(app.url("/checkout/submit"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let view: Value = response.json().await.unwrap();
    assert_eq!(view["phase"], "processing");

    // Past the simulated gateway latency: complete, with an order reference
    // and the total captured at completion.
    tokio::time::sleep(Duration::from_millis(PROCESSING_MS + 50)).await;
    let view = checkout_view(&app).await;
    assert_eq!(view["phase"], "complete");
    assert_eq!(view["order"]["total"], "200");
    let reference = view["order"]["reference"].as_str().unwrap();
    assert!(reference.starts_with("VC"));
    assert_eq!(reference.len(), 8);

    // Past the confirmation delay: cart cleared, checkout closed, idle again.
    tokio::time::sleep(Duration::from_millis(CONFIRMATION_MS + 100)).await;
    let snapshot = cart_snapshot(&app).await;
    assert_eq!(snapshot["items"], json!([]));
    assert_eq!(snapshot["item_count"], 0);
    assert_eq!(snapshot["show_checkout"], false);

    let view = checkout_view(&app).await;
    assert_eq!(view["phase"], "idle");
    assert!(view.get("order").is_none());
}

#[tokio::test]
async fn double_submit_is_rejected() {
    let app = spawn_app().await;
    add_tee(&app).await;

    let first = app
        .client
        .post(app.url("/checkout/submit"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::ACCEPTED);

    let second = app
        .client
        .post(app.url("/checkout/submit"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn close_cancels_pending_payment() {
    let app = spawn_app().await;
    add_tee(&app).await;

    app.client
        .post(app.url("/checkout/open"))
        .send()
        .await
        .unwrap();
    app.client
        .post(app.url("/checkout/submit"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();

    let snapshot: Value = app
        .client
        .post(app.url("/checkout/close"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(snapshot["show_checkout"], false);

    // Well past both delays: the cancelled payment must not clear the cart.
    tokio::time::sleep(Duration::from_millis(PROCESSING_MS + CONFIRMATION_MS + 200)).await;
    let snapshot = cart_snapshot(&app).await;
    assert_eq!(snapshot["item_count"], 2);

    let view = checkout_view(&app).await;
    assert_eq!(view["phase"], "idle");
}

#[tokio::test]
async fn method_selection_is_free_while_idle_and_locked_in_flight() {
    let app = spawn_app().await;
    add_tee(&app).await;

    let view: Value = app
        .client
        .post(app.url("/checkout/method"))
        .json(&json!({"method": "ozow"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(view["method"], "ozow");

    app.client
        .post(app.url("/checkout/submit"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();

    // Ignored while the submission is in flight.
    let view: Value = app
        .client
        .post(app.url("/checkout/method"))
        .json(&json!({"method": "paypal"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(view["method"], "ozow");
}

#[tokio::test]
async fn submit_can_carry_the_method() {
    let app = spawn_app().await;
    add_tee(&app).await;

    let view: Value = app
        .client
        .post(app.url("/checkout/submit"))
        .json(&json!({"method": "paypal"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(view["method"], "paypal");
    assert_eq!(view["phase"], "processing");
}

#[tokio::test]
async fn open_and_close_toggle_the_view() {
    let app = spawn_app().await;

    let snapshot: Value = app
        .client
        .post(app.url("/checkout/open"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(snapshot["show_checkout"], true);

    let snapshot: Value = app
        .client
        .post(app.url("/checkout/close"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(snapshot["show_checkout"], false);
}
