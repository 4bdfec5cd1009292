//! Integration tests for the session-scoped cart API.
//!
//! Every mutating route answers with the fresh snapshot, so assertions read
//! the response body directly; `GET /cart` is used to confirm the state
//! survives across requests within one session.

#![allow(clippy::unwrap_used)]

use serde_json::{Value, json};
use venture_couture_integration_tests::spawn_app;

async fn add_item(app: &venture_couture_integration_tests::TestApp, body: Value) -> Value {
    app.client
        .post(app.url("/cart/add"))
        .json(&body)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

fn tee(quantity: u32) -> Value {
    json!({
        "id": "tee-black",
        "name": "Black Tee",
        "price": "100",
        "size": "M",
        "quantity": quantity,
    })
}

#[tokio::test]
async fn empty_cart_snapshot() {
    let app = spawn_app().await;

    let snapshot: Value = app
        .client
        .get(app.url("/cart"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(snapshot["items"], json!([]));
    assert_eq!(snapshot["item_count"], 0);
    assert_eq!(snapshot["total"], "0");
    assert_eq!(snapshot["cart_open"], false);
    assert_eq!(snapshot["show_checkout"], false);
}

#[tokio::test]
async fn add_item_updates_derived_fields() {
    let app = spawn_app().await;

    let snapshot = add_item(&app, tee(2)).await;
    assert_eq!(snapshot["item_count"], 2);
    assert_eq!(snapshot["total"], "200");

    // Same (id, size) merges instead of duplicating the line.
    let snapshot = add_item(&app, tee(1)).await;
    assert_eq!(snapshot["items"].as_array().unwrap().len(), 1);
    assert_eq!(snapshot["item_count"], 3);
    assert_eq!(snapshot["total"], "300");
}

#[tokio::test]
async fn sale_price_takes_precedence() {
    let app = spawn_app().await;

    let snapshot = add_item(
        &app,
        json!({
            "id": "hoodie-red",
            "name": "Red Hoodie",
            "price": "100",
            "sale_price": "80",
            "size": "L",
            "quantity": 3,
        }),
    )
    .await;

    assert_eq!(snapshot["total"], "240");
}

#[tokio::test]
async fn update_quantity_zero_removes_item() {
    let app = spawn_app().await;
    add_item(&app, tee(3)).await;

    let snapshot: Value = app
        .client
        .post(app.url("/cart/update"))
        .json(&json!({"id": "tee-black", "quantity": 0}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(snapshot["items"], json!([]));
    assert_eq!(snapshot["item_count"], 0);
    assert_eq!(snapshot["total"], "0");
}

#[tokio::test]
async fn remove_item() {
    let app = spawn_app().await;
    add_item(&app, tee(1)).await;
    add_item(
        &app,
        json!({
            "id": "cap-one",
            "name": "Cap",
            "price": "50",
            "size": "One Size",
        }),
    )
    .await;

    let snapshot: Value = app
        .client
        .post(app.url("/cart/remove"))
        .json(&json!({"id": "tee-black"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(snapshot["items"].as_array().unwrap().len(), 1);
    assert_eq!(snapshot["items"][0]["id"], "cap-one");
    assert_eq!(snapshot["total"], "50");
}

#[tokio::test]
async fn clear_cart_keeps_visibility_flags() {
    let app = spawn_app().await;
    add_item(&app, tee(2)).await;

    app.client
        .post(app.url("/cart/toggle"))
        .send()
        .await
        .unwrap();
    app.client
        .post(app.url("/checkout/open"))
        .send()
        .await
        .unwrap();

    let snapshot: Value = app
        .client
        .post(app.url("/cart/clear"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(snapshot["item_count"], 0);
    assert_eq!(snapshot["total"], "0");
    assert_eq!(snapshot["cart_open"], true);
    assert_eq!(snapshot["show_checkout"], true);
}

#[tokio::test]
async fn toggle_cart_flips_flag() {
    let app = spawn_app().await;

    let snapshot: Value = app
        .client
        .post(app.url("/cart/toggle"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(snapshot["cart_open"], true);

    let snapshot: Value = app
        .client
        .post(app.url("/cart/toggle"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(snapshot["cart_open"], false);
}

#[tokio::test]
async fn sessions_have_isolated_carts() {
    let app = spawn_app().await;
    add_item(&app, tee(2)).await;

    // A client with a fresh cookie jar gets its own empty cart.
    let other = app.new_session();
    let snapshot: Value = other
        .get(app.url("/cart"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(snapshot["item_count"], 0);

    // And the first session's cart is untouched.
    let snapshot: Value = app
        .client
        .get(app.url("/cart"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(snapshot["item_count"], 2);
}
