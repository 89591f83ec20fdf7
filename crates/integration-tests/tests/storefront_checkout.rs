//! Integration tests for order submission and payment channels.
//!
//! Requires a running storefront with migrated database; skips otherwise.

#![allow(clippy::unwrap_used)]

use serde_json::{Value, json};
use uuid::Uuid;

use golazo_integration_tests::{storefront_base_url, storefront_or_skip};

fn customer() -> Value {
    json!({
        "name": "Ana García",
        "email": "ana@example.com",
        "phone": "600111222",
        "address": "Calle Mayor 1",
        "city": "Madrid",
        "postal_code": "28001",
        "favorite_league": "La Liga",
    })
}

async fn fill_cart(client: &reqwest::Client) {
    let base = storefront_base_url();
    client
        .post(format!("{base}/cart/clear"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    client
        .post(format!("{base}/cart/add"))
        .json(&json!({
            "id": "it-checkout",
            "name": "Checkout Jersey",
            "price": { "amount": "50", "currency_code": "EUR" },
        }))
        .send()
        .await
        .unwrap();
}

#[tokio::test]
async fn whatsapp_checkout_creates_pending_order_and_link() {
    let Some(client) = storefront_or_skip("whatsapp_checkout_creates_pending_order_and_link").await
    else {
        return;
    };
    let base = storefront_base_url();
    fill_cart(&client).await;

    let resp = client
        .post(format!("{base}/checkout/submit"))
        .json(&json!({
            "customer": customer(),
            "payment_method": "whatsapp",
            "idempotency_key": Uuid::new_v4(),
        }))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "pending");
    assert_eq!(body["payment"]["channel"], "whatsapp");
    let link = body["payment"]["link"].as_str().unwrap();
    assert!(link.starts_with("https://wa.me/"));
    assert!(!link.contains(' '));

    // The cart is cleared after a successful submission
    let cart: Value = client
        .get(format!("{base}/cart"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(cart["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn double_submit_returns_the_same_order() {
    let Some(client) = storefront_or_skip("double_submit_returns_the_same_order").await else {
        return;
    };
    let base = storefront_base_url();
    let key = Uuid::new_v4();

    fill_cart(&client).await;
    let first: Value = client
        .post(format!("{base}/checkout/submit"))
        .json(&json!({
            "customer": customer(),
            "payment_method": "whatsapp",
            "idempotency_key": key,
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // A double click re-sends the same idempotency key
    fill_cart(&client).await;
    let second: Value = client
        .post(format!("{base}/checkout/submit"))
        .json(&json!({
            "customer": customer(),
            "payment_method": "whatsapp",
            "idempotency_key": key,
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(first["order_id"], second["order_id"]);
}

#[tokio::test]
async fn bizum_checkout_moves_to_processing_on_confirmation() {
    let Some(client) = storefront_or_skip("bizum_checkout_moves_to_processing_on_confirmation")
        .await
    else {
        return;
    };
    let base = storefront_base_url();
    fill_cart(&client).await;

    let submit: Value = client
        .post(format!("{base}/checkout/submit"))
        .json(&json!({
            "customer": customer(),
            "payment_method": "bizum",
            "idempotency_key": Uuid::new_v4(),
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // Bizum orders stay pending until the customer confirms the transfer
    assert_eq!(submit["status"], "pending");
    assert_eq!(submit["payment"]["channel"], "bizum");
    assert!(submit["payment"]["phone"].as_str().is_some());

    let confirm: Value = client
        .post(format!("{base}/checkout/bizum/confirm"))
        .json(&json!({
            "order_id": submit["order_id"],
            "sender_phone": "600999888",
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(confirm["status"], "processing");
}

#[tokio::test]
async fn stripe_stub_records_reference_and_processing() {
    let Some(client) = storefront_or_skip("stripe_stub_records_reference_and_processing").await
    else {
        return;
    };
    let base = storefront_base_url();
    fill_cart(&client).await;

    let body: Value = client
        .post(format!("{base}/checkout/submit"))
        .json(&json!({
            "customer": customer(),
            "payment_method": "stripe",
            "idempotency_key": Uuid::new_v4(),
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["status"], "processing");
    assert_eq!(body["payment"]["channel"], "stripe");
    assert!(
        body["payment"]["intent_reference"]
            .as_str()
            .unwrap()
            .starts_with("pi_stub_")
    );
}

#[tokio::test]
async fn empty_cart_submission_is_rejected() {
    let Some(client) = storefront_or_skip("empty_cart_submission_is_rejected").await else {
        return;
    };
    let base = storefront_base_url();

    client
        .post(format!("{base}/cart/clear"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();

    let resp = client
        .post(format!("{base}/checkout/submit"))
        .json(&json!({
            "customer": customer(),
            "payment_method": "whatsapp",
            "idempotency_key": Uuid::new_v4(),
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn invalid_email_is_rejected_before_any_write() {
    let Some(client) = storefront_or_skip("invalid_email_is_rejected_before_any_write").await
    else {
        return;
    };
    let base = storefront_base_url();
    fill_cart(&client).await;

    let mut bad_customer = customer();
    bad_customer["email"] = json!("not-an-email");

    let resp = client
        .post(format!("{base}/checkout/submit"))
        .json(&json!({
            "customer": bad_customer,
            "payment_method": "whatsapp",
            "idempotency_key": Uuid::new_v4(),
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
}
