//! Integration tests for cart state and pricing.
//!
//! These tests require a running storefront (see the crate README header);
//! they skip silently when none is reachable.

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{Value, json};

use golazo_integration_tests::{storefront_base_url, storefront_or_skip};

fn add_payload(id: &str, price: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Test Jersey {id}"),
        "price": { "amount": price, "currency_code": "EUR" },
    })
}

/// Parse a serialized `Price` amount; amounts are JSON strings.
fn amount(value: &Value) -> Decimal {
    value["amount"].as_str().unwrap().parse().unwrap()
}

async fn cart_total(client: &reqwest::Client) -> Decimal {
    let cart: Value = client
        .get(format!("{}/cart", storefront_base_url()))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    amount(&cart["total"])
}

#[tokio::test]
async fn cart_total_follows_add_update_remove() {
    let Some(client) = storefront_or_skip("cart_total_follows_add_update_remove").await else {
        return;
    };
    let base = storefront_base_url();

    // Fresh session starts empty
    client
        .post(format!("{base}/cart/clear"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();

    // add A (20) -> total 20
    let resp = client
        .post(format!("{base}/cart/add"))
        .json(&add_payload("it-A", "20"))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());
    assert_eq!(cart_total(&client).await, dec!(20));

    // add A again -> quantity 2, total 40
    client
        .post(format!("{base}/cart/add"))
        .json(&add_payload("it-A", "20"))
        .send()
        .await
        .unwrap();
    assert_eq!(cart_total(&client).await, dec!(40));

    // quantity 4 -> total 80
    client
        .post(format!("{base}/cart/update"))
        .json(&json!({ "id": "it-A", "quantity": 4 }))
        .send()
        .await
        .unwrap();
    assert_eq!(cart_total(&client).await, dec!(80));

    // remove -> total 0
    client
        .post(format!("{base}/cart/remove"))
        .json(&json!({ "id": "it-A" }))
        .send()
        .await
        .unwrap();
    assert_eq!(cart_total(&client).await, dec!(0));
}

#[tokio::test]
async fn duplicate_add_with_different_price_keeps_existing() {
    let Some(client) = storefront_or_skip("duplicate_add_with_different_price_keeps_existing").await
    else {
        return;
    };
    let base = storefront_base_url();

    client
        .post(format!("{base}/cart/clear"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();

    client
        .post(format!("{base}/cart/add"))
        .json(&add_payload("it-B", "20"))
        .send()
        .await
        .unwrap();
    // Same id, different incoming price: stored price must win
    client
        .post(format!("{base}/cart/add"))
        .json(&add_payload("it-B", "35"))
        .send()
        .await
        .unwrap();

    let cart: Value = client
        .get(format!("{base}/cart"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(cart["items"].as_array().unwrap().len(), 1);
    assert_eq!(cart["items"][0]["quantity"], 2);
    assert_eq!(amount(&cart["items"][0]["price"]), dec!(20));
    assert_eq!(amount(&cart["total"]), dec!(40));
}

#[tokio::test]
async fn zero_quantity_update_is_rejected() {
    let Some(client) = storefront_or_skip("zero_quantity_update_is_rejected").await else {
        return;
    };
    let base = storefront_base_url();

    client
        .post(format!("{base}/cart/clear"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    client
        .post(format!("{base}/cart/add"))
        .json(&add_payload("it-C", "10"))
        .send()
        .await
        .unwrap();

    let resp = client
        .post(format!("{base}/cart/update"))
        .json(&json!({ "id": "it-C", "quantity": 0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn count_reports_units_across_lines() {
    let Some(client) = storefront_or_skip("count_reports_units_across_lines").await else {
        return;
    };
    let base = storefront_base_url();

    client
        .post(format!("{base}/cart/clear"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    client
        .post(format!("{base}/cart/add"))
        .json(&add_payload("it-D", "10"))
        .send()
        .await
        .unwrap();
    client
        .post(format!("{base}/cart/add"))
        .json(&add_payload("it-E", "15"))
        .send()
        .await
        .unwrap();
    client
        .post(format!("{base}/cart/update"))
        .json(&json!({ "id": "it-D", "quantity": 3 }))
        .send()
        .await
        .unwrap();

    let count: Value = client
        .get(format!("{base}/cart/count"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(count["count"], 4);
}
