//! Integration tests for catalog, cart, checkout, and review endpoints.
//!
//! These require a running server and a migrated database; see the crate
//! docs. All network tests are `#[ignore]`-gated.

#![allow(clippy::expect_used)]

use serde_json::{Value, json};

use parfum_integration_tests::{base_url, register, session_client};

#[tokio::test]
#[ignore = "requires running server"]
async fn health_endpoints_respond() {
    let client = session_client();

    let health = client
        .get(format!("{}/health", base_url()))
        .send()
        .await
        .expect("health request failed");
    assert_eq!(health.status(), 200);

    let ready = client
        .get(format!("{}/health/ready", base_url()))
        .send()
        .await
        .expect("ready request failed");
    assert_eq!(ready.status(), 200);
}

#[tokio::test]
#[ignore = "requires running server"]
async fn product_listing_is_a_json_array() {
    let body: Value = session_client()
        .get(format!("{}/api/products", base_url()))
        .send()
        .await
        .expect("products request failed")
        .json()
        .await
        .expect("products body not json");

    assert!(body.is_array());
}

#[tokio::test]
#[ignore = "requires running server"]
async fn product_listing_with_impossible_filter_is_empty_200() {
    let resp = session_client()
        .get(format!(
            "{}/api/products?brand=NoSuchBrandEver",
            base_url()
        ))
        .send()
        .await
        .expect("products request failed");

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.expect("body not json");
    assert_eq!(body, json!([]));
}

#[tokio::test]
#[ignore = "requires running server"]
async fn product_listing_rejects_unknown_sort() {
    let resp = session_client()
        .get(format!("{}/api/products?sortBy=price", base_url()))
        .send()
        .await
        .expect("products request failed");
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
#[ignore = "requires running server"]
async fn unknown_product_is_404() {
    let resp = session_client()
        .get(format!("{}/api/products/999999999", base_url()))
        .send()
        .await
        .expect("product request failed");
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
#[ignore = "requires running server"]
async fn fresh_session_cart_is_empty() {
    let body: Value = session_client()
        .get(format!("{}/api/cart", base_url()))
        .send()
        .await
        .expect("cart request failed")
        .json()
        .await
        .expect("cart body not json");

    assert_eq!(body["items"], json!([]));
    assert_eq!(body["total"], json!("0"));
}

#[tokio::test]
#[ignore = "requires running server"]
async fn cart_rejects_nonpositive_quantity() {
    let resp = session_client()
        .post(format!("{}/api/cart", base_url()))
        .json(&json!({ "variantId": 1, "quantity": 0 }))
        .send()
        .await
        .expect("cart request failed");
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
#[ignore = "requires running server"]
async fn cart_rejects_unknown_variant() {
    let resp = session_client()
        .post(format!("{}/api/cart", base_url()))
        .json(&json!({ "variantId": 999999999, "quantity": 1 }))
        .send()
        .await
        .expect("cart request failed");
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
#[ignore = "requires running server"]
async fn checkout_with_empty_cart_is_400() {
    let client = session_client();
    register(&client).await;

    let resp = client
        .post(format!("{}/api/checkout/create-payment", base_url()))
        .send()
        .await
        .expect("checkout request failed");
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
#[ignore = "requires running server"]
async fn checkout_without_login_is_401() {
    let resp = session_client()
        .post(format!("{}/api/checkout/create-payment", base_url()))
        .send()
        .await
        .expect("checkout request failed");
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
#[ignore = "requires running server"]
async fn orders_require_login() {
    let resp = session_client()
        .get(format!("{}/api/orders", base_url()))
        .send()
        .await
        .expect("orders request failed");
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
#[ignore = "requires running server"]
async fn order_history_starts_empty() {
    let client = session_client();
    register(&client).await;

    let body: Value = client
        .get(format!("{}/api/orders", base_url()))
        .send()
        .await
        .expect("orders request failed")
        .json()
        .await
        .expect("orders body not json");

    assert_eq!(body, json!([]));
}

#[tokio::test]
#[ignore = "requires running server"]
async fn review_rating_bounds_are_enforced() {
    let client = session_client();
    register(&client).await;

    for bad in [0, 6, -1] {
        let resp = client
            .post(format!("{}/api/products/1/reviews", base_url()))
            .json(&json!({ "rating": bad, "comment": "out of range" }))
            .send()
            .await
            .expect("review request failed");
        assert_eq!(resp.status(), 400, "rating {bad} should be rejected");
    }
}

#[tokio::test]
#[ignore = "requires running server"]
async fn review_requires_login() {
    let resp = session_client()
        .post(format!("{}/api/products/1/reviews", base_url()))
        .json(&json!({ "rating": 5 }))
        .send()
        .await
        .expect("review request failed");
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
#[ignore = "requires running server"]
async fn webhook_acknowledges_unrelated_events() {
    let resp = session_client()
        .post(format!("{}/api/payments/webhook", base_url()))
        .json(&json!({
            "event": "payment.waiting_for_capture",
            "object": { "id": "p-x", "status": "waiting_for_capture" }
        }))
        .send()
        .await
        .expect("webhook request failed");
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
#[ignore = "requires running server"]
async fn webhook_acknowledges_unknown_orders() {
    // A succeeded payment for an order that does not exist must still be
    // acknowledged, otherwise the gateway retries it forever.
    let resp = session_client()
        .post(format!("{}/api/payments/webhook", base_url()))
        .json(&json!({
            "event": "payment.succeeded",
            "object": {
                "id": "p-unknown",
                "status": "succeeded",
                "metadata": { "orderId": "999999999" }
            }
        }))
        .send()
        .await
        .expect("webhook request failed");
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
#[ignore = "requires running server"]
async fn admin_upload_requires_login() {
    let form = reqwest::multipart::Form::new().text(
        "pricelist",
        "\"HFC: Dazzling Girls 75ml\",,1200,,300,500,700\n",
    );

    let resp = session_client()
        .post(format!("{}/api/admin/upload-pricelist", base_url()))
        .multipart(form)
        .send()
        .await
        .expect("upload request failed");
    assert_eq!(resp.status(), 401);
}
