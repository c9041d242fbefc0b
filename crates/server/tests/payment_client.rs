//! Payment gateway client tests against a wiremock server.

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use secrecy::SecretString;
use uuid::Uuid;
use wiremock::matchers::{basic_auth, body_partial_json, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use parfum_core::OrderId;
use parfum_server::config::PaymentConfig;
use parfum_server::payment::{PaymentClient, PaymentError};

fn test_config() -> PaymentConfig {
    PaymentConfig {
        shop_id: "123456".to_owned(),
        secret_key: SecretString::from("live_aB3xY9mK2nL5pQ7rT0uW4zC6"),
        api_url: None,
    }
}

fn client_for(server: &MockServer) -> PaymentClient {
    PaymentClient::with_base_url(&test_config(), &server.uri()).unwrap()
}

#[tokio::test]
async fn create_payment_returns_confirmation_url() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/payments"))
        .and(basic_auth("123456", "live_aB3xY9mK2nL5pQ7rT0uW4zC6"))
        .and(header_exists("Idempotence-Key"))
        .and(body_partial_json(serde_json::json!({
            "amount": { "value": "3000.00", "currency": "RUB" },
            "capture": true,
            "confirmation": { "type": "redirect" },
            "metadata": { "orderId": "42" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "2d1f8c7a-0001-5000-8000-1b6a7c2e9d44",
            "status": "pending",
            "confirmation": {
                "type": "redirect",
                "confirmation_url": "https://gateway.test/confirm/2d1f8c7a"
            },
            "metadata": { "orderId": "42" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let payment = client_for(&server)
        .create_payment(
            OrderId::new(42),
            Decimal::from(3000),
            "Order #42",
            "https://shop.test/order-confirmation?orderId=42",
            Uuid::new_v4(),
        )
        .await
        .unwrap();

    assert_eq!(payment.id, "2d1f8c7a-0001-5000-8000-1b6a7c2e9d44");
    assert_eq!(payment.status, "pending");
    assert_eq!(
        payment.confirmation.unwrap().confirmation_url,
        "https://gateway.test/confirm/2d1f8c7a"
    );
}

#[tokio::test]
async fn create_payment_formats_amount_with_two_decimals() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/payments"))
        .and(body_partial_json(serde_json::json!({
            "amount": { "value": "1234.50" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "p-1",
            "status": "pending",
            "confirmation": { "confirmation_url": "https://gateway.test/c/p-1" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let total: Decimal = "1234.5".parse().unwrap();
    client_for(&server)
        .create_payment(OrderId::new(7), total, "Order #7", "https://shop.test/", Uuid::new_v4())
        .await
        .unwrap();
}

#[tokio::test]
async fn create_payment_surfaces_gateway_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/payments"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "type": "error",
            "code": "invalid_credentials"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .create_payment(
            OrderId::new(1),
            Decimal::from(100),
            "Order #1",
            "https://shop.test/",
            Uuid::new_v4(),
        )
        .await
        .unwrap_err();

    match err {
        PaymentError::Gateway { status, body } => {
            assert_eq!(status.as_u16(), 401);
            assert!(body.contains("invalid_credentials"));
        }
        other => panic!("expected gateway error, got {other:?}"),
    }
}

#[test]
fn with_base_url_rejects_garbage() {
    let err = PaymentClient::with_base_url(&test_config(), "not a url").unwrap_err();
    assert!(matches!(err, PaymentError::InvalidUrl { .. }));
}
