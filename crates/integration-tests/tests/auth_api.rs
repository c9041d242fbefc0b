//! Integration tests for the auth endpoints.
//!
//! These require a running server and a migrated database; see the crate
//! docs. All network tests are `#[ignore]`-gated.

#![allow(clippy::expect_used)]

use serde_json::{Value, json};

use parfum_integration_tests::{base_url, register, session_client, unique_registration};

#[tokio::test]
#[ignore = "requires running server"]
async fn register_then_me_roundtrip() {
    let client = session_client();
    let body = register(&client).await;

    let me: Value = client
        .get(format!("{}/api/auth/me", base_url()))
        .send()
        .await
        .expect("me request failed")
        .json()
        .await
        .expect("me body not json");

    assert_eq!(me["firstName"], body["firstName"]);
    assert_eq!(me["email"], body["email"]);
}

#[tokio::test]
#[ignore = "requires running server"]
async fn duplicate_email_conflicts() {
    let client = session_client();
    let body = unique_registration();

    let first = client
        .post(format!("{}/api/auth/register", base_url()))
        .json(&body)
        .send()
        .await
        .expect("register request failed");
    assert_eq!(first.status(), 201);

    let second = session_client()
        .post(format!("{}/api/auth/register", base_url()))
        .json(&body)
        .send()
        .await
        .expect("register request failed");
    assert_eq!(second.status(), 409);
}

#[tokio::test]
#[ignore = "requires running server"]
async fn login_with_wrong_password_is_401() {
    let client = session_client();
    let body = register(&client).await;

    let fresh = session_client();
    let resp = fresh
        .post(format!("{}/api/auth/login", base_url()))
        .json(&json!({
            "email": body["email"],
            "password": "definitely-not-the-password",
        }))
        .send()
        .await
        .expect("login request failed");
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
#[ignore = "requires running server"]
async fn login_with_unknown_email_is_401() {
    let resp = session_client()
        .post(format!("{}/api/auth/login", base_url()))
        .json(&json!({
            "email": "nobody@example.com",
            "password": "whatever-password",
        }))
        .send()
        .await
        .expect("login request failed");
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
#[ignore = "requires running server"]
async fn short_password_is_400() {
    let mut body = unique_registration();
    body["password"] = json!("short");

    let resp = session_client()
        .post(format!("{}/api/auth/register", base_url()))
        .json(&body)
        .send()
        .await
        .expect("register request failed");
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
#[ignore = "requires running server"]
async fn logout_drops_the_session() {
    let client = session_client();
    register(&client).await;

    let resp = client
        .post(format!("{}/api/auth/logout", base_url()))
        .send()
        .await
        .expect("logout request failed");
    assert_eq!(resp.status(), 200);

    let me = client
        .get(format!("{}/api/auth/me", base_url()))
        .send()
        .await
        .expect("me request failed");
    assert_eq!(me.status(), 401);
}

#[tokio::test]
#[ignore = "requires running server"]
async fn me_without_session_is_401() {
    let resp = session_client()
        .get(format!("{}/api/auth/me", base_url()))
        .send()
        .await
        .expect("me request failed");
    assert_eq!(resp.status(), 401);
}
