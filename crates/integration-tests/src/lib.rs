//! Integration test helpers for the Parfum shop.
//!
//! # Running Tests
//!
//! The API tests run against a live server and are `#[ignore]`-gated:
//!
//! ```bash
//! # Start the database and run migrations
//! cargo run -p parfum-cli -- migrate
//!
//! # Start the server
//! cargo run -p parfum-server
//!
//! # Run the ignored tests
//! cargo test -p parfum-integration-tests -- --ignored
//! ```
//!
//! Configure the target with `PARFUM_TEST_BASE_URL` (defaults to
//! `http://localhost:3000`).

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::expect_used)]

use reqwest::Client;
use serde_json::{Value, json};
use uuid::Uuid;

/// Base URL for the API under test.
#[must_use]
pub fn base_url() -> String {
    std::env::var("PARFUM_TEST_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// A client with its own cookie jar, i.e. its own session.
#[must_use]
pub fn session_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// A unique registration body; every call gets a fresh email.
#[must_use]
pub fn unique_registration() -> Value {
    let token = Uuid::new_v4().simple().to_string();
    json!({
        "firstName": "Test",
        "lastName": "Shopper",
        "email": format!("shopper-{token}@example.com"),
        "password": "a-long-enough-password",
    })
}

/// Register a fresh account on the given client and return the body used.
///
/// # Panics
///
/// Panics if the server does not answer 201.
pub async fn register(client: &Client) -> Value {
    let body = unique_registration();
    let resp = client
        .post(format!("{}/api/auth/register", base_url()))
        .json(&body)
        .send()
        .await
        .expect("register request failed");
    assert_eq!(resp.status(), 201, "registration should return 201");
    body
}
