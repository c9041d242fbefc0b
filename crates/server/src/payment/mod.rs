//! Payment gateway integration.
//!
//! Talks to a hosted-checkout gateway: we create a payment, send the shopper
//! to the gateway's confirmation URL, and learn the outcome from a webhook.
//! Card data never touches this server.

pub mod client;
pub mod types;

pub use client::PaymentClient;
pub use types::{Confirmation, Payment, PaymentAmount, WebhookNotification};

use thiserror::Error;

/// Errors from the payment gateway client.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Network or protocol failure talking to the gateway.
    #[error("payment gateway request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The gateway rejected the request.
    #[error("payment gateway error ({status}): {body}")]
    Gateway {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The configured gateway URL is not a valid URL.
    #[error("invalid payment gateway URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },
}
