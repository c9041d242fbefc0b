//! Wire types for the payment gateway's REST API.
//!
//! Amounts cross the wire as decimal strings with two fraction digits, per
//! the gateway's API contract.

use serde::{Deserialize, Serialize};

/// A monetary amount as the gateway represents it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentAmount {
    /// Decimal string, e.g. `"3000.00"`.
    pub value: String,
    /// ISO 4217 code, e.g. `"RUB"`.
    pub currency: String,
}

/// Hosted-checkout confirmation settings sent when creating a payment.
#[derive(Debug, Clone, Serialize)]
pub struct ConfirmationRequest {
    #[serde(rename = "type")]
    pub kind: String,
    pub return_url: String,
}

/// Metadata we attach to a payment so the webhook can find the order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentMetadata {
    /// Order ID as a string; the gateway only stores string metadata.
    #[serde(rename = "orderId")]
    pub order_id: String,
}

/// Request body for creating a payment.
#[derive(Debug, Clone, Serialize)]
pub struct CreatePaymentRequest {
    pub amount: PaymentAmount,
    pub confirmation: ConfirmationRequest,
    pub capture: bool,
    pub description: String,
    pub metadata: PaymentMetadata,
}

/// Confirmation details in the gateway's response.
#[derive(Debug, Clone, Deserialize)]
pub struct Confirmation {
    pub confirmation_url: String,
}

/// A payment object as returned by the gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct Payment {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub confirmation: Option<Confirmation>,
    #[serde(default)]
    pub metadata: Option<PaymentMetadata>,
}

/// A webhook notification body.
///
/// Fields default so that unrelated or malformed notifications deserialize
/// to something we can inspect and ignore instead of failing the request.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookNotification {
    #[serde(default)]
    pub event: String,
    #[serde(rename = "object")]
    pub payment: Option<WebhookPayment>,
}

/// The payment object inside a webhook notification.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookPayment {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub metadata: Option<PaymentMetadata>,
}
