//! HTTP client for the payment gateway.

use std::time::Duration;

use reqwest::{Client, Url};
use rust_decimal::Decimal;
use secrecy::ExposeSecret;
use uuid::Uuid;

use parfum_core::OrderId;

use super::PaymentError;
use super::types::{
    ConfirmationRequest, CreatePaymentRequest, Payment, PaymentAmount, PaymentMetadata,
};
use crate::config::PaymentConfig;

const DEFAULT_API_URL: &str = "https://api.yookassa.ru/v3";

/// Currency every payment is charged in.
const CURRENCY: &str = "RUB";

/// Client for the payment gateway's REST API.
///
/// Authenticates with HTTP basic auth (shop ID + secret key). Every create
/// call carries an `Idempotence-Key` header so a retried request cannot
/// charge the shopper twice.
#[derive(Debug, Clone)]
pub struct PaymentClient {
    client: Client,
    shop_id: String,
    secret_key: secrecy::SecretString,
    base_url: Url,
}

impl PaymentClient {
    /// Create a client from config, honoring its `api_url` override.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PaymentError::InvalidUrl`] if the
    /// configured URL does not parse.
    pub fn new(config: &PaymentConfig) -> Result<Self, PaymentError> {
        let url = config.api_url.as_deref().unwrap_or(DEFAULT_API_URL);
        Self::with_base_url(config, url)
    }

    /// Create a client with an explicit base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Same as [`PaymentClient::new`].
    pub fn with_base_url(config: &PaymentConfig, base_url: &str) -> Result<Self, PaymentError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        // Trailing slash so Url::join appends instead of replacing the last
        // path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| PaymentError::InvalidUrl {
            url: base_url.to_owned(),
            message: e.to_string(),
        })?;

        Ok(Self {
            client,
            shop_id: config.shop_id.clone(),
            secret_key: config.secret_key.clone(),
            base_url,
        })
    }

    /// Create a payment for an order and return the gateway's payment object,
    /// confirmation URL included.
    ///
    /// # Errors
    ///
    /// - [`PaymentError::Gateway`] if the gateway returns a non-2xx status.
    /// - [`PaymentError::Http`] on network failure or a malformed response.
    pub async fn create_payment(
        &self,
        order_id: OrderId,
        total: Decimal,
        description: &str,
        return_url: &str,
        idempotence_key: Uuid,
    ) -> Result<Payment, PaymentError> {
        let request = CreatePaymentRequest {
            amount: PaymentAmount {
                value: format!("{total:.2}"),
                currency: CURRENCY.to_owned(),
            },
            confirmation: ConfirmationRequest {
                kind: "redirect".to_owned(),
                return_url: return_url.to_owned(),
            },
            capture: true,
            description: description.to_owned(),
            metadata: PaymentMetadata {
                order_id: order_id.to_string(),
            },
        };

        let url = self.endpoint("payments")?;
        let response = self
            .client
            .post(url)
            .basic_auth(&self.shop_id, Some(self.secret_key.expose_secret()))
            .header("Idempotence-Key", idempotence_key.to_string())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PaymentError::Gateway { status, body });
        }

        Ok(response.json().await?)
    }

    fn endpoint(&self, path: &str) -> Result<Url, PaymentError> {
        self.base_url.join(path).map_err(|e| PaymentError::InvalidUrl {
            url: format!("{}{path}", self.base_url),
            message: e.to_string(),
        })
    }
}
