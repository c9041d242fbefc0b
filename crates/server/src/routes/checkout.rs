//! Checkout route handlers.

use axum::{Json, extract::State};
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::{Cart, session_keys};
use crate::services::checkout;
use crate::state::AppState;

/// Response for a created payment: where to send the shopper.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentResponse {
    pub confirmation_url: String,
}

/// `POST /api/checkout/create-payment` - Turn the session cart into an order
/// and a gateway payment.
///
/// The cart is cleared only after the order and payment are committed, so a
/// failed checkout leaves the cart intact for a retry.
#[instrument(skip_all, fields(user_id = %user.0.id))]
pub async fn create_payment(
    State(state): State<AppState>,
    session: Session,
    user: RequireAuth,
) -> Result<Json<CreatePaymentResponse>> {
    let cart: Cart = session
        .get(session_keys::CART)
        .await?
        .unwrap_or_default();

    let outcome = checkout::create_payment_and_order(&state, user.0.id, &cart).await?;

    session.remove::<Cart>(session_keys::CART).await?;

    Ok(Json(CreatePaymentResponse {
        confirmation_url: outcome.confirmation_url,
    }))
}
