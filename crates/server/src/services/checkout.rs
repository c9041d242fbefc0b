//! Checkout orchestration: order creation and payment webhook handling.

use uuid::Uuid;

use parfum_core::{OrderId, OrderStatus, UserId};

use crate::db::orders::{self, OrderRepository};
use crate::error::AppError;
use crate::models::Cart;
use crate::payment::WebhookNotification;
use crate::state::AppState;

/// Result of a successful checkout: where to send the shopper next.
#[derive(Debug)]
pub struct CheckoutOutcome {
    pub order_id: OrderId,
    pub confirmation_url: String,
}

/// Create an order from the session cart and register a payment with the
/// gateway.
///
/// The order and its item snapshots are written in one transaction that
/// stays open across the gateway call, so a gateway failure rolls the order
/// back and leaves nothing dangling. The gateway call itself is covered by
/// an idempotence key, so a retried checkout cannot double-charge.
///
/// # Errors
///
/// - `AppError::BadRequest` if the cart is empty.
/// - `AppError::Payment` if the gateway rejects the payment or does not
///   return a confirmation URL.
/// - `AppError::Database` if a write fails.
pub async fn create_payment_and_order(
    state: &AppState,
    user_id: UserId,
    cart: &Cart,
) -> Result<CheckoutOutcome, AppError> {
    if cart.items.is_empty() {
        return Err(AppError::BadRequest("cart is empty".to_owned()));
    }

    let mut tx = state
        .pool()
        .begin()
        .await
        .map_err(crate::db::RepositoryError::from)?;

    let order_id = orders::create_order(&mut tx, user_id, cart.total).await?;
    for item in &cart.items {
        orders::add_item(&mut tx, order_id, item.variant_id, item.quantity, item.price).await?;
    }

    let return_url = format!("{}/order-confirmation?orderId={order_id}", state.config().base_url);
    let description = format!("Order #{order_id}");
    let payment = state
        .payment()
        .create_payment(order_id, cart.total, &description, &return_url, Uuid::new_v4())
        .await?;

    let confirmation_url = payment
        .confirmation
        .map(|c| c.confirmation_url)
        .ok_or_else(|| {
            AppError::Internal("payment gateway returned no confirmation URL".to_owned())
        })?;

    orders::set_payment_id(&mut tx, order_id, &payment.id).await?;

    tx.commit().await.map_err(crate::db::RepositoryError::from)?;

    tracing::info!(
        order_id = %order_id,
        payment_id = %payment.id,
        "Checkout created order and payment"
    );

    Ok(CheckoutOutcome {
        order_id,
        confirmation_url,
    })
}

/// Apply a gateway webhook notification.
///
/// Only `payment.succeeded` events with a succeeded payment move an order
/// forward; everything else is logged and dropped. The status update is a
/// guarded one so replayed notifications and mismatched payment IDs are
/// no-ops.
///
/// # Errors
///
/// Returns `AppError::Database` if the status update fails. Ignorable
/// notifications are `Ok(())` so the gateway does not retry them.
pub async fn handle_webhook(
    state: &AppState,
    notification: WebhookNotification,
) -> Result<(), AppError> {
    if notification.event != "payment.succeeded" {
        tracing::debug!(event = %notification.event, "Ignoring webhook event");
        return Ok(());
    }

    let Some(payment) = notification.payment else {
        tracing::warn!("payment.succeeded webhook without payment object");
        return Ok(());
    };

    if payment.status != "succeeded" {
        tracing::warn!(
            payment_id = %payment.id,
            status = %payment.status,
            "payment.succeeded webhook with non-succeeded payment"
        );
        return Ok(());
    }

    let Some(order_id) = payment
        .metadata
        .as_ref()
        .and_then(|m| m.order_id.parse::<i32>().ok())
        .map(OrderId::new)
    else {
        tracing::warn!(payment_id = %payment.id, "Webhook payment without usable order metadata");
        return Ok(());
    };

    let updated = OrderRepository::new(state.pool())
        .mark_processing_if_pending(order_id, &payment.id)
        .await?;

    if updated {
        tracing::info!(
            order_id = %order_id,
            payment_id = %payment.id,
            status = %OrderStatus::Processing,
            "Order paid"
        );
    } else {
        // Unknown order, mismatched payment ID, or a replay. All safe to drop.
        tracing::warn!(
            order_id = %order_id,
            payment_id = %payment.id,
            "Webhook did not match a pending order"
        );
    }

    Ok(())
}
