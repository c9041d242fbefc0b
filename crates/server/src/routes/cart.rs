//! Cart route handlers.
//!
//! The cart lives in the tower-sessions session, so it works for anonymous
//! visitors and survives login.

use axum::{Json, extract::State};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use parfum_core::VariantId;

use crate::db::catalog::CatalogRepository;
use crate::error::{AppError, Result};
use crate::models::{Cart, CartItem, session_keys};
use crate::state::AppState;

/// Request body for adding a variant to the cart.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub variant_id: i32,
    pub quantity: i32,
}

/// `GET /api/cart` - Current session cart (empty cart for new sessions).
#[instrument(skip_all)]
pub async fn show(session: Session) -> Result<Json<Cart>> {
    let cart: Cart = session
        .get(session_keys::CART)
        .await?
        .unwrap_or_default();

    Ok(Json(cart))
}

/// `POST /api/cart` - Add a variant to the cart.
///
/// The line snapshots the variant's current price and display fields.
/// Adding the same variant again accumulates quantity.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<Cart>> {
    if request.quantity <= 0 {
        return Err(AppError::BadRequest(
            "quantity must be a positive integer".to_owned(),
        ));
    }

    let variant = CatalogRepository::new(state.pool())
        .get_variant_for_cart(VariantId::new(request.variant_id))
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("variant {} not found", request.variant_id))
        })?;

    let mut cart: Cart = session
        .get(session_keys::CART)
        .await?
        .unwrap_or_default();

    cart.add(CartItem {
        variant_id: VariantId::new(variant.id),
        name: variant.product_name,
        brand: variant.brand,
        volume: variant.volume,
        price: variant.price,
        quantity: request.quantity,
    });

    session.insert(session_keys::CART, &cart).await?;

    Ok(Json(cart))
}
