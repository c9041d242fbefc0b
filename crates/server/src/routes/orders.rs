//! Order history route handlers.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::db::orders::OrderRepository;
use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::Order;
use crate::state::AppState;

/// `GET /api/orders` - The caller's orders, newest first, items attached.
#[instrument(skip(state, user), fields(user_id = %user.0.id))]
pub async fn index(
    State(state): State<AppState>,
    user: RequireAuth,
) -> Result<Json<Vec<Order>>> {
    let orders = OrderRepository::new(state.pool())
        .list_for_user(user.0.id)
        .await?;

    Ok(Json(orders))
}
