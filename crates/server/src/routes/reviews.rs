//! Review route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use parfum_core::{ProductId, Rating};

use crate::db::catalog::CatalogRepository;
use crate::db::reviews::ReviewRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::Review;
use crate::state::AppState;

/// Request body for creating a review.
#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub rating: i32,
    #[serde(default)]
    pub comment: Option<String>,
}

/// `GET /api/products/{id}/reviews` - A product's reviews, newest first.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<Review>>> {
    let product_id = ProductId::new(id);
    if !CatalogRepository::new(state.pool())
        .product_exists(product_id)
        .await?
    {
        return Err(AppError::NotFound(format!("product {id} not found")));
    }

    let reviews = ReviewRepository::new(state.pool())
        .list_for_product(product_id)
        .await?;

    Ok(Json(reviews))
}

/// `POST /api/products/{id}/reviews` - Create a review on a product.
///
/// The rating must be an integer in 1..=5. No purchase check; anyone with
/// an account can review any product.
#[instrument(skip(state, user, request), fields(user_id = %user.0.id))]
pub async fn create(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    user: RequireAuth,
    Json(request): Json<CreateReviewRequest>,
) -> Result<impl IntoResponse> {
    let rating = Rating::new(request.rating)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let product_id = ProductId::new(id);
    if !CatalogRepository::new(state.pool())
        .product_exists(product_id)
        .await?
    {
        return Err(AppError::NotFound(format!("product {id} not found")));
    }

    let comment = request
        .comment
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());

    let review = ReviewRepository::new(state.pool())
        .create(product_id, user.0.id, rating, comment)
        .await?;

    Ok((StatusCode::CREATED, Json(review)))
}
