//! Review repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use parfum_core::{ProductId, Rating, ReviewId, UserId};

use super::RepositoryError;
use crate::models::Review;

/// A review row joined with the reviewer's first name.
#[derive(Debug, sqlx::FromRow)]
struct ReviewRow {
    id: i32,
    product_id: i32,
    rating: i16,
    comment: Option<String>,
    first_name: String,
    created_at: DateTime<Utc>,
}

impl ReviewRow {
    fn into_review(self) -> Review {
        Review {
            id: ReviewId::new(self.id),
            product_id: ProductId::new(self.product_id),
            rating: self.rating,
            comment: self.comment,
            author: self.first_name,
            created_at: self.created_at,
        }
    }
}

/// Repository for review database operations.
pub struct ReviewRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ReviewRepository<'a> {
    /// Create a new review repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a product's reviews, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_product(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<Review>, RepositoryError> {
        let rows = sqlx::query_as::<_, ReviewRow>(
            "SELECT r.id, r.product_id, r.rating, r.comment, u.first_name, r.created_at \
             FROM reviews r \
             JOIN users u ON u.id = r.user_id \
             WHERE r.product_id = $1 \
             ORDER BY r.created_at DESC",
        )
        .bind(product_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(ReviewRow::into_review).collect())
    }

    /// Create a review, returning it with the author's first name attached.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        product_id: ProductId,
        user_id: UserId,
        rating: Rating,
        comment: Option<&str>,
    ) -> Result<Review, RepositoryError> {
        let row = sqlx::query_as::<_, ReviewRow>(
            "WITH ins AS ( \
                 INSERT INTO reviews (product_id, user_id, rating, comment) \
                 VALUES ($1, $2, $3, $4) \
                 RETURNING id, product_id, user_id, rating, comment, created_at \
             ) \
             SELECT ins.id, ins.product_id, ins.rating, ins.comment, \
                    u.first_name, ins.created_at \
             FROM ins \
             JOIN users u ON u.id = ins.user_id",
        )
        .bind(product_id.as_i32())
        .bind(user_id.as_i32())
        .bind(rating.as_i16())
        .bind(comment)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into_review())
    }
}
