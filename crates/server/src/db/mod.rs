//! Database operations for the shop's `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `users` - Shop accounts (argon2 password hashes)
//! - `products`, `product_variants`, `notes`, `product_notes` - Catalog
//! - `orders`, `order_items` - Checkout results (items snapshot price/quantity)
//! - `reviews` - Per-product reviews
//! - tower-sessions storage (created by the session store's own migration)
//!
//! All queries use the runtime-checked `query_as`/`query_scalar` API with
//! `FromRow` row types; no live database is needed at compile time.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p parfum-cli -- migrate
//! ```

pub mod catalog;
pub mod orders;
pub mod reviews;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
