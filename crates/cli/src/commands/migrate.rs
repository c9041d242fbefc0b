//! Database migration command.
//!
//! Runs the server's schema migrations and then the tower-sessions store
//! migration, so a fresh database is fully ready after one command.

use tower_sessions_sqlx_store::PostgresStore;

use super::{CliError, connect};

/// Run all migrations against the shop database.
pub async fn run() -> Result<(), CliError> {
    let pool = connect().await?;

    tracing::info!("Running schema migrations...");
    sqlx::migrate!("../server/migrations").run(&pool).await?;

    tracing::info!("Running session store migration...");
    PostgresStore::new(pool.clone()).migrate().await?;

    tracing::info!("Migrations complete");
    Ok(())
}
