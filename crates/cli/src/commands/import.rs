//! Price-list import command.
//!
//! Bulk path for the same import the admin endpoint runs: parse the CSV,
//! upsert products and variants, report counts.

use std::path::Path;

use parfum_server::services::import;

use super::{CliError, connect};

/// Import a supplier price list from a file.
pub async fn run(path: &Path) -> Result<(), CliError> {
    let data = tokio::fs::read_to_string(path).await?;

    let rows = import::parse_pricelist(&data).map_err(|e| CliError::Import(e.to_string()))?;
    tracing::info!(rows = rows.len(), file = %path.display(), "Price list parsed");

    let pool = connect().await?;
    let summary = import::apply(&pool, &rows)
        .await
        .map_err(|e| CliError::Import(e.to_string()))?;

    tracing::info!(
        created = summary.created,
        updated = summary.updated,
        skipped = summary.skipped,
        errors = summary.errors,
        "Import complete"
    );
    Ok(())
}
