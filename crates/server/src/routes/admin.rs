//! Admin route handlers.

use axum::{
    Json,
    extract::{Multipart, State},
};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::services::import::{self, ImportSummary};
use crate::state::AppState;

/// Multipart field name carrying the price-list file.
const PRICELIST_FIELD: &str = "pricelist";

/// `POST /api/admin/upload-pricelist` - Import a supplier CSV price list.
///
/// Parsing is all-or-nothing per file, but applying is per-row: one broken
/// row is counted in `errors` and the rest of the file still lands.
#[instrument(skip_all, fields(user_id = %user.0.id))]
pub async fn upload_pricelist(
    State(state): State<AppState>,
    user: RequireAuth,
    mut multipart: Multipart,
) -> Result<Json<ImportSummary>> {
    let mut data: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("invalid multipart body: {e}")))?
    {
        if field.name() == Some(PRICELIST_FIELD) {
            let text = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(format!("unreadable upload: {e}")))?;
            data = Some(text);
        }
    }

    let data = data.ok_or_else(|| {
        AppError::BadRequest(format!("missing multipart field '{PRICELIST_FIELD}'"))
    })?;

    let rows = import::parse_pricelist(&data)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    tracing::info!(rows = rows.len(), "Price list parsed");

    let summary = import::apply(state.pool(), &rows).await?;
    Ok(Json(summary))
}
