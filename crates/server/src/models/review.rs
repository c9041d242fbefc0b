//! Review model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use parfum_core::{ProductId, ReviewId};

/// A product review, annotated with the reviewer's first name.
///
/// Only the first name is exposed; no other user fields leave the server.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub rating: i16,
    pub comment: Option<String>,
    pub author: String,
    pub created_at: DateTime<Utc>,
}
