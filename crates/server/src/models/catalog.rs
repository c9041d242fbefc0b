//! Catalog models: products, variants, scent notes.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use parfum_core::{Category, NoteId, ProductId, VariantId};

/// A purchasable size/volume option of a product.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub id: VariantId,
    pub volume: String,
    pub price: Decimal,
    pub stock: i32,
}

/// A named scent descriptor, shared across products.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub name: String,
}

/// A product with its variants and notes eagerly attached.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub description: String,
    pub category: Category,
    pub created_at: DateTime<Utc>,
    pub variants: Vec<Variant>,
    pub notes: Vec<Note>,
}
