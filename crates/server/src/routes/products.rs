//! Catalog route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use parfum_core::{Category, ProductId};

use crate::db::catalog::{CatalogFilter, CatalogRepository, SortBy, SortOrder};
use crate::error::{AppError, Result};
use crate::models::Product;
use crate::state::AppState;

/// Query parameters for the product listing.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub category: Option<String>,
    /// Comma-separated brand names, match-any.
    pub brand: Option<String>,
    /// Comma-separated note names; products need at least one.
    pub notes: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

/// Split a comma list into trimmed, non-empty values.
fn split_comma_list(raw: &str) -> Option<Vec<String>> {
    let values: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect();
    (!values.is_empty()).then_some(values)
}

impl ListQuery {
    fn into_filter(self) -> Result<CatalogFilter> {
        let category = self
            .category
            .as_deref()
            .map(str::parse::<Category>)
            .transpose()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        let sort_by = self
            .sort_by
            .as_deref()
            .map(str::parse::<SortBy>)
            .transpose()
            .map_err(AppError::BadRequest)?
            .unwrap_or_default();

        let order = self
            .order
            .as_deref()
            .map(str::parse::<SortOrder>)
            .transpose()
            .map_err(AppError::BadRequest)?
            .unwrap_or_default();

        Ok(CatalogFilter {
            category,
            brands: self.brand.as_deref().and_then(split_comma_list),
            notes: self.notes.as_deref().and_then(split_comma_list),
            sort_by,
            order,
        })
    }
}

/// `GET /api/products` - List products with filters and sorting.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Product>>> {
    let filter = query.into_filter()?;
    let products = CatalogRepository::new(state.pool())
        .list_products(&filter)
        .await?;

    Ok(Json(products))
}

/// `GET /api/products/{id}` - Product detail with variants and notes.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Product>> {
    let product = CatalogRepository::new(state.pool())
        .get_product(ProductId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id} not found")))?;

    Ok(Json(product))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_comma_list() {
        assert_eq!(
            split_comma_list("HFC, Byredo"),
            Some(vec!["HFC".to_owned(), "Byredo".to_owned()])
        );
        assert_eq!(split_comma_list(" , ,"), None);
        assert_eq!(split_comma_list(""), None);
    }

    #[test]
    fn test_into_filter_defaults() {
        let filter = ListQuery::default().into_filter().expect("valid");
        assert!(filter.category.is_none());
        assert_eq!(filter.sort_by, SortBy::CreatedAt);
        assert_eq!(filter.order, SortOrder::Desc);
    }

    #[test]
    fn test_into_filter_rejects_unknown_sort() {
        let query = ListQuery {
            sort_by: Some("price; DROP TABLE products".to_owned()),
            ..ListQuery::default()
        };
        assert!(query.into_filter().is_err());
    }

    #[test]
    fn test_into_filter_rejects_unknown_category() {
        let query = ListQuery {
            category: Some("sporty".to_owned()),
            ..ListQuery::default()
        };
        assert!(query.into_filter().is_err());
    }
}
