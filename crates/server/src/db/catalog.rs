//! Catalog repository: products, variants, and scent notes.
//!
//! Listing uses explicit follow-up queries (`= ANY($1)`) to attach variants
//! and notes instead of one wide join, so the query count stays fixed at
//! three regardless of result size.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use parfum_core::{Category, NoteId, ProductId, VariantId};

use super::RepositoryError;
use crate::models::{Note, Product, Variant};

/// A row from the `products` table.
#[derive(Debug, Clone, sqlx::FromRow)]
struct ProductRow {
    id: i32,
    name: String,
    brand: String,
    description: String,
    category: String,
    created_at: DateTime<Utc>,
}

/// A row from the `product_variants` table.
#[derive(Debug, Clone, sqlx::FromRow)]
struct VariantRow {
    id: i32,
    product_id: i32,
    volume: String,
    price: Decimal,
    stock: i32,
}

/// A note joined through `product_notes`, keyed by owning product.
#[derive(Debug, Clone, sqlx::FromRow)]
struct ProductNoteRow {
    product_id: i32,
    id: i32,
    name: String,
}

/// A variant joined with its product's display fields, for cart snapshots.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct VariantForCart {
    pub id: i32,
    pub volume: String,
    pub price: Decimal,
    pub stock: i32,
    pub product_name: String,
    pub brand: String,
}

/// Sort field for product listing. Whitelisted; anything else is a 400 at
/// the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    #[default]
    CreatedAt,
    Name,
    Brand,
}

impl SortBy {
    const fn as_column(self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::Name => "name",
            Self::Brand => "brand",
        }
    }
}

impl std::str::FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "createdAt" => Ok(Self::CreatedAt),
            "name" => Ok(Self::Name),
            "brand" => Ok(Self::Brand),
            other => Err(format!("unsupported sort field: {other}")),
        }
    }
}

/// Sort direction for product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("unsupported sort order: {other}")),
        }
    }
}

/// Filters for product listing.
///
/// `brands` is match-any; `notes` requires the product to carry at least one
/// of the named notes (not all of them).
#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    pub category: Option<Category>,
    pub brands: Option<Vec<String>>,
    pub notes: Option<Vec<String>>,
    pub sort_by: SortBy,
    pub order: SortOrder,
}

/// Repository for catalog database operations.
pub struct CatalogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CatalogRepository<'a> {
    /// Create a new catalog repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List products matching the filter, with variants and notes attached.
    ///
    /// When a note filter is present, only the matching notes are attached
    /// (the caller asked for products by note and sees which ones matched);
    /// otherwise all notes are attached. An empty result is a normal empty
    /// list, never an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if a query fails or a stored category is
    /// invalid.
    pub async fn list_products(
        &self,
        filter: &CatalogFilter,
    ) -> Result<Vec<Product>, RepositoryError> {
        // Sort column and direction come from closed enums, never user input.
        let sql = format!(
            "SELECT p.id, p.name, p.brand, p.description, p.category, p.created_at \
             FROM products p \
             WHERE ($1::TEXT IS NULL OR p.category = $1) \
               AND ($2::TEXT[] IS NULL OR p.brand = ANY($2)) \
               AND ($3::TEXT[] IS NULL OR EXISTS ( \
                       SELECT 1 FROM product_notes pn \
                       JOIN notes n ON n.id = pn.note_id \
                       WHERE pn.product_id = p.id AND n.name = ANY($3))) \
             ORDER BY p.{} {}",
            filter.sort_by.as_column(),
            filter.order.as_sql(),
        );

        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(filter.category.map(Category::as_str))
            .bind(filter.brands.as_deref())
            .bind(filter.notes.as_deref())
            .fetch_all(self.pool)
            .await?;

        self.attach_details(rows, filter.notes.as_deref()).await
    }

    /// Get one product with all variants and all notes attached.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if a query fails.
    pub async fn get_product(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, brand, description, category, created_at \
             FROM products \
             WHERE id = $1",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut products = self.attach_details(vec![row], None).await?;
        Ok(products.pop())
    }

    /// Whether a product with the given ID exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn product_exists(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM products WHERE id = $1)",
        )
        .bind(id.as_i32())
        .fetch_one(self.pool)
        .await?;

        Ok(exists)
    }

    /// Look up a variant joined with its product's display fields.
    ///
    /// Used by the cart to snapshot price, name, and brand at add time.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_variant_for_cart(
        &self,
        id: VariantId,
    ) -> Result<Option<VariantForCart>, RepositoryError> {
        let row = sqlx::query_as::<_, VariantForCart>(
            "SELECT v.id, v.volume, v.price, v.stock, \
                    p.name AS product_name, p.brand \
             FROM product_variants v \
             JOIN products p ON p.id = v.product_id \
             WHERE v.id = $1",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(row)
    }

    /// Attach variants and notes to the given product rows.
    ///
    /// `note_filter` restricts which notes are attached; it never affects
    /// which products are present.
    async fn attach_details(
        &self,
        rows: Vec<ProductRow>,
        note_filter: Option<&[String]>,
    ) -> Result<Vec<Product>, RepositoryError> {
        let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();

        let variant_rows = sqlx::query_as::<_, VariantRow>(
            "SELECT id, product_id, volume, price, stock \
             FROM product_variants \
             WHERE product_id = ANY($1) \
             ORDER BY price ASC",
        )
        .bind(&ids)
        .fetch_all(self.pool)
        .await?;

        let note_rows = sqlx::query_as::<_, ProductNoteRow>(
            "SELECT pn.product_id, n.id, n.name \
             FROM product_notes pn \
             JOIN notes n ON n.id = pn.note_id \
             WHERE pn.product_id = ANY($1) \
               AND ($2::TEXT[] IS NULL OR n.name = ANY($2)) \
             ORDER BY n.name ASC",
        )
        .bind(&ids)
        .bind(note_filter)
        .fetch_all(self.pool)
        .await?;

        let mut variants_by_product: HashMap<i32, Vec<Variant>> = HashMap::new();
        for v in variant_rows {
            variants_by_product
                .entry(v.product_id)
                .or_default()
                .push(Variant {
                    id: VariantId::new(v.id),
                    volume: v.volume,
                    price: v.price,
                    stock: v.stock,
                });
        }

        let mut notes_by_product: HashMap<i32, Vec<Note>> = HashMap::new();
        for n in note_rows {
            notes_by_product.entry(n.product_id).or_default().push(Note {
                id: NoteId::new(n.id),
                name: n.name,
            });
        }

        rows.into_iter()
            .map(|row| {
                let category: Category = row.category.parse().map_err(|_| {
                    RepositoryError::DataCorruption(format!(
                        "invalid category in database: {}",
                        row.category
                    ))
                })?;

                Ok(Product {
                    id: ProductId::new(row.id),
                    name: row.name,
                    brand: row.brand,
                    description: row.description,
                    category,
                    created_at: row.created_at,
                    variants: variants_by_product.remove(&row.id).unwrap_or_default(),
                    notes: notes_by_product.remove(&row.id).unwrap_or_default(),
                })
            })
            .collect()
    }

    /// Find a product's ID by its (brand, name) pair.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_product_id(
        &self,
        brand: &str,
        name: &str,
    ) -> Result<Option<ProductId>, RepositoryError> {
        let id = sqlx::query_scalar::<_, i32>(
            "SELECT id FROM products WHERE brand = $1 AND name = $2",
        )
        .bind(brand)
        .bind(name)
        .fetch_optional(self.pool)
        .await?;

        Ok(id.map(ProductId::new))
    }
}

/// Insert a product, returning its ID.
///
/// Takes an executor so it can run inside a per-row import transaction.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the insert fails.
pub async fn insert_product(
    executor: impl sqlx::PgExecutor<'_>,
    brand: &str,
    name: &str,
    description: &str,
    category: Category,
) -> Result<ProductId, RepositoryError> {
    let id = sqlx::query_scalar::<_, i32>(
        "INSERT INTO products (name, brand, description, category) \
         VALUES ($1, $2, $3, $4) \
         RETURNING id",
    )
    .bind(name)
    .bind(brand)
    .bind(description)
    .bind(category.as_str())
    .fetch_one(executor)
    .await?;

    Ok(ProductId::new(id))
}

/// Upsert a variant by (`product_id`, volume), updating the price in place.
///
/// Stock is only set on insert; re-imports never clobber live stock counts.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the upsert fails.
pub async fn upsert_variant(
    executor: impl sqlx::PgExecutor<'_>,
    product_id: ProductId,
    volume: &str,
    price: Decimal,
    stock: i32,
) -> Result<VariantId, RepositoryError> {
    let id = sqlx::query_scalar::<_, i32>(
        "INSERT INTO product_variants (product_id, volume, price, stock) \
         VALUES ($1, $2, $3, $4) \
         ON CONFLICT (product_id, volume) DO UPDATE SET \
             price = EXCLUDED.price \
         RETURNING id",
    )
    .bind(product_id.as_i32())
    .bind(volume)
    .bind(price)
    .bind(stock)
    .fetch_one(executor)
    .await?;

    Ok(VariantId::new(id))
}
