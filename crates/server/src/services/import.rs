//! Supplier price-list import.
//!
//! Suppliers send CSV price lists with one row per fragrance, e.g.:
//!
//! ```csv
//! "HFC: Dazzling Girls 75ml",,1200,,300,500,700
//! ```
//!
//! Column 0 is `Brand: Name Volume`, column 2 is the full-bottle price, and
//! columns 4..=6 are decant prices (5ml, 10ml, 15ml). The delimiter varies
//! by supplier, so it is sniffed per file. Parsing is pure and separated
//! from `apply`, which writes each row in its own transaction so one bad
//! row never poisons the rest of the file.

use csv::ReaderBuilder;
use regex::Regex;
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::sync::LazyLock;

use parfum_core::Category;

use crate::db::RepositoryError;
use crate::db::catalog::{self, CatalogRepository};

/// Stock assigned to newly created variants. Suppliers do not send stock
/// counts, so new variants start at a nominal level for the storefront.
const DEFAULT_STOCK: i32 = 50;

/// Category for products the price list creates. Suppliers do not classify,
/// so new products land in the neutral bucket until curated.
const DEFAULT_CATEGORY: Category = Category::Unisex;

/// Decant volumes carried in columns 4..=6, in column order.
const DECANT_VOLUMES: [&str; 3] = ["5ml", "10ml", "15ml"];

static VOLUME_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    let re = Regex::new(r"(?i)(\d+\s?ml)\s*$").expect("valid volume pattern");
    re
});

/// One parsed price-list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricelistRow {
    pub brand: String,
    pub name: String,
    /// Volume token from the raw name, e.g. `75ml`. Absent when the row
    /// does not name a bottle size.
    pub bottle_volume: Option<String>,
    pub bottle_price: Option<Decimal>,
    /// Decant prices aligned with [`DECANT_VOLUMES`].
    pub decant_prices: [Option<Decimal>; 3],
}

/// Outcome of applying a parsed price list.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    /// Products created.
    pub created: usize,
    /// Existing products whose variants were updated.
    pub updated: usize,
    /// Rows skipped for having no usable name or prices.
    pub skipped: usize,
    /// Rows that failed to apply.
    pub errors: usize,
}

/// Errors from price-list parsing.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// The file is not parseable CSV at all.
    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Sniff the delimiter from the first line. Suppliers use `;` or `,`.
fn sniff_delimiter(data: &str) -> u8 {
    let first_line = data.lines().next().unwrap_or_default();
    if first_line.matches(';').count() > first_line.matches(',').count() {
        b';'
    } else {
        b','
    }
}

/// Split a raw product cell into brand, name, and trailing volume token.
///
/// `"HFC: Dazzling Girls 75ml"` parses to `("HFC", "Dazzling Girls",
/// Some("75ml"))`. Without a colon the whole cell becomes the name with an
/// empty brand; without a trailing volume token the volume is `None`.
fn parse_product_name(raw: &str) -> (String, String, Option<String>) {
    let raw = raw.trim();

    let (brand, rest) = match raw.split_once(':') {
        Some((brand, rest)) => (brand.trim().to_owned(), rest.trim()),
        None => (String::new(), raw),
    };

    let (name, volume) = match VOLUME_RE.find(rest) {
        Some(m) => (
            rest[..m.start()].trim().to_owned(),
            Some(m.as_str().trim().to_lowercase().replace(' ', "")),
        ),
        None => (rest.to_owned(), None),
    };

    (brand, name, volume)
}

/// Parse a price cell. Space-grouped digits are tolerated and a decimal
/// comma is read as a decimal point, so `"649,90"` is 649.90 rather than
/// a grouped 64990; anything else is `None`.
fn parse_price(cell: &str) -> Option<Decimal> {
    let cleaned: String = cell.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.replace(',', ".").parse::<Decimal>().ok().filter(|d| *d > Decimal::ZERO)
}

/// Parse a price-list file into rows.
///
/// Rows with no product name or no parseable price are dropped silently
/// here (headers and section dividers look exactly like that); `apply`
/// reports them via [`ImportSummary::skipped`] based on what it receives.
///
/// # Errors
///
/// Returns [`ImportError::Csv`] only when the file is not CSV at all.
pub fn parse_pricelist(data: &str) -> Result<Vec<PricelistRow>, ImportError> {
    let delimiter = sniff_delimiter(data);
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(data.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;

        let raw_name = record.get(0).unwrap_or_default().trim();
        if raw_name.is_empty() {
            continue;
        }

        let bottle_price = record.get(2).and_then(parse_price);
        let decant_prices = [
            record.get(4).and_then(parse_price),
            record.get(5).and_then(parse_price),
            record.get(6).and_then(parse_price),
        ];

        if bottle_price.is_none() && decant_prices.iter().all(Option::is_none) {
            // Header, section divider, or discontinued item.
            continue;
        }

        let (brand, name, bottle_volume) = parse_product_name(raw_name);
        if name.is_empty() {
            continue;
        }

        rows.push(PricelistRow {
            brand,
            name,
            bottle_volume,
            bottle_price,
            decant_prices,
        });
    }

    Ok(rows)
}

/// Apply parsed rows to the catalog.
///
/// Each row runs in its own transaction: the product is found by
/// (brand, name) or created, then every priced volume is upserted. A row
/// that fails is counted and logged, and the import moves on.
///
/// # Errors
///
/// Returns `RepositoryError` only for failures outside any row's
/// transaction (beginning a transaction); per-row failures are absorbed
/// into [`ImportSummary::errors`].
pub async fn apply(pool: &PgPool, rows: &[PricelistRow]) -> Result<ImportSummary, RepositoryError> {
    let mut summary = ImportSummary::default();
    let repo = CatalogRepository::new(pool);

    for row in rows {
        let mut variants: Vec<(&str, Decimal)> = Vec::new();
        if let (Some(volume), Some(price)) = (row.bottle_volume.as_deref(), row.bottle_price) {
            variants.push((volume, price));
        }
        for (volume, price) in DECANT_VOLUMES.iter().zip(row.decant_prices) {
            if let Some(price) = price {
                variants.push((volume, price));
            }
        }
        if variants.is_empty() {
            // Priced only in the bottle column but without a volume token.
            summary.skipped += 1;
            continue;
        }

        let existing = match repo.find_product_id(&row.brand, &row.name).await {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!(brand = %row.brand, name = %row.name, error = %e, "Price-list lookup failed");
                summary.errors += 1;
                continue;
            }
        };

        match apply_row(pool, existing, row, &variants).await {
            Ok(()) if existing.is_some() => summary.updated += 1,
            Ok(()) => summary.created += 1,
            Err(e) => {
                tracing::warn!(brand = %row.brand, name = %row.name, error = %e, "Price-list row failed");
                summary.errors += 1;
            }
        }
    }

    tracing::info!(
        created = summary.created,
        updated = summary.updated,
        skipped = summary.skipped,
        errors = summary.errors,
        "Price-list import finished"
    );

    Ok(summary)
}

async fn apply_row(
    pool: &PgPool,
    existing: Option<parfum_core::ProductId>,
    row: &PricelistRow,
    variants: &[(&str, Decimal)],
) -> Result<(), RepositoryError> {
    let mut tx = pool.begin().await?;

    let product_id = match existing {
        Some(id) => id,
        None => {
            catalog::insert_product(&mut *tx, &row.brand, &row.name, "", DEFAULT_CATEGORY).await?
        }
    };

    for (volume, price) in variants {
        catalog::upsert_variant(&mut *tx, product_id, volume, *price, DEFAULT_STOCK).await?;
    }

    tx.commit().await?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_product_name_with_volume() {
        let (brand, name, volume) = parse_product_name("HFC: Dazzling Girls 75ml");
        assert_eq!(brand, "HFC");
        assert_eq!(name, "Dazzling Girls");
        assert_eq!(volume.as_deref(), Some("75ml"));
    }

    #[test]
    fn test_parse_product_name_without_volume() {
        let (brand, name, volume) = parse_product_name("Byredo: Gypsy Water");
        assert_eq!(brand, "Byredo");
        assert_eq!(name, "Gypsy Water");
        assert_eq!(volume, None);
    }

    #[test]
    fn test_parse_product_name_without_brand() {
        let (brand, name, volume) = parse_product_name("Gypsy Water 100 ml");
        assert_eq!(brand, "");
        assert_eq!(name, "Gypsy Water");
        assert_eq!(volume.as_deref(), Some("100ml"));
    }

    #[test]
    fn test_parse_price_tolerates_spaces() {
        assert_eq!(parse_price(" 1 200 "), Some(dec("1200")));
        assert_eq!(parse_price("300"), Some(dec("300")));
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("-"), None);
        assert_eq!(parse_price("0"), None);
    }

    #[test]
    fn test_parse_price_reads_comma_as_decimal_point() {
        assert_eq!(parse_price("649,90"), Some(dec("649.90")));
        assert_eq!(parse_price("1,5"), Some(dec("1.5")));
    }

    #[test]
    fn test_parse_pricelist_example_row() {
        let csv = "\"HFC: Dazzling Girls 75ml\",,1200,,300,500,700\n";
        let rows = parse_pricelist(csv).unwrap();
        assert_eq!(rows.len(), 1);

        let row = &rows[0];
        assert_eq!(row.brand, "HFC");
        assert_eq!(row.name, "Dazzling Girls");
        assert_eq!(row.bottle_volume.as_deref(), Some("75ml"));
        assert_eq!(row.bottle_price, Some(dec("1200")));
        assert_eq!(
            row.decant_prices,
            [Some(dec("300")), Some(dec("500")), Some(dec("700"))]
        );
    }

    #[test]
    fn test_parse_pricelist_sniffs_semicolons() {
        let csv = "HFC: Dazzling Girls 75ml;;1200;;300;500;700\n";
        let rows = parse_pricelist(csv).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].bottle_price, Some(dec("1200")));
    }

    #[test]
    fn test_parse_pricelist_skips_headers_and_dividers() {
        let csv = "Name,,Price,,5ml,10ml,15ml\n\
                   NICHE FRAGRANCES,,,,,,\n\
                   \"HFC: Dazzling Girls 75ml\",,1200,,300,500,700\n";
        let rows = parse_pricelist(csv).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Dazzling Girls");
    }

    #[test]
    fn test_parse_pricelist_partial_prices() {
        let csv = "\"HFC: Dazzling Girls 75ml\",,,,300,,\n";
        let rows = parse_pricelist(csv).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].bottle_price, None);
        assert_eq!(rows[0].decant_prices, [Some(dec("300")), None, None]);
    }

    #[test]
    fn test_parse_pricelist_short_rows() {
        // flexible(true): rows narrower than 7 columns still parse.
        let csv = "\"HFC: Dazzling Girls 75ml\",,1200\n";
        let rows = parse_pricelist(csv).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].bottle_price, Some(dec("1200")));
        assert_eq!(rows[0].decant_prices, [None, None, None]);
    }
}
