//! End-to-end parsing tests for realistic supplier price-list files.
//!
//! These run without a server or database; they exercise the same parser
//! the admin upload endpoint and the CLI import share.

#![allow(clippy::expect_used)]

use parfum_server::services::import::parse_pricelist;

const MIXED_SUPPLIER_FILE: &str = "\
Name,,Full bottle,,5ml,10ml,15ml
NICHE,,,,,,
\"HFC: Dazzling Girls 75ml\",,1200,,300,500,700
\"Byredo: Gypsy Water 100ml\",,1800,,,600,
\"Le Labo: Santal 33\",,,,350,550,750
DISCONTINUED,,,,,,
\"Xerjoff: Naxos 50ml\",,,,,,
";

#[test]
fn parses_a_mixed_supplier_file() {
    let rows = parse_pricelist(MIXED_SUPPLIER_FILE).expect("file should parse");

    // Header, section dividers, and the priceless discontinued row drop out.
    assert_eq!(rows.len(), 3);

    let brands: Vec<&str> = rows.iter().map(|r| r.brand.as_str()).collect();
    assert_eq!(brands, ["HFC", "Byredo", "Le Labo"]);
}

#[test]
fn bottle_volume_comes_from_the_name_cell() {
    let rows = parse_pricelist(MIXED_SUPPLIER_FILE).expect("file should parse");

    assert_eq!(rows[0].bottle_volume.as_deref(), Some("75ml"));
    assert_eq!(rows[1].bottle_volume.as_deref(), Some("100ml"));
    // Decant-only products have no bottle volume and no bottle price.
    assert_eq!(rows[2].bottle_volume, None);
    assert_eq!(rows[2].bottle_price, None);
}

#[test]
fn missing_price_tiers_stay_empty() {
    let rows = parse_pricelist(MIXED_SUPPLIER_FILE).expect("file should parse");

    let byredo = &rows[1];
    assert!(byredo.bottle_price.is_some());
    assert_eq!(byredo.decant_prices[0], None);
    assert!(byredo.decant_prices[1].is_some());
    assert_eq!(byredo.decant_prices[2], None);
}

#[test]
fn semicolon_delimited_files_parse_the_same() {
    let semicolon = MIXED_SUPPLIER_FILE.replace(',', ";");
    let rows = parse_pricelist(&semicolon).expect("file should parse");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].name, "Dazzling Girls");
}
