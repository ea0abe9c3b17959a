//! End-to-end integration tests for the conversion pipeline.
//!
//! Tests the complete pipeline from XML parsing to CSV generation using a
//! product-feed fixture.

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use xml2csv::converter::{convert_document, Conversion};
use xml2csv::output::{header_set, render_csv};

/// Load fixture file content.
fn load_fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e))
}

/// Run the conversion pipeline on the products fixture.
fn run_pipeline() -> Conversion {
    let xml = load_fixture("products.xml");
    convert_document(&xml, None).expect("Conversion should succeed")
}

#[test]
fn test_pipeline_detects_product_tag() {
    let conversion = run_pipeline();

    assert_eq!(conversion.item_tag, "product");
    assert_eq!(conversion.rows.len(), 3);
    assert!(conversion.warnings.is_empty());
}

#[test]
fn test_pipeline_first_row_fields() {
    let conversion = run_pipeline();
    let row = &conversion.rows[0];

    assert_eq!(row.get("product@id").map(String::as_str), Some("1"));
    assert_eq!(row.get("name").map(String::as_str), Some("Hemp Oil 10%"));
    assert_eq!(row.get("price@currency").map(String::as_str), Some("PLN"));
    assert_eq!(row.get("price").map(String::as_str), Some("129.00"));
    assert_eq!(row.get("seller_name").map(String::as_str), Some("Acme"));
    assert_eq!(row.get("seller_rating").map(String::as_str), Some("4.8"));
}

#[test]
fn test_pipeline_merges_repeated_images() {
    let conversion = run_pipeline();

    // Three <image> siblings, one a duplicate: two survive, order preserved
    assert_eq!(
        conversion.rows[0].get("images_image").map(String::as_str),
        Some("https://img.example/1-a.jpg | https://img.example/1-b.jpg")
    );
}

#[test]
fn test_pipeline_drops_whitespace_attribute() {
    let conversion = run_pipeline();

    // <stock available="  "/> contributes nothing to row 2
    assert!(!conversion.rows[1].contains_key("stock@available"));
    assert!(!conversion.rows[1].contains_key("stock"));
}

#[test]
fn test_pipeline_header_union_first_seen_order() {
    let conversion = run_pipeline();

    assert_eq!(
        header_set(&conversion.rows),
        vec![
            "product@id",
            "name",
            "price@currency",
            "price",
            "seller_name",
            "seller_rating",
            "images_image",
            "voucher@code",
        ]
    );
}

#[test]
fn test_pipeline_csv_output() {
    let conversion = run_pipeline();
    let csv = render_csv(&conversion.rows).expect("CSV rendering should succeed");

    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(
        lines[0],
        "product@id,name,price@currency,price,seller_name,seller_rating,images_image,voucher@code"
    );
    assert_eq!(
        lines[1],
        "1,Hemp Oil 10%,PLN,129.00,Acme,4.8,https://img.example/1-a.jpg | https://img.example/1-b.jpg,"
    );
    // Row 2 has no seller or voucher fields: padded with empty cells
    assert_eq!(lines[2], "2,Hemp Tea,PLN,39.90,,,https://img.example/2-a.jpg,");
    // Row 3's name contains a comma and gets quoted
    assert_eq!(lines[3], "3,\"Gift Card, printed\",,,,,,GIFT50");
}

#[test]
fn test_pipeline_forced_tag_overrides_detection() {
    let xml = load_fixture("products.xml");
    let conversion = convert_document(&xml, Some("image")).expect("Conversion should succeed");

    // Forced tags match anywhere in the tree, one row per occurrence
    assert_eq!(conversion.item_tag, "image");
    assert_eq!(conversion.rows.len(), 4);
    assert_eq!(
        conversion.rows[0].get("image").map(String::as_str),
        Some("https://img.example/1-a.jpg")
    );
}

#[test]
fn test_pipeline_forced_tag_missing_warns_and_falls_back() {
    let xml = load_fixture("products.xml");
    let conversion = convert_document(&xml, Some("entry")).expect("Conversion should succeed");

    assert_eq!(conversion.item_tag, "product");
    assert_eq!(conversion.rows.len(), 3);
    assert_eq!(conversion.warnings.len(), 1);
    assert!(conversion.warnings[0].contains("entry"));
}

#[test]
fn test_pipeline_no_records_still_renders_csv() {
    let conversion = convert_document("<shop/>", None).expect("Conversion should succeed");
    let csv = render_csv(&conversion.rows).expect("CSV rendering should succeed");

    assert!(conversion.rows.is_empty());
    assert_eq!(csv, "no_data\n");
}
