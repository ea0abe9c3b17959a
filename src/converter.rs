//! Main conversion service that ties all components together.

use reqwest::blocking::Client;
use roxmltree::Document;

use crate::config::{validate_item_tag, validate_url};
use crate::detect::select_items;
use crate::error::{ConvertError, Result};
use crate::flatten::{flatten_record, FlatRow};
use crate::http::{bytes_to_string, create_client, fetch_bytes};

/// Outcome of converting one feed document.
#[derive(Debug)]
pub struct Conversion {
    /// One flat row per record, in document order.
    pub rows: Vec<FlatRow>,
    /// Tag the records were selected by.
    pub item_tag: String,
    /// Non-fatal conditions encountered during conversion.
    pub warnings: Vec<String>,
}

/// Download and convert an XML feed.
///
/// # Arguments
/// * `url` - Source URL of the feed
/// * `forced_tag` - Item tag override, or `None` for automatic detection
///
/// # Returns
/// A `Conversion` with one flat row per record and any warnings encountered
pub fn convert_feed(url: &str, forced_tag: Option<&str>) -> Result<Conversion> {
    // Validate inputs before making HTTP requests
    validate_url(url)?;
    if let Some(tag) = forced_tag {
        validate_item_tag(tag)?;
    }

    let client = create_client()?;
    let xml = download_feed(&client, url)?;

    convert_document(&xml, forced_tag)
}

/// Download the feed body as text.
///
/// # Arguments
/// * `client` - HTTP client to use
/// * `url` - Source URL of the feed
pub fn download_feed(client: &Client, url: &str) -> Result<String> {
    let bytes = fetch_bytes(client, url).map_err(|e| {
        if let ConvertError::Http(source) = e {
            ConvertError::FeedDownload {
                url: url.to_string(),
                source,
            }
        } else {
            e
        }
    })?;

    Ok(bytes_to_string(&bytes, url))
}

/// Convert an already-downloaded XML document.
///
/// Parsing is the only step that can fail; selection and flattening always
/// succeed on a well-formed tree.
///
/// # Arguments
/// * `xml` - The feed document text
/// * `forced_tag` - Item tag override, or `None` for automatic detection
pub fn convert_document(xml: &str, forced_tag: Option<&str>) -> Result<Conversion> {
    let doc = Document::parse(xml)?;

    let selection = select_items(&doc, forced_tag);
    tracing::debug!(
        tag = %selection.tag,
        count = selection.items.len(),
        "Flattening records"
    );

    let rows: Vec<FlatRow> = selection
        .items
        .iter()
        .map(|item| flatten_record(*item))
        .collect();

    Ok(Conversion {
        rows,
        item_tag: selection.tag,
        warnings: selection.warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<catalog>
  <item><sku>A-1</sku><name>Lamp</name></item>
  <item><sku>A-2</sku><name>Chair</name></item>
</catalog>"#;

    #[test]
    fn test_convert_document_basic() {
        let conversion = convert_document(SAMPLE_FEED, None).unwrap();

        assert_eq!(conversion.item_tag, "item");
        assert_eq!(conversion.rows.len(), 2);
        assert!(conversion.warnings.is_empty());
        assert_eq!(
            conversion.rows[0].get("sku").map(String::as_str),
            Some("A-1")
        );
        assert_eq!(
            conversion.rows[1].get("name").map(String::as_str),
            Some("Chair")
        );
    }

    #[test]
    fn test_convert_document_forced_tag() {
        let conversion = convert_document(SAMPLE_FEED, Some("name")).unwrap();

        assert_eq!(conversion.item_tag, "name");
        assert_eq!(conversion.rows.len(), 2);
        assert_eq!(
            conversion.rows[0].get("name").map(String::as_str),
            Some("Lamp")
        );
    }

    #[test]
    fn test_convert_document_forced_tag_missing_warns() {
        let conversion = convert_document(SAMPLE_FEED, Some("product")).unwrap();

        assert_eq!(conversion.item_tag, "item");
        assert_eq!(conversion.rows.len(), 2);
        assert_eq!(conversion.warnings.len(), 1);
        assert!(conversion.warnings[0].contains("product"));
    }

    #[test]
    fn test_convert_document_no_records() {
        let conversion = convert_document("<catalog/>", None).unwrap();

        assert!(conversion.rows.is_empty());
        assert_eq!(conversion.item_tag, "catalog");
    }

    #[test]
    fn test_convert_document_malformed_xml() {
        let result = convert_document("<catalog><item></catalog>", None);
        assert!(matches!(result, Err(ConvertError::XmlParse(_))));
    }

    #[test]
    fn test_convert_feed_rejects_bad_url_before_network() {
        let result = convert_feed("not-a-url", None);
        assert!(matches!(result, Err(ConvertError::InvalidUrl(_))));
    }

    #[test]
    fn test_convert_feed_rejects_bad_tag_before_network() {
        let result = convert_feed("https://example.com/feed.xml", Some("bad tag"));
        assert!(matches!(result, Err(ConvertError::InvalidItemTag(_))));
    }
}
