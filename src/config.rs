//! Configuration constants and validation functions for the converter.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{ConvertError, Result};

/// HTTP timeout in seconds.
///
/// Generous because product feeds are often generated on the fly by slow
/// shop backends.
pub const HTTP_TIMEOUT_SECS: u64 = 60;

/// Maximum HTTP response size in bytes (100 MB).
///
/// Feeds larger than this are rejected instead of buffered into memory.
pub const MAX_RESPONSE_SIZE: u64 = 100 * 1024 * 1024;

/// Separator joining the surviving values of a multi-valued field into one
/// cell (e.g. several image URLs under repeated sibling elements).
pub const VALUE_SEPARATOR: &str = " | ";

/// Separator between ancestor tag names in a composite column key.
pub const KEY_SEPARATOR: char = '_';

/// Marker between an element tag and an attribute name in a column key.
pub const ATTRIBUTE_MARKER: char = '@';

/// Header written when the feed yields no records, so the output file is
/// still well-formed CSV.
pub const PLACEHOLDER_HEADER: &str = "no_data";

/// Environment variable consulted when --url is not given.
pub const SOURCE_URL_ENV: &str = "SOURCE_URL";

/// Environment variable consulted when --item-tag is not given.
pub const ITEM_TAG_ENV: &str = "ITEM_TAG";

/// Default output path for the converted CSV.
pub const DEFAULT_OUTPUT_PATH: &str = "data/feed.csv";

/// Source URL pattern: http or https, no whitespace.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://\S+$").expect("valid regex"));

/// Item tag pattern: an XML element name without namespace prefix.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ITEM_TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9._-]*$").expect("valid regex"));

/// Validate a source URL.
///
/// # Arguments
/// * `url` - The URL to validate
///
/// # Returns
/// * `Ok(())` if valid
/// * `Err(ConvertError::InvalidUrl)` if invalid
///
/// # Examples
/// ```
/// use xml2csv::config::validate_url;
///
/// assert!(validate_url("https://example.com/feed.xml").is_ok());
/// assert!(validate_url("example.com/feed.xml").is_err());
/// ```
pub fn validate_url(url: &str) -> Result<()> {
    if URL_PATTERN.is_match(url) {
        Ok(())
    } else {
        Err(ConvertError::InvalidUrl(url.to_string()))
    }
}

/// Validate a forced item tag name.
///
/// # Arguments
/// * `tag` - The tag name to validate
///
/// # Returns
/// * `Ok(())` if valid
/// * `Err(ConvertError::InvalidItemTag)` if invalid
///
/// # Examples
/// ```
/// use xml2csv::config::validate_item_tag;
///
/// assert!(validate_item_tag("product").is_ok());
/// assert!(validate_item_tag("<product>").is_err());
/// ```
pub fn validate_item_tag(tag: &str) -> Result<()> {
    if ITEM_TAG_PATTERN.is_match(tag) {
        Ok(())
    } else {
        Err(ConvertError::InvalidItemTag(tag.to_string()))
    }
}
