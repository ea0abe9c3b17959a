//! Error types for the converter.

use thiserror::Error;

/// Main error type for the xml2csv library.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// No source URL given on the command line or in the environment.
    #[error("No source URL provided. Pass --url or set the SOURCE_URL environment variable")]
    MissingSourceUrl,

    /// Source URL does not look like an HTTP(S) URL.
    #[error("Invalid source URL: '{0}'. Expected an http:// or https:// URL")]
    InvalidUrl(String),

    /// Forced item tag is not a usable XML element name.
    #[error("Invalid item tag: '{0}'. Expected an element name (e.g. product, item, offer)")]
    InvalidItemTag(String),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to download the feed.
    #[error("Failed to download feed from {url}: {source}")]
    FeedDownload {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Transient failures persisted across every retry attempt.
    #[error("Request failed after {attempts} attempts: {message}")]
    RetriesExhausted { attempts: u32, message: String },

    /// Response body exceeds the configured size cap.
    #[error("Response too large: {size} bytes exceeds the {limit} byte limit")]
    ResponseTooLarge { size: u64, limit: u64 },

    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// CSV serialization failed.
    #[error("CSV writing failed: {0}")]
    Csv(#[from] csv::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for converter operations.
pub type Result<T> = std::result::Result<T, ConvertError>;
