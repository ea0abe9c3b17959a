//! xml2csv - Convert arbitrary XML feeds to flat CSV.
//!
//! This crate converts an XML document with an unknown, heterogeneous schema
//! into a tabular CSV representation. It infers the record boundary (which
//! repeated element is "one row") and the column set automatically, so feed
//! sources do not need a predefined schema.
//!
//! # Example
//!
//! ```
//! use xml2csv::converter::convert_document;
//!
//! let xml = "<catalog>\
//!     <item><sku>A-1</sku></item>\
//!     <item><sku>A-2</sku></item>\
//! </catalog>";
//! let conversion = convert_document(xml, None).unwrap();
//! assert_eq!(conversion.item_tag, "item");
//! assert_eq!(conversion.rows.len(), 2);
//! ```
//!
//! # Architecture
//!
//! The converter is organized into several modules:
//!
//! - [`config`]: Configuration constants and validation
//! - [`error`]: Error types and Result alias
//! - [`http`]: HTTP client for downloading feeds
//! - [`xml`]: XML node helpers
//! - [`detect`]: Item detection (which repeated element is one record)
//! - [`flatten`]: Record flattening (subtree to flat key/value row)
//! - [`output`]: CSV output generation
//! - [`converter`]: Main conversion service
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod converter;
pub mod detect;
pub mod error;
pub mod flatten;
pub mod http;
pub mod output;
pub mod xml;

// Re-export main functions
pub use converter::{convert_document, convert_feed, Conversion};

// Re-export commonly used items
pub use detect::{detect_items, select_items};
pub use error::{ConvertError, Result};
pub use flatten::{flatten_record, FlatRow};
pub use output::{header_set, save_csv, write_csv};
