//! Record flattening: reduce one element subtree to a flat key/value row.
//!
//! Keys are built from the tag path below the record root, attributes are
//! keyed as `tag@name`, and repeated keys collapse into a single cell so the
//! output stays one row per record.

use indexmap::IndexMap;
use roxmltree::Node;

use crate::config::{ATTRIBUTE_MARKER, KEY_SEPARATOR, VALUE_SEPARATOR};
use crate::xml::{element_children, tag_name, trimmed_text};

/// A single flattened record: composite key to merged text value, in
/// first-seen key order.
pub type FlatRow = IndexMap<String, String>;

/// Flatten a record element into a single flat row.
///
/// The record's own tag is excluded from descendant keys: it names the row,
/// not a column. It still keys the record's own attributes, and its text
/// when the record has no child elements at all.
///
/// Multiple occurrences of the same composite key (repeated sibling tags,
/// repeated attributes across the subtree) are merged: values collect in
/// first-seen order, exact duplicates are dropped, and the survivors are
/// joined with `" | "`.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use xml2csv::flatten::flatten_record;
///
/// let xml = "<offer><seller><name>Acme</name></seller></offer>";
/// let doc = Document::parse(xml).unwrap();
/// let row = flatten_record(doc.root_element());
/// assert_eq!(row.get("seller_name").map(String::as_str), Some("Acme"));
/// ```
pub fn flatten_record(record: Node<'_, '_>) -> FlatRow {
    let mut bucket: IndexMap<String, Vec<String>> = IndexMap::new();

    collect_attributes(record, "", &mut bucket);

    let children: Vec<_> = element_children(record).collect();
    if children.is_empty() {
        let text = trimmed_text(record);
        if !text.is_empty() {
            push_value(&mut bucket, tag_name(record).to_string(), text);
        }
    } else {
        // The record root's tag is dropped from the prefix here.
        for child in children {
            collect_fields(child, "", &mut bucket);
        }
    }

    bucket
        .into_iter()
        .map(|(key, values)| (key, merge_values(values)))
        .collect()
}

/// Recursively collect candidate fields below the record root.
///
/// `prefix` already ends with the separator when non-empty, so keys are
/// formed by plain concatenation.
fn collect_fields(node: Node<'_, '_>, prefix: &str, bucket: &mut IndexMap<String, Vec<String>>) {
    let tag = tag_name(node);

    collect_attributes(node, prefix, bucket);

    let children: Vec<_> = element_children(node).collect();
    if children.is_empty() {
        let text = trimmed_text(node);
        if !text.is_empty() {
            push_value(bucket, format!("{prefix}{tag}"), text);
        }
        return;
    }

    // Branch nodes contribute no text of their own; interstitial text is
    // discarded.
    let child_prefix = format!("{prefix}{tag}{KEY_SEPARATOR}");
    for child in children {
        collect_fields(child, &child_prefix, bucket);
    }
}

/// Collect attribute fields for one element.
///
/// Whitespace-only values are dropped entirely rather than emitted as empty
/// fields.
fn collect_attributes(node: Node<'_, '_>, prefix: &str, bucket: &mut IndexMap<String, Vec<String>>) {
    let tag = tag_name(node);
    for attribute in node.attributes() {
        let value = attribute.value().trim();
        if !value.is_empty() {
            let key = format!("{prefix}{tag}{ATTRIBUTE_MARKER}{}", attribute.name());
            push_value(bucket, key, value);
        }
    }
}

fn push_value(bucket: &mut IndexMap<String, Vec<String>>, key: String, value: &str) {
    bucket.entry(key).or_default().push(value.to_string());
}

/// Merge the collected values of one key: drop exact duplicates (keeping the
/// first occurrence) and join the rest.
fn merge_values(values: Vec<String>) -> String {
    let mut unique: Vec<String> = Vec::new();
    for value in values {
        if !unique.contains(&value) {
            unique.push(value);
        }
    }
    unique.join(VALUE_SEPARATOR)
}
