//! Item detection: infer which repeated element represents one record.
//!
//! Feeds arrive with unknown schemas, so the converter cannot be told which
//! element is "the product". Instead it looks for the parent with the most
//! direct children sharing one tag and treats those children as the records.

use roxmltree::{Document, Node};

use crate::xml::{element_children, tag_name};

/// Result of automatic item detection.
#[derive(Debug)]
pub struct Detection<'a, 'input> {
    /// Matched record elements, in document order.
    pub items: Vec<Node<'a, 'input>>,
    /// Tag shared by the items (the root's own tag when falling back).
    pub tag: String,
}

/// Items chosen for conversion, after applying any forced tag.
#[derive(Debug)]
pub struct Selection<'a, 'input> {
    /// Record elements to flatten, in document order.
    pub items: Vec<Node<'a, 'input>>,
    /// Tag the items were selected by.
    pub tag: String,
    /// Non-fatal conditions encountered while selecting.
    pub warnings: Vec<String>,
}

/// Detect the repeated element that best represents one record.
///
/// Walks every element in pre-order (root included) and counts, among its
/// direct children only, how many share each tag. The single globally best
/// `(parent, tag)` pair wins; ties keep the first one found in document
/// order, so repeated runs are deterministic. A winner needs a genuine
/// repeat: when no tag occurs twice under one parent, the root's direct
/// children are returned instead, with the root's own tag for reporting.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use xml2csv::detect::detect_items;
///
/// let xml = "<catalog><product/><product/><meta/></catalog>";
/// let doc = Document::parse(xml).unwrap();
/// let detection = detect_items(&doc);
/// assert_eq!(detection.tag, "product");
/// assert_eq!(detection.items.len(), 2);
/// ```
pub fn detect_items<'a, 'input>(doc: &'a Document<'input>) -> Detection<'a, 'input> {
    let mut best_count = 0usize;
    let mut best: Option<(Node<'a, 'input>, &'a str)> = None;

    for parent in doc.descendants().filter(Node::is_element) {
        // Count direct children per tag, preserving first-seen tag order so
        // within-parent ties stay deterministic.
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for child in element_children(parent) {
            let tag = tag_name(child);
            match counts.iter_mut().find(|(seen, _)| *seen == tag) {
                Some((_, count)) => *count += 1,
                None => counts.push((tag, 1)),
            }
        }

        for (tag, count) in counts {
            // Strictly greater: earlier candidates win ties.
            if count > best_count {
                best_count = count;
                best = Some((parent, tag));
            }
        }
    }

    match best {
        Some((parent, tag)) if best_count >= 2 => Detection {
            items: element_children(parent)
                .filter(|child| tag_name(*child) == tag)
                .collect(),
            tag: tag.to_string(),
        },
        // A single occurrence is not a repeat: treat the root's direct
        // children as the records.
        _ => {
            let root = doc.root_element();
            Detection {
                items: element_children(root).collect(),
                tag: tag_name(root).to_string(),
            }
        }
    }
}

/// Find all elements matching a tag, anywhere in the tree, in document order.
///
/// Used by the manual override path: unlike [`detect_items`] the matches do
/// not have to share a parent.
pub fn find_by_tag<'a, 'input>(doc: &'a Document<'input>, tag: &str) -> Vec<Node<'a, 'input>> {
    doc.descendants()
        .filter(|node| node.is_element() && tag_name(*node) == tag)
        .collect()
}

/// Select the record elements for a document.
///
/// With a forced tag, returns every element matching it; when nothing
/// matches, falls back to automatic detection and records a warning
/// (non-fatal). Without a forced tag, runs automatic detection directly.
pub fn select_items<'a, 'input>(
    doc: &'a Document<'input>,
    forced_tag: Option<&str>,
) -> Selection<'a, 'input> {
    if let Some(tag) = forced_tag {
        let items = find_by_tag(doc, tag);
        if !items.is_empty() {
            return Selection {
                items,
                tag: tag.to_string(),
                warnings: Vec::new(),
            };
        }

        tracing::warn!(tag, "forced item tag matched nothing, detecting automatically");
        let detection = detect_items(doc);
        let warning = format!(
            "Forced item tag '{tag}' matched no elements; detected <{}> instead",
            detection.tag
        );
        return Selection {
            items: detection.items,
            tag: detection.tag,
            warnings: vec![warning],
        };
    }

    let detection = detect_items(doc);
    Selection {
        items: detection.items,
        tag: detection.tag,
        warnings: Vec::new(),
    }
}
