//! Small helpers for navigating roxmltree DOM nodes.

use roxmltree::Node;

/// Get the tag name without namespace prefix.
pub fn tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Get all element children of a node, in source order.
///
/// Skips text nodes, comments, and processing instructions.
pub fn element_children<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|child| child.is_element())
}

/// Get the direct text content of a node, trimmed.
///
/// Returns the empty string when the node has no text.
pub fn trimmed_text<'a>(node: Node<'a, '_>) -> &'a str {
    node.text().map(str::trim).unwrap_or_default()
}
