use tree_sitter::Node;

use crate::treesitter::node_text;

/// Named children of `node`, collected so callers can index and reverse.
pub(crate) fn named_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

/// The `type_annotation` of a parameter, via the `type` field or, for named
/// tuple members, the first annotation child.
pub(crate) fn type_annotation_of<'t>(node: Node<'t>) -> Option<Node<'t>> {
    node.child_by_field_name("type").or_else(|| {
        named_children(node)
            .into_iter()
            .find(|c| c.kind() == "type_annotation")
    })
}

/// Object key for a property name node. Computed keys are skipped.
pub(crate) fn property_key(name: Node<'_>, source: &[u8]) -> Option<String> {
    let text = node_text(name, source);
    match name.kind() {
        "property_identifier" | "private_property_identifier" | "number" => {
            Some(text.to_string())
        }
        "string" => unquote(text),
        _ => None,
    }
}

/// Strip matching quotes from a string literal without escapes.
pub(crate) fn unquote(raw: &str) -> Option<String> {
    let bytes = raw.as_bytes();
    if bytes.len() < 2 {
        return None;
    }
    let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
    if first != last || !matches!(first, b'"' | b'\'') {
        return None;
    }
    let inner = &raw[1..raw.len() - 1];
    if inner.contains('\\') {
        return None;
    }
    Some(inner.to_string())
}
