//! XML utility functions for navigating and extracting data from DOM trees.

use roxmltree::Node;

/// Get the tag name without namespace prefix.
///
/// Gateway responses declare a default namespace on the root element, so
/// every lookup compares local names only.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use anet_wire::xml::get_tag_name;
///
/// let xml = r#"<getCustomerProfileResponse xmlns="AnetApi/xml/v1/schema/AnetApiSchema.xsd"/>"#;
/// let doc = Document::parse(xml).unwrap();
/// assert_eq!(get_tag_name(doc.root_element()), "getCustomerProfileResponse");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Check if a node is an element with a specific tag name.
pub fn has_tag(node: Node<'_, '_>, tag: &str) -> bool {
    node.is_element() && get_tag_name(node) == tag
}

/// Get the concatenated text of a node and all of its descendants.
///
/// Unlike `Node::text`, this includes text nested inside child elements,
/// which is what a scalar field holding markup-free text needs.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use anet_wire::xml::inner_text;
///
/// let doc = Document::parse("<a>one<b>two</b>three</a>").unwrap();
/// assert_eq!(inner_text(doc.root_element()), "onetwothree");
/// ```
pub fn inner_text(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}
