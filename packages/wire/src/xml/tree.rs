//! Queryable view over a parsed XML document.
//!
//! A [`WireTree`] is the read interface the mapper consumes: first-match
//! text lookup and all-matches lookup for a descendant selector. Selectors
//! are whitespace-separated tag names with descendant semantics, so
//! `"customer id"` matches any `<id>` nested (at any depth) inside a
//! `<customer>`. Matching never includes the scope element itself.

use roxmltree::{Document, Node};

use super::utils::{has_tag, inner_text};

/// A document root or element that can be queried with selectors.
#[derive(Debug, Clone, Copy)]
pub struct WireTree<'a, 'input> {
    node: Node<'a, 'input>,
}

impl<'a, 'input> WireTree<'a, 'input> {
    /// Wrap a whole parsed document.
    #[must_use]
    pub fn document(doc: &'a Document<'input>) -> Self {
        Self { node: doc.root() }
    }

    /// Wrap a node if it can act as a query scope (document root or element).
    #[must_use]
    pub fn from_node(node: Node<'a, 'input>) -> Option<Self> {
        (node.is_root() || node.is_element()).then_some(Self { node })
    }

    /// The underlying `roxmltree` node.
    #[must_use]
    pub fn node(&self) -> Node<'a, 'input> {
        self.node
    }

    /// Tag name of the scope element, `None` for a document root.
    #[must_use]
    pub fn tag_name(&self) -> Option<&'a str> {
        self.node.is_element().then(|| self.node.tag_name().name())
    }

    /// Text of this element and all of its descendants.
    #[must_use]
    pub fn inner_text(&self) -> String {
        inner_text(self.node)
    }

    /// Trimmed inner text of the first descendant matching `selector`.
    ///
    /// # Examples
    /// ```
    /// use roxmltree::Document;
    /// use anet_wire::xml::WireTree;
    ///
    /// let doc = Document::parse("<r><customer><id> 7 </id></customer></r>").unwrap();
    /// let tree = WireTree::document(&doc);
    /// assert_eq!(tree.first_match_text("customer id"), Some("7".to_string()));
    /// assert_eq!(tree.first_match_text("profile id"), None);
    /// ```
    #[must_use]
    pub fn first_match_text(&self, selector: &str) -> Option<String> {
        self.first_match(selector)
            .map(|tree| tree.inner_text().trim().to_string())
    }

    /// First descendant matching `selector`, in document order.
    #[must_use]
    pub fn first_match(&self, selector: &str) -> Option<WireTree<'a, 'input>> {
        let steps = parse_selector(selector);
        let first = self.matches(&steps).next();
        first
    }

    /// Every descendant matching `selector`, in document order.
    #[must_use]
    pub fn all_matches(&self, selector: &str) -> Vec<WireTree<'a, 'input>> {
        let steps = parse_selector(selector);
        let all: Vec<_> = self.matches(&steps).collect();
        all
    }

    fn matches<'s>(
        &self,
        steps: &'s [&'s str],
    ) -> impl Iterator<Item = WireTree<'a, 'input>> + 's
    where
        'a: 's,
        'input: 's,
    {
        let scope = self.node;
        let last = steps.last().copied();
        let ancestors = steps.len().saturating_sub(1);

        scope
            .descendants()
            .skip(1)
            .filter(move |node| last.is_some_and(|tag| has_tag(*node, tag)))
            .filter(move |node| ancestors_match(*node, &steps[..ancestors], scope))
            .map(|node| WireTree { node })
    }
}

/// Split a selector into its descendant steps.
fn parse_selector(selector: &str) -> Vec<&str> {
    selector.split_whitespace().collect()
}

/// Check that `steps` appear, outermost first, among the ancestors of `node`
/// strictly below `scope`.
///
/// Matching right to left against the nearest ancestors is sufficient because
/// every combinator is a descendant combinator.
fn ancestors_match(node: Node<'_, '_>, steps: &[&str], scope: Node<'_, '_>) -> bool {
    let mut remaining = steps.iter().rev().peekable();

    for ancestor in node.ancestors().skip(1) {
        if ancestor.id() == scope.id() {
            break;
        }
        match remaining.peek() {
            None => break,
            Some(step) if has_tag(ancestor, step) => {
                remaining.next();
            }
            Some(_) => {}
        }
    }

    remaining.peek().is_none()
}

/// Conversion into a queryable wire tree.
///
/// This is how the mapper tolerates inputs of the wrong shape: anything that
/// is not a document or element converts to `None`, and parsing it yields
/// no entity instead of an error.
pub trait IntoWireTree<'a, 'input: 'a> {
    /// Convert into a wire tree, or `None` if the value is not queryable.
    fn into_wire_tree(self) -> Option<WireTree<'a, 'input>>;
}

impl<'a, 'input: 'a> IntoWireTree<'a, 'input> for WireTree<'a, 'input> {
    fn into_wire_tree(self) -> Option<WireTree<'a, 'input>> {
        Some(self)
    }
}

impl<'a, 'input: 'a> IntoWireTree<'a, 'input> for &'a Document<'input> {
    fn into_wire_tree(self) -> Option<WireTree<'a, 'input>> {
        Some(WireTree::document(self))
    }
}

impl<'a, 'input: 'a> IntoWireTree<'a, 'input> for Node<'a, 'input> {
    fn into_wire_tree(self) -> Option<WireTree<'a, 'input>> {
        WireTree::from_node(self)
    }
}

impl<'a, 'input: 'a, T> IntoWireTree<'a, 'input> for Option<T>
where
    T: IntoWireTree<'a, 'input>,
{
    fn into_wire_tree(self) -> Option<WireTree<'a, 'input>> {
        self.and_then(IntoWireTree::into_wire_tree)
    }
}

impl<'a, 'input: 'a> IntoWireTree<'a, 'input> for &str {
    fn into_wire_tree(self) -> Option<WireTree<'a, 'input>> {
        None
    }
}

impl<'a, 'input: 'a> IntoWireTree<'a, 'input> for i64 {
    fn into_wire_tree(self) -> Option<WireTree<'a, 'input>> {
        None
    }
}

/// Trimmed text of the first match of `selector`, or `None` when the input
/// is not queryable or nothing matches.
pub fn first_match_text<'a, 'input: 'a>(
    tree: impl IntoWireTree<'a, 'input>,
    selector: &str,
) -> Option<String> {
    tree.into_wire_tree()?.first_match_text(selector)
}

/// All matches of `selector`, empty when the input is not queryable.
pub fn all_matches<'a, 'input: 'a>(
    tree: impl IntoWireTree<'a, 'input>,
    selector: &str,
) -> Vec<WireTree<'a, 'input>> {
    tree.into_wire_tree()
        .map(|tree| tree.all_matches(selector))
        .unwrap_or_default()
}
