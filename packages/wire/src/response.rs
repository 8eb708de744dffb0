//! Parsing of gateway response envelopes.

use roxmltree::Document;
use serde::Serialize;

use crate::config::RESULT_OK;
use crate::error::Result;
use crate::mapper::{populate, Entity};
use crate::xml::WireTree;

/// One `(code, text)` entry from an `errors` or `messages` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GatewayMessage {
    pub code: Option<String>,
    pub text: Option<String>,
}

/// The parts of a gateway response common to every request type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GatewayResponse {
    /// Response body as received.
    #[serde(skip)]
    pub raw_xml: String,

    /// First `resultCode` in the document, `Ok` or `Error`.
    pub result: Option<String>,

    /// Entries under `errors`, `None` when the response has no such element.
    pub errors: Option<Vec<GatewayMessage>>,

    /// Entries under `messages`, `None` when the response has no such element.
    pub messages: Option<Vec<GatewayMessage>>,
}

impl GatewayResponse {
    /// Parse a response body.
    ///
    /// # Errors
    /// Returns `WireError::XmlParse` when the body is not well-formed XML.
    /// A well-formed body of any shape parses; missing parts are `None`.
    ///
    /// # Examples
    /// ```
    /// use anet_wire::response::GatewayResponse;
    ///
    /// let xml = "<r><messages><resultCode>Ok</resultCode>\
    ///     <message><code>I00001</code><text>Successful.</text></message></messages></r>";
    /// let response = GatewayResponse::parse(xml).unwrap();
    /// assert!(response.is_ok());
    /// assert_eq!(response.messages.unwrap()[0].code.as_deref(), Some("I00001"));
    /// ```
    pub fn parse(xml: &str) -> Result<Self> {
        let doc = Document::parse(xml)?;
        let tree = WireTree::document(&doc);

        let response = Self {
            raw_xml: xml.to_string(),
            result: tree.first_match_text("resultCode"),
            errors: collect(tree, "errors", "error", "errorCode", "errorText"),
            messages: collect(tree, "messages", "message", "code", "text"),
        };

        tracing::debug!(
            result = ?response.result,
            errors = response.errors.as_ref().map_or(0, Vec::len),
            messages = response.messages.as_ref().map_or(0, Vec::len),
            "Parsed gateway response"
        );

        Ok(response)
    }

    /// Whether the gateway reported success without any errors.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.result.as_deref() == Some(RESULT_OK) && self.errors.is_none()
    }

    /// Parse the whole response body as an entity.
    ///
    /// # Errors
    /// Returns `WireError::XmlParse` when the raw body is not well-formed.
    pub fn entity<E: Entity>(&self) -> Result<E> {
        let doc = Document::parse(&self.raw_xml)?;
        Ok(populate(WireTree::document(&doc)))
    }
}

/// Collect the entries of the first `container`, or `None` without one.
fn collect(
    tree: WireTree<'_, '_>,
    container: &str,
    entry: &str,
    code: &str,
    text: &str,
) -> Option<Vec<GatewayMessage>> {
    let container = tree.first_match(container)?;
    Some(
        container
            .all_matches(entry)
            .into_iter()
            .map(|item| GatewayMessage {
                code: item.first_match_text(code),
                text: item.first_match_text(text),
            })
            .collect(),
    )
}
