//! Request envelopes and the gateway client loop.
//!
//! The library builds request bodies and interprets responses; moving bytes
//! is left to a [`Transport`] supplied by the caller.

use std::fmt;

use crate::config::{validate_request_type, GatewayConfig, URI, XML_HEADER, XML_SCHEMA};
use crate::error::{Result, WireError};
use crate::error_handler::check;
use crate::render::render;
use crate::response::GatewayResponse;
use crate::structure::Structure;

/// Card validation performed when a payment profile is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// Test charge of $0.01 on the card, voided immediately.
    Live,
    /// Checksum-style checks on the card number only.
    Test,
    /// No validation.
    None,
}

impl ValidationMode {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "liveMode",
            Self::Test => "testMode",
            Self::None => "None",
        }
    }
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ValidationMode> for Structure {
    fn from(mode: ValidationMode) -> Self {
        Structure::from(mode.as_str())
    }
}

/// A typed request: root element name plus body structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    request_type: String,
    body: Structure,
    uri: String,
}

impl Request {
    /// Create a request for the production endpoint.
    pub fn new(request_type: impl Into<String>, body: impl Into<Structure>) -> Self {
        Self {
            request_type: request_type.into(),
            body: body.into(),
            uri: URI.to_string(),
        }
    }

    /// Send to `uri` instead of the production endpoint.
    #[must_use]
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = uri.into();
        self
    }

    /// Add a `validationMode` element when a mode is given.
    #[must_use]
    pub fn with_validation_mode(mut self, mode: Option<ValidationMode>) -> Self {
        if let (Some(mode), Some(fields)) = (mode, self.body.as_map_mut()) {
            fields.insert("validationMode", mode);
        }
        self
    }

    #[must_use]
    pub fn request_type(&self) -> &str {
        &self.request_type
    }

    #[must_use]
    pub fn body(&self) -> &Structure {
        &self.body
    }

    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Build the full XML document for this request.
    ///
    /// # Errors
    /// Returns `WireError::InvalidRequest` if the request type is not a valid
    /// `...Request` element name or the body is not a map.
    ///
    /// # Examples
    /// ```
    /// use anet_wire::request::Request;
    /// use anet_wire::structure::Structure;
    ///
    /// let request = Request::new("getTransactionDetailsRequest", Structure::map([("transId", "42")]));
    /// assert_eq!(
    ///     request.to_xml().unwrap(),
    ///     "<?xml version=\"1.0\" encoding=\"utf-8\"?>\
    ///      <getTransactionDetailsRequest xmlns=\"AnetApi/xml/v1/schema/AnetApiSchema.xsd\">\
    ///      <transId>42</transId></getTransactionDetailsRequest>"
    /// );
    /// ```
    pub fn to_xml(&self) -> Result<String> {
        validate_request_type(&self.request_type)?;
        if self.body.as_map().is_none() {
            return Err(WireError::InvalidRequest(format!(
                "{} body must be a map",
                self.request_type
            )));
        }

        let kind = &self.request_type;
        Ok(format!(
            "{XML_HEADER}<{kind} xmlns=\"{XML_SCHEMA}\">{}</{kind}>",
            render(&self.body, None)
        ))
    }

    /// One-line description for logs. The body is only included when asked
    /// for, since it carries card data. A body that cannot be built is
    /// replaced by the build error.
    #[must_use]
    pub fn to_log(&self, include_body: bool) -> String {
        let mut log = format!(
            "[AuthorizeNet] HTTP Request type={} uri={}",
            self.request_type, self.uri
        );
        if include_body {
            match self.to_xml() {
                Ok(body) => log.push_str(&format!(" body=\"{body}\"")),
                Err(err) => log.push_str(&format!(" body_error=\"{err}\"")),
            }
        }
        log
    }
}

/// Delivers a request body to the gateway and returns the response body.
pub trait Transport {
    /// POST `body` (a complete XML document) to `uri`.
    ///
    /// # Errors
    /// Implementations report delivery failures as `WireError::Transport`.
    fn post(&self, uri: &str, body: &str) -> Result<String>;
}

/// Sends requests through a [`Transport`] and screens the responses.
#[derive(Debug)]
pub struct Gateway<T> {
    transport: T,
    config: GatewayConfig,
}

impl<T: Transport> Gateway<T> {
    pub fn new(transport: T, config: GatewayConfig) -> Self {
        Self { transport, config }
    }

    #[must_use]
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Send a request to the configured endpoint.
    ///
    /// # Errors
    /// * `WireError::InvalidRequest` if the request cannot be built
    /// * `WireError::Transport` if delivery fails
    /// * `WireError::XmlParse` if the response is not XML
    /// * `WireError::Gateway` if the gateway reports a failure
    pub fn send(&self, request_type: &str, body: impl Into<Structure>) -> Result<GatewayResponse> {
        let request = Request::new(request_type, body).with_uri(self.config.endpoint());
        let xml = request.to_xml()?;

        tracing::info!("{}", request.to_log(self.config.log_full_request));
        let raw = self.transport.post(request.uri(), &xml)?;
        tracing::info!(bytes = raw.len(), "[AuthorizeNet] HTTP Response received");

        let response = GatewayResponse::parse(&raw)?;
        if !response.is_ok() {
            log_error_response(&response);
        }

        check(&response)?;
        Ok(response)
    }
}

fn log_error_response(response: &GatewayResponse) {
    tracing::info!(result = ?response.result, "[AuthorizeNet] Responded with error result");

    for message in response.messages.iter().flatten() {
        tracing::info!(code = ?message.code, text = ?message.text, "[AuthorizeNet] Message");
    }
    for error in response.errors.iter().flatten() {
        tracing::error!(code = ?error.code, text = ?error.text, "[AuthorizeNet] Error");
    }
}
