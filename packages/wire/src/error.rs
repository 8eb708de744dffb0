//! Error types for the wire mapper.
//!
//! Uses the dual-error pattern: `WireError` for library consumers with
//! detailed error context, and specific error types (`SchemaError`,
//! `GatewayError`) for the places that raise them.

use serde::Serialize;
use thiserror::Error;

use crate::classify::ClassifiedError;

/// Generic message used when the gateway reports a failure without details.
pub const GENERIC_ERROR_MESSAGE: &str = "[AuthorizeNet] The Authorize.Net API returned an error";

/// Main error type for the wire mapper library.
#[derive(Debug, Error)]
pub enum WireError {
    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// An entity schema was declared incorrectly.
    #[error("Invalid entity schema: {0}")]
    Schema(#[from] SchemaError),

    /// The gateway answered with an error payload.
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// A request could not be built.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The transport failed to deliver a request.
    #[error("Transport failed: {0}")]
    Transport(String),

    /// Entity name not known to the mapper.
    #[error("Unknown entity '{0}'. Expected one of: credit-card, address, payment-profile, customer-profile, transaction")]
    UnknownEntity(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML (de)serialization error.
    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Definition-time faults in an entity schema.
///
/// These are programming errors: a schema that fails to build is never
/// usable, so the static schema accessors escalate them immediately.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Field name is empty.
    #[error("{entity}: field name must not be empty")]
    EmptyFieldName { entity: &'static str },

    /// Two descriptors share a field name.
    #[error("{entity}: duplicate field '{field}'")]
    DuplicateField {
        entity: &'static str,
        field: &'static str,
    },

    /// Two descriptors share a wire key.
    #[error("{entity}: wire key '{key}' used by both '{first}' and '{second}'")]
    DuplicateWireKey {
        entity: &'static str,
        key: &'static str,
        first: &'static str,
        second: &'static str,
    },

    /// Wire key cannot be used as an element name.
    #[error("{entity}: field '{field}' has invalid wire key '{key}'")]
    InvalidWireKey {
        entity: &'static str,
        field: &'static str,
        key: &'static str,
    },
}

/// A gateway-reported failure carrying every classified error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{message}")]
pub struct GatewayError {
    /// Message of the first error, or the generic message.
    pub message: String,

    /// All errors reported by the gateway, classified.
    pub errors: Vec<ClassifiedError>,
}

impl GatewayError {
    /// Create a gateway error with the generic message and no details.
    #[must_use]
    pub fn generic() -> Self {
        Self {
            message: GENERIC_ERROR_MESSAGE.to_string(),
            errors: Vec::new(),
        }
    }
}

/// Result type alias for wire mapper operations.
pub type Result<T> = std::result::Result<T, WireError>;
