//! Configuration constants and validation functions for the gateway wire
//! format.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{Result, WireError};

/// Production API endpoint.
pub const URI: &str = "https://api.authorize.net/xml/v1/request.api";

/// Sandbox API endpoint.
pub const TEST_URI: &str = "https://apitest.authorize.net/xml/v1/request.api";

/// Namespace of every request and response element.
pub const XML_SCHEMA: &str = "AnetApi/xml/v1/schema/AnetApiSchema.xsd";

/// Declaration prepended to every request body.
pub const XML_HEADER: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

/// `resultCode` of a successful response.
pub const RESULT_OK: &str = "Ok";

/// `resultCode` of a failed response.
pub const RESULT_ERROR: &str = "Error";

/// Environment variable selecting the sandbox endpoint.
pub const ENV_SANDBOX: &str = "ANET_SANDBOX";

/// Environment variable enabling request bodies in logs.
pub const ENV_LOG_FULL_REQUEST: &str = "ANET_LOG_FULL_REQUEST";

/// Request type pattern: a root element name ending in `Request`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static REQUEST_TYPE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9]*Request$").expect("valid regex"));

/// Validate a request type (the envelope's root element).
///
/// # Arguments
/// * `request_type` - For example `createTransactionRequest`
///
/// # Returns
/// * `Ok(())` if valid
/// * `Err(WireError::InvalidRequest)` if invalid
///
/// # Examples
/// ```
/// use anet_wire::config::validate_request_type;
///
/// assert!(validate_request_type("getCustomerProfileRequest").is_ok());
/// assert!(validate_request_type("getCustomerProfile").is_err());
/// assert!(validate_request_type("").is_err());
/// ```
pub fn validate_request_type(request_type: &str) -> Result<()> {
    if REQUEST_TYPE_PATTERN.is_match(request_type) {
        Ok(())
    } else {
        Err(WireError::InvalidRequest(format!(
            "'{request_type}' is not a valid request type"
        )))
    }
}

/// Settings of a gateway client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Send requests to the sandbox instead of production.
    pub sandbox: bool,
    /// Include request bodies in request logs. Bodies contain card data.
    pub log_full_request: bool,
}

impl GatewayConfig {
    /// Production settings with request bodies kept out of logs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read settings from `ANET_SANDBOX` and `ANET_LOG_FULL_REQUEST`.
    ///
    /// `1`, `true` and `yes` (any case) enable a setting; anything else,
    /// including an unset variable, leaves it off.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let flag = |name: &str| lookup(name).is_some_and(|value| is_truthy(&value));
        Self {
            sandbox: flag(ENV_SANDBOX),
            log_full_request: flag(ENV_LOG_FULL_REQUEST),
        }
    }

    #[must_use]
    pub fn with_sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }

    #[must_use]
    pub fn with_log_full_request(mut self, log_full_request: bool) -> Self {
        self.log_full_request = log_full_request;
        self
    }

    /// Endpoint requests are posted to.
    #[must_use]
    pub fn endpoint(&self) -> &'static str {
        if self.sandbox {
            TEST_URI
        } else {
            URI
        }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}
