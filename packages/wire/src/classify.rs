//! Best-effort classification of gateway error payloads.
//!
//! The gateway reports failures as `(code, text)` pairs. Codes map to a
//! category through fixed tables; the offending field comes from the
//! category when it implies one, otherwise from the XSD element named in the
//! text. Nothing here fails: unknown inputs simply leave the category or
//! field unset.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Serialize, Serializer};

/// Category of a gateway error or message code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    TransactionDeclined,
    InvalidCardNumber,
    InvalidExpirationDate,
    ExpiredCreditCard,
    InvalidField,
    InvalidFieldLength,
    MissingRequiredField,
    DuplicateRecordExists,
    CustomerProfileInfoRequired,
}

impl ErrorCategory {
    /// Look up the category for a transaction error code or a message code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        let category = match code {
            // transaction response error codes
            "210" => Self::TransactionDeclined,
            "6" => Self::InvalidCardNumber,
            "7" => Self::InvalidExpirationDate,
            "8" => Self::ExpiredCreditCard,
            // API message codes
            "E00003" => Self::InvalidField,
            "E00015" => Self::InvalidFieldLength,
            "E00027" => Self::MissingRequiredField,
            "E00039" => Self::DuplicateRecordExists,
            "E00041" => Self::CustomerProfileInfoRequired,
            _ => return None,
        };
        Some(category)
    }

    /// The field a category always refers to, if any.
    #[must_use]
    pub fn implied_field(&self) -> Option<ErrorField> {
        match self {
            Self::InvalidCardNumber => Some(ErrorField::CardNumber),
            Self::InvalidExpirationDate | Self::ExpiredCreditCard => Some(ErrorField::CardExpiration),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TransactionDeclined => "transaction_declined",
            Self::InvalidCardNumber => "invalid_card_number",
            Self::InvalidExpirationDate => "invalid_expiration_date",
            Self::ExpiredCreditCard => "expired_credit_card",
            Self::InvalidField => "invalid_field",
            Self::InvalidFieldLength => "invalid_field_length",
            Self::MissingRequiredField => "missing_required_field",
            Self::DuplicateRecordExists => "duplicate_record_exists",
            Self::CustomerProfileInfoRequired => "customer_profile_info_required",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The request field an error points at.
///
/// Known card fields get their own variant; any other XSD element name found
/// in an error text is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorField {
    CardNumber,
    CardExpiration,
    CardSecurityCode,
    Other(String),
}

impl ErrorField {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::CardNumber => "card_number",
            Self::CardExpiration => "card_expiration",
            Self::CardSecurityCode => "card_security_code",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for ErrorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ErrorField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// XSD element names with a known field.
static ELEMENT_FIELDS: LazyLock<HashMap<&'static str, ErrorField>> = LazyLock::new(|| {
    HashMap::from([
        ("cardNumber", ErrorField::CardNumber),
        ("expirationDate", ErrorField::CardExpiration),
        ("cardCode", ErrorField::CardSecurityCode),
    ])
});

/// Patterns that extract an element name from a validation message, tried in
/// order.
#[allow(clippy::expect_used)] // Static regexes that are guaranteed to be valid
static ELEMENT_PATTERNS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r"'AnetApi/xml/v1/schema/AnetApiSchema\.xsd:([a-zA-Z]*)'").expect("valid regex"),
        Regex::new(
            r"The element '([a-zA-Z]*)' in namespace 'AnetApi/xml/v1/schema/AnetApiSchema.xsd'",
        )
        .expect("valid regex"),
    ]
});

/// A gateway error with its best-effort classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedError {
    pub code: Option<String>,
    pub text: Option<String>,
    pub category: Option<ErrorCategory>,
    pub field: Option<ErrorField>,
}

/// Classify a gateway `(code, text)` pair.
///
/// # Arguments
/// * `code` - Transaction error code (`"6"`) or message code (`"E00027"`)
/// * `text` - Human-readable error text from the gateway
///
/// # Returns
/// The inputs together with the resolved category and field, either of which
/// may be `None`.
///
/// # Examples
/// ```
/// use anet_wire::classify::{classify, ErrorCategory, ErrorField};
///
/// let error = classify(Some("6"), Some("The credit card number is invalid."));
/// assert_eq!(error.category, Some(ErrorCategory::InvalidCardNumber));
/// assert_eq!(error.field, Some(ErrorField::CardNumber));
/// ```
#[must_use]
pub fn classify(code: Option<&str>, text: Option<&str>) -> ClassifiedError {
    let category = code.and_then(ErrorCategory::from_code);
    let field = category
        .and_then(|c| c.implied_field())
        .or_else(|| text.and_then(field_from_text));

    tracing::debug!(?code, ?category, ?field, "Classified gateway error");

    ClassifiedError {
        code: code.map(str::to_string),
        text: text.map(str::to_string),
        category,
        field,
    }
}

/// Find the element named by the first matching pattern.
fn field_from_text(text: &str) -> Option<ErrorField> {
    let element = ELEMENT_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(text))?
        .get(1)?
        .as_str();

    Some(
        ELEMENT_FIELDS
            .get(element)
            .cloned()
            .unwrap_or_else(|| ErrorField::Other(element.to_string())),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CARD_CODE_TEXT: &str = "The 'AnetApi/xml/v1/schema/AnetApiSchema.xsd:cardCode' element is invalid - \
         The value XYZ is invalid according to its datatype 'String' - The actual length is less than the MinLength value.";

    #[test]
    fn test_code_with_implied_field() {
        let error = classify(Some("6"), Some("The credit card number is invalid."));
        assert_eq!(error.category, Some(ErrorCategory::InvalidCardNumber));
        assert_eq!(error.field, Some(ErrorField::CardNumber));
        assert_eq!(error.code.as_deref(), Some("6"));
        assert_eq!(error.text.as_deref(), Some("The credit card number is invalid."));
    }

    #[test]
    fn test_expiration_codes_share_field() {
        assert_eq!(classify(Some("7"), None).field, Some(ErrorField::CardExpiration));
        assert_eq!(classify(Some("8"), None).field, Some(ErrorField::CardExpiration));
        assert_eq!(
            classify(Some("8"), None).category,
            Some(ErrorCategory::ExpiredCreditCard)
        );
    }

    #[test]
    fn test_unknown_code_field_from_text() {
        let error = classify(Some("E99999"), Some(CARD_CODE_TEXT));
        assert_eq!(error.category, None);
        assert_eq!(error.field, Some(ErrorField::CardSecurityCode));
    }

    #[test]
    fn test_message_code_falls_back_to_text() {
        let text = "The element 'creditCard' in namespace 'AnetApi/xml/v1/schema/AnetApiSchema.xsd' has incomplete content.";
        let error = classify(Some("E00003"), Some(text));
        assert_eq!(error.category, Some(ErrorCategory::InvalidField));
        assert_eq!(error.field, Some(ErrorField::Other("creditCard".to_string())));
    }

    #[test]
    fn test_declined_has_no_field() {
        let error = classify(Some("210"), Some("This transaction has been declined."));
        assert_eq!(error.category, Some(ErrorCategory::TransactionDeclined));
        assert_eq!(error.field, None);
    }

    #[test]
    fn test_first_pattern_wins() {
        let text = "The element 'billTo' in namespace 'AnetApi/xml/v1/schema/AnetApiSchema.xsd' \
             near 'AnetApi/xml/v1/schema/AnetApiSchema.xsd:expirationDate'";
        assert_eq!(classify(None, Some(text)).field, Some(ErrorField::CardExpiration));
    }

    #[test]
    fn test_nothing_to_classify() {
        let error = classify(None, None);
        assert_eq!(
            error,
            ClassifiedError {
                code: None,
                text: None,
                category: None,
                field: None,
            }
        );
        assert_eq!(classify(Some("E00001"), Some("Plain failure.")).field, None);
    }

    #[test]
    fn test_serialize_uses_snake_case_names() {
        let error = classify(Some("7"), Some("bad date"));
        let json = serde_json::to_string(&error).unwrap();
        assert_eq!(
            json,
            r#"{"code":"7","text":"bad date","category":"invalid_expiration_date","field":"card_expiration"}"#
        );
    }
}
