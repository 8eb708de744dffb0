//! Credit card entity.

use std::sync::LazyLock;

use crate::mapper::Entity;
use crate::schema::{define, Schema};

/// A payment card as sent to and returned by the gateway.
///
/// Responses usually carry a masked number (`XXXX1111`) and no security code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreditCard {
    pub card_num: Option<String>,
    /// Expiration as `MMYY` or `YYYY-MM`.
    pub expiration: Option<String>,
    pub security_code: Option<String>,
    pub card_type: Option<String>,
}

static SCHEMA: LazyLock<Schema<CreditCard>> = LazyLock::new(|| {
    define(
        Schema::<CreditCard>::builder()
            .scalar("card_num", |c| c.card_num.as_deref(), |c, v| c.card_num = Some(v))
            .wire_key("cardNumber")
            .scalar("expiration", |c| c.expiration.as_deref(), |c, v| c.expiration = Some(v))
            .wire_key("expirationDate")
            .scalar(
                "security_code",
                |c| c.security_code.as_deref(),
                |c, v| c.security_code = Some(v),
            )
            .wire_key("cardCode")
            .scalar("card_type", |c| c.card_type.as_deref(), |c, v| c.card_type = Some(v))
            .wire_key("cardType"),
    )
});

impl Entity for CreditCard {
    const NAME: &'static str = "CreditCard";

    fn schema() -> &'static Schema<Self> {
        &SCHEMA
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::Structure;
    use pretty_assertions::assert_eq;
    use roxmltree::Document;

    #[test]
    fn test_parse_masked_card_from_transaction_details() {
        let xml = r#"<payment><creditCard><cardNumber>XXXX1111</cardNumber><expirationDate>XXXX</expirationDate><cardType>Visa</cardType></creditCard></payment>"#;
        let doc = Document::parse(xml).unwrap();
        let card = CreditCard::parse(&doc).unwrap();

        assert_eq!(card.card_num.as_deref(), Some("XXXX1111"));
        assert_eq!(card.expiration.as_deref(), Some("XXXX"));
        assert_eq!(card.card_type.as_deref(), Some("Visa"));
        assert_eq!(card.security_code, None);
    }

    #[test]
    fn test_wire_form_uses_wire_keys() {
        let card = CreditCard {
            card_num: Some("4012888888881881".to_string()),
            expiration: Some("0922".to_string()),
            security_code: Some("605".to_string()),
            card_type: None,
        };

        let wire = card.to_wire_form(false);
        assert_eq!(
            wire.keys().collect::<Vec<_>>(),
            vec!["cardNumber", "expirationDate", "cardCode"]
        );
        assert_eq!(wire.get("cardCode"), Some(&Structure::from("605")));
    }
}
