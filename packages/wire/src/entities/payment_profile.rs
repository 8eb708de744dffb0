//! Customer payment profile entity.

use std::sync::LazyLock;

use super::{Address, CreditCard};
use crate::mapper::{project, Entity, Form};
use crate::schema::{define, Schema};
use crate::structure::{Fields, Structure};

/// A stored payment method belonging to a customer profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentProfile {
    pub id: Option<String>,
    pub credit_card: Option<CreditCard>,
    pub billing_address: Option<Address>,
}

static SCHEMA: LazyLock<Schema<PaymentProfile>> = LazyLock::new(|| {
    define(
        Schema::<PaymentProfile>::builder()
            .scalar("id", |p| p.id.as_deref(), |p, v| p.id = Some(v))
            .wire_key("customerPaymentProfileId")
            .nested::<CreditCard>(
                "credit_card",
                |p| p.credit_card.as_ref(),
                |p, v| p.credit_card = Some(v),
            )
            .wire_key("creditCard")
            .nested::<Address>(
                "billing_address",
                |p| p.billing_address.as_ref(),
                |p, v| p.billing_address = Some(v),
            )
            .wire_key("billTo"),
    )
});

impl Entity for PaymentProfile {
    const NAME: &'static str = "PaymentProfile";

    fn schema() -> &'static Schema<Self> {
        &SCHEMA
    }

    /// A payment profile sends its card as `payment/creditCard`, not as a
    /// direct `creditCard` child.
    fn to_wire_form(&self, include_absent: bool) -> Fields {
        let mut fields = project(self, Form::Wire { include_absent });

        fields.remove("creditCard");
        if let Some(card) = &self.credit_card {
            let payment = Structure::map([("creditCard", card.to_wire_form(false))]);
            fields.insert("payment", payment);
        }

        fields
    }
}
