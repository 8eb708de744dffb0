//! Customer profile entity.

use std::sync::LazyLock;

use super::PaymentProfile;
use crate::mapper::Entity;
use crate::schema::{define, Schema};

/// A customer profile stored on the gateway with its payment profiles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerProfile {
    pub id: Option<String>,
    /// Merchant-assigned customer identifier.
    pub merchant_id: Option<String>,
    pub email: Option<String>,
    pub description: Option<String>,
    pub payment_profiles: Option<Vec<PaymentProfile>>,
}

static SCHEMA: LazyLock<Schema<CustomerProfile>> = LazyLock::new(|| {
    define(
        Schema::<CustomerProfile>::builder()
            .scalar("id", |c| c.id.as_deref(), |c, v| c.id = Some(v))
            .wire_key("customerProfileId")
            .scalar("merchant_id", |c| c.merchant_id.as_deref(), |c, v| c.merchant_id = Some(v))
            .wire_key("merchantCustomerId")
            .scalar("email", |c| c.email.as_deref(), |c, v| c.email = Some(v))
            .scalar("description", |c| c.description.as_deref(), |c, v| c.description = Some(v))
            .nested_list::<PaymentProfile>(
                "payment_profiles",
                |c| c.payment_profiles.as_deref(),
                |c, v| c.payment_profiles = Some(v),
            )
            .wire_key("paymentProfiles"),
    )
});

impl Entity for CustomerProfile {
    const NAME: &'static str = "CustomerProfile";

    fn schema() -> &'static Schema<Self> {
        &SCHEMA
    }
}
