//! Billing address entity.

use std::sync::LazyLock;

use crate::mapper::Entity;
use crate::schema::{define, Schema};

/// A billing address (`billTo` on the wire).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
    pub fax: Option<String>,
}

static SCHEMA: LazyLock<Schema<Address>> = LazyLock::new(|| {
    define(
        Schema::<Address>::builder()
            .scalar("first_name", |a| a.first_name.as_deref(), |a, v| a.first_name = Some(v))
            .wire_key("firstName")
            .scalar("last_name", |a| a.last_name.as_deref(), |a, v| a.last_name = Some(v))
            .wire_key("lastName")
            .scalar("company", |a| a.company.as_deref(), |a, v| a.company = Some(v))
            .scalar("address", |a| a.address.as_deref(), |a, v| a.address = Some(v))
            .scalar("city", |a| a.city.as_deref(), |a, v| a.city = Some(v))
            .scalar("state", |a| a.state.as_deref(), |a, v| a.state = Some(v))
            .scalar("zip", |a| a.zip.as_deref(), |a, v| a.zip = Some(v))
            .scalar("country", |a| a.country.as_deref(), |a, v| a.country = Some(v))
            .scalar("phone", |a| a.phone.as_deref(), |a, v| a.phone = Some(v))
            .scalar("fax", |a| a.fax.as_deref(), |a, v| a.fax = Some(v)),
    )
});

impl Entity for Address {
    const NAME: &'static str = "Address";

    fn schema() -> &'static Schema<Self> {
        &SCHEMA
    }
}
