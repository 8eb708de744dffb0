//! Domain entities of the gateway API and their schemas.

mod address;
mod credit_card;
mod customer_profile;
mod payment_profile;
mod transaction;

use std::str::FromStr;

use roxmltree::Document;

pub use address::Address;
pub use credit_card::CreditCard;
pub use customer_profile::CustomerProfile;
pub use payment_profile::PaymentProfile;
pub use transaction::Transaction;

use crate::error::WireError;
use crate::mapper::{Entity, Form};
use crate::structure::Fields;

/// Entity types selectable by name, for tooling that works on any of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    CreditCard,
    Address,
    PaymentProfile,
    CustomerProfile,
    Transaction,
}

impl EntityKind {
    /// All kinds, in dependency order.
    pub const ALL: [EntityKind; 5] = [
        Self::CreditCard,
        Self::Address,
        Self::PaymentProfile,
        Self::CustomerProfile,
        Self::Transaction,
    ];

    /// Kebab-case name used on the command line.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreditCard => "credit-card",
            Self::Address => "address",
            Self::PaymentProfile => "payment-profile",
            Self::CustomerProfile => "customer-profile",
            Self::Transaction => "transaction",
        }
    }

    /// Parse `doc` as this kind and project the result.
    ///
    /// Returns `None` only if the document cannot be parsed as an entity,
    /// which does not happen for a well-formed document.
    #[must_use]
    pub fn parse_and_project(&self, doc: &Document<'_>, form: Form) -> Option<Fields> {
        match self {
            Self::CreditCard => parse_and_project::<CreditCard>(doc, form),
            Self::Address => parse_and_project::<Address>(doc, form),
            Self::PaymentProfile => parse_and_project::<PaymentProfile>(doc, form),
            Self::CustomerProfile => parse_and_project::<CustomerProfile>(doc, form),
            Self::Transaction => parse_and_project::<Transaction>(doc, form),
        }
    }
}

fn parse_and_project<E: Entity>(doc: &Document<'_>, form: Form) -> Option<Fields> {
    let entity = E::parse(doc)?;
    Some(match form {
        Form::Wire { include_absent } => entity.to_wire_form(include_absent),
        Form::Canonical => entity.to_canonical_form(),
    })
}

impl FromStr for EntityKind {
    type Err = WireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| WireError::UnknownEntity(s.to_string()))
    }
}
