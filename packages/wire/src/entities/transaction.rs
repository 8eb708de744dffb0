//! Transaction entity.

use std::sync::LazyLock;

use super::{Address, CreditCard, CustomerProfile};
use crate::mapper::Entity;
use crate::schema::{define, Schema};
use crate::xml::WireTree;

/// Selector for the merchant customer id inside a transaction's `customer`.
const CUSTOMER_ID_SELECTOR: &str = "customer id";

/// A gateway transaction, as returned by charge and detail requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transaction {
    pub id: Option<String>,
    pub timestamp_local: Option<String>,
    pub timestamp_utc: Option<String>,
    /// Canonical name `type`, for example `authCaptureTransaction`.
    pub transaction_type: Option<String>,
    pub status: Option<String>,
    /// Masked account number, e.g. `XXXX1111`.
    pub account_num: Option<String>,
    pub account_type: Option<String>,
    pub auth_code: Option<String>,
    pub credit_card: Option<CreditCard>,
    pub customer_profile: Option<CustomerProfile>,
    pub billing_address: Option<Address>,
}

static SCHEMA: LazyLock<Schema<Transaction>> = LazyLock::new(|| {
    define(
        Schema::<Transaction>::builder()
            .scalar("id", |t| t.id.as_deref(), |t, v| t.id = Some(v))
            .wire_key("transId")
            .scalar(
                "timestamp_local",
                |t| t.timestamp_local.as_deref(),
                |t, v| t.timestamp_local = Some(v),
            )
            .wire_key("submitTimeLocal")
            .scalar(
                "timestamp_utc",
                |t| t.timestamp_utc.as_deref(),
                |t, v| t.timestamp_utc = Some(v),
            )
            .wire_key("submitTimeUTC")
            .scalar(
                "type",
                |t| t.transaction_type.as_deref(),
                |t, v| t.transaction_type = Some(v),
            )
            .wire_key("transactionType")
            .scalar("status", |t| t.status.as_deref(), |t, v| t.status = Some(v))
            .wire_key("transactionStatus")
            .scalar("account_num", |t| t.account_num.as_deref(), |t, v| t.account_num = Some(v))
            .wire_key("accountNumber")
            .scalar("account_type", |t| t.account_type.as_deref(), |t, v| t.account_type = Some(v))
            .wire_key("accountType")
            .scalar("auth_code", |t| t.auth_code.as_deref(), |t, v| t.auth_code = Some(v))
            .wire_key("authCode")
            .nested::<CreditCard>(
                "credit_card",
                |t| t.credit_card.as_ref(),
                |t, v| t.credit_card = Some(v),
            )
            .wire_key("creditCard")
            .nested::<CustomerProfile>(
                "customer_profile",
                |t| t.customer_profile.as_ref(),
                |t, v| t.customer_profile = Some(v),
            )
            .wire_key("customer")
            .nested::<Address>(
                "billing_address",
                |t| t.billing_address.as_ref(),
                |t, v| t.billing_address = Some(v),
            )
            .wire_key("billTo"),
    )
});

impl Entity for Transaction {
    const NAME: &'static str = "Transaction";

    fn schema() -> &'static Schema<Self> {
        &SCHEMA
    }

    /// Transaction responses carry the merchant customer id as
    /// `customer/id`, which no customer profile descriptor covers.
    fn after_parse(&mut self, tree: WireTree<'_, '_>) {
        if let Some(merchant_id) = tree.first_match_text(CUSTOMER_ID_SELECTOR) {
            self.customer_profile
                .get_or_insert_with(CustomerProfile::default)
                .merchant_id = Some(merchant_id);
        }
    }
}
