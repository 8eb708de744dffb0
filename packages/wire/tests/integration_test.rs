//! End-to-end tests of the mapper on gateway response fixtures.

use std::fs;
use std::path::Path;

use anet_wire::classify::{ErrorCategory, ErrorField};
use anet_wire::entities::{Address, CreditCard, CustomerProfile, PaymentProfile, Transaction};
use anet_wire::error_handler::check;
use anet_wire::request::Request;
use anet_wire::response::GatewayResponse;
use anet_wire::{render, Entity, Structure};
use pretty_assertions::assert_eq;
use roxmltree::Document;

/// Load fixture file content.
fn load_fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e))
}

#[test]
fn test_transaction_details_fixture() {
    let xml = load_fixture("transaction_details.xml");
    let doc = Document::parse(&xml).unwrap();
    let transaction = Transaction::parse(&doc).unwrap();

    assert_eq!(transaction.id.as_deref(), Some("2162566217"));
    assert_eq!(transaction.auth_code.as_deref(), Some("JPG9DJ"));
    assert_eq!(transaction.status.as_deref(), Some("settledSuccessfully"));
    assert_eq!(transaction.account_num, None);

    assert_eq!(
        transaction.credit_card,
        Some(CreditCard {
            card_num: Some("XXXX1111".to_string()),
            expiration: Some("XXXX".to_string()),
            security_code: None,
            card_type: Some("Visa".to_string()),
        })
    );

    let customer = transaction.customer_profile.as_ref().unwrap();
    assert_eq!(customer.merchant_id.as_deref(), Some("ABC00001"));
    assert_eq!(customer.email.as_deref(), Some("mark@example.com"));
    assert_eq!(customer.payment_profiles, Some(Vec::new()));

    let billing = transaction.billing_address.as_ref().unwrap();
    assert_eq!(billing.first_name.as_deref(), Some("John"));
    assert_eq!(billing.company.as_deref(), Some(""));
    assert_eq!(billing.address.as_deref(), Some("123 Main St."));
    assert_eq!(billing.phone, None);
}

#[test]
fn test_customer_profile_fixture() {
    let xml = load_fixture("customer_profile.xml");
    let doc = Document::parse(&xml).unwrap();
    let profile = CustomerProfile::parse(&doc).unwrap();

    assert_eq!(profile.id.as_deref(), Some("10000"));
    assert_eq!(profile.merchant_id.as_deref(), Some("custId123"));
    assert_eq!(profile.description.as_deref(), Some("some description"));

    let payment_profiles = profile.payment_profiles.as_ref().unwrap();
    assert_eq!(payment_profiles.len(), 2);
    assert_eq!(
        payment_profiles[0],
        PaymentProfile {
            id: Some("20000".to_string()),
            credit_card: Some(CreditCard {
                card_num: Some("XXXX1111".to_string()),
                expiration: Some("XXXX".to_string()),
                ..Default::default()
            }),
            billing_address: Some(Address {
                first_name: Some("John".to_string()),
                last_name: Some("Doe".to_string()),
                city: Some("Bellevue".to_string()),
                zip: Some("98004".to_string()),
                ..Default::default()
            }),
        }
    );
    assert_eq!(payment_profiles[1].billing_address, None);
}

#[test]
fn test_customer_profile_request_round_trip() {
    let xml = load_fixture("customer_profile.xml");
    let doc = Document::parse(&xml).unwrap();
    let profile = CustomerProfile::parse(&doc).unwrap();

    let body = Structure::map([("profile", profile.to_wire_form(false))]);
    let request_xml = Request::new("createCustomerProfileRequest", body)
        .to_xml()
        .unwrap();

    let request_doc = Document::parse(&request_xml).unwrap();
    assert_eq!(CustomerProfile::parse(&request_doc).unwrap(), profile);
}

#[test]
fn test_canonical_form_of_fixture_serializes() {
    let xml = load_fixture("transaction_details.xml");
    let doc = Document::parse(&xml).unwrap();
    let canonical = Transaction::parse(&doc).unwrap().to_canonical_form();

    let yaml = serde_yaml_ng::to_string(&canonical).unwrap();
    assert!(yaml.starts_with("id: '2162566217'\n"));
    assert!(yaml.contains("merchant_id: ABC00001"));
    assert!(yaml.contains("account_num: null"));
}

#[test]
fn test_declined_fixture() {
    let response = GatewayResponse::parse(&load_fixture("declined.xml")).unwrap();
    let fault = check(&response).unwrap_err();

    assert_eq!(fault.message, "The credit card number is invalid.");
    assert_eq!(fault.errors.len(), 2);
    assert_eq!(fault.errors[0].category, Some(ErrorCategory::InvalidCardNumber));
    assert_eq!(fault.errors[0].field, Some(ErrorField::CardNumber));
    assert_eq!(fault.errors[1].category, Some(ErrorCategory::ExpiredCreditCard));
    assert_eq!(fault.errors[1].field, Some(ErrorField::CardExpiration));
}

#[test]
fn test_schema_error_fixture() {
    let response = GatewayResponse::parse(&load_fixture("schema_error.xml")).unwrap();
    assert_eq!(response.errors, None);

    let fault = check(&response).unwrap_err();
    assert_eq!(fault.errors.len(), 1);
    assert_eq!(fault.errors[0].category, Some(ErrorCategory::InvalidField));
    assert_eq!(fault.errors[0].field, Some(ErrorField::CardSecurityCode));
}

#[test]
fn test_yaml_fixture_renders_repeated_siblings() {
    let value: serde_yaml_ng::Value =
        serde_yaml_ng::from_str(&load_fixture("charge_request.yaml")).unwrap();
    let xml = render(&Structure::from(value), None);

    assert!(xml.starts_with(
        "<merchantAuthentication><name>login-id</name><transactionKey>transaction-key</transactionKey></merchantAuthentication>"
    ));
    assert!(xml.contains("<amount>10.5</amount>"));
    assert!(xml.contains(
        "<lineItems><lineItem><itemId>1</itemId><name>vase</name></lineItem>\
         <lineItem><itemId>2</itemId><name>pot</name></lineItem></lineItems>"
    ));
    assert!(!xml.contains("customerIP"));
}
