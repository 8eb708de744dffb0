//! Tests of the anet-wire binary.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn anet_wire() -> Command {
    Command::cargo_bin("anet-wire").unwrap()
}

#[test]
fn test_parse_transaction_yaml() {
    anet_wire()
        .args(["parse", "transaction"])
        .arg(fixture("transaction_details.xml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("id: '2162566217'"))
        .stdout(predicate::str::contains("merchant_id: ABC00001"));
}

#[test]
fn test_parse_wire_json() {
    anet_wire()
        .args(["parse", "credit-card", "--wire", "--format", "json"])
        .arg(fixture("transaction_details.xml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"cardNumber\": \"XXXX1111\""))
        .stdout(predicate::str::contains("cardCode").not());
}

#[test]
fn test_parse_unknown_entity_fails() {
    anet_wire()
        .args(["parse", "invoice"])
        .arg(fixture("transaction_details.xml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown entity 'invoice'"));
}

#[test]
fn test_parse_malformed_xml_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.xml");
    fs::write(&path, "<transaction><transId>1</transaction>").unwrap();

    anet_wire()
        .args(["parse", "transaction"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("XML parsing failed"));
}

#[test]
fn test_render_with_tag() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("body.yaml");
    fs::write(&path, "Life: 42\nPeople: [x, y]\nTree:\n  Species: Oak\n").unwrap();

    anet_wire()
        .arg("render")
        .arg(&path)
        .args(["--tag", "XML"])
        .assert()
        .success()
        .stdout(
            "<XML><Life>42</Life><People>x</People><People>y</People><Tree><Species>Oak</Species></Tree></XML>\n",
        );
}

#[test]
fn test_classify() {
    anet_wire()
        .args(["classify", "6", "The credit card number is invalid."])
        .assert()
        .success()
        .stdout(predicate::str::contains("invalid_card_number"))
        .stdout(predicate::str::contains("card_number"));
}

#[test]
fn test_check_ok_response() {
    anet_wire()
        .arg("check")
        .arg(fixture("customer_profile.xml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("OK"));
}

#[test]
fn test_check_error_response_exits_nonzero() {
    anet_wire()
        .arg("check")
        .arg(fixture("declined.xml"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("The credit card number is invalid."))
        .stdout(predicate::str::contains("expired_credit_card"));
}
