//! Integration tests: run the definition test vectors.
//!
//! Each fixture in tests/fixtures/ has:
//! - def.json: a union type definition (a `DefSpec`)
//! - expect.json: either the resolved raw table or a definition error class
//!
//! These tests load the fixtures, run the definition pass, and compare the
//! outcome — resolved tag→raw-value pairs for golden cases, the stable
//! error class for adversarial ones.

use serde_json::{Value, json};
use std::path::PathBuf;
use unionkit_core::DefSpec;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn run_fixture(name: &str) {
    let dir = fixtures_dir().join(name);

    let def_path = dir.join("def.json");
    let expect_path = dir.join("expect.json");

    let def_str = std::fs::read_to_string(&def_path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", def_path.display()));
    let expect_str = std::fs::read_to_string(&expect_path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", expect_path.display()));

    let spec: DefSpec = serde_json::from_str(&def_str)
        .unwrap_or_else(|e| panic!("failed to parse {}: {e}", def_path.display()));
    let expected: Value = serde_json::from_str(&expect_str)
        .unwrap_or_else(|e| panic!("failed to parse {}: {e}", expect_path.display()));

    let outcome = match spec.define() {
        Ok(ty) => {
            let table: Vec<Value> = ty
                .raw_pairs()
                .map(|(tag, raw)| json!([tag, raw]))
                .collect();
            json!({ "ok": { "raw_table": table } })
        }
        Err(err) => json!({ "error": err.class() }),
    };

    assert_eq!(
        outcome,
        expected,
        "\n\nFixture: {name}\n\nGot:\n{}\n\nExpected:\n{}\n",
        serde_json::to_string_pretty(&outcome).unwrap(),
        serde_json::to_string_pretty(&expected).unwrap(),
    );
}

#[test]
fn golden_int_sequencing_with_resets() {
    run_fixture("golden_int_sequencing_with_resets");
}

#[test]
fn golden_text_defaults() {
    run_fixture("golden_text_defaults");
}

#[test]
fn golden_float_sequencing() {
    run_fixture("golden_float_sequencing");
}

#[test]
fn adversarial_duplicate_variant() {
    run_fixture("adversarial_duplicate_variant");
}

#[test]
fn adversarial_duplicate_raw_value() {
    run_fixture("adversarial_duplicate_raw_value");
}

#[test]
fn adversarial_mixed_backing() {
    run_fixture("adversarial_mixed_backing");
}

#[test]
fn adversarial_kind_mismatch() {
    run_fixture("adversarial_kind_mismatch");
}

#[test]
fn adversarial_empty() {
    run_fixture("adversarial_empty");
}

#[test]
fn adversarial_overflow() {
    run_fixture("adversarial_overflow");
}

#[test]
fn adversarial_duplicate_field() {
    run_fixture("adversarial_duplicate_field");
}
