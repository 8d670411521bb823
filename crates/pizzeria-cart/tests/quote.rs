use std::io::Write;
use std::process::Command;

use serde_json::Value;
use tempfile::NamedTempFile;

const CATALOG: &str = "tests/fixtures/catalog.json";

fn run(catalog: &str, order: &str, extra: &[&str]) -> (String, String, bool) {
    let output = Command::new(env!("CARGO_BIN_EXE_quote"))
        .args(["--catalog", catalog, "--order", order])
        .args(extra)
        .env("RUST_LOG", "warn")
        .env_remove("PIZZERIA_STRICT_SIZES")
        .output()
        .expect("failed to run binary");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

fn order_file(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

#[test]
fn prices_upgrades_and_adds() {
    let (stdout, stderr, success) = run(CATALOG, "tests/fixtures/order.json", &[]);

    assert!(success);
    assert!(stderr.is_empty(), "unexpected stderr: {stderr}");

    let quote: Value = serde_json::from_str(&stdout).unwrap();
    let supreme = &quote["lines"][0];
    assert_eq!(supreme["customization"]["toppingCharge"], "5.25");
    assert_eq!(supreme["customization"]["replacementsUsed"], 2);
    assert_eq!(supreme["quantity"], 2);

    let margherita = &quote["lines"][1];
    assert_eq!(margherita["customization"]["toppingCharge"], "1.25");
    assert_eq!(margherita["customization"]["modifications"][1]["type"], "remove");

    assert_eq!(quote["totals"]["lineCount"], 2);
    assert_eq!(quote["totals"]["toppingCharges"], "11.75");
    assert_eq!(quote["totals"]["subtotal"], "60.72");
    assert_eq!(quote["totals"]["hasRejections"], false);
    assert_eq!(quote["displaySubtotal"], "$60.72");
}

#[test]
fn rejected_changes_warn_but_do_not_block() {
    let (stdout, stderr, success) = run(CATALOG, "tests/fixtures/order_rejected.json", &[]);

    assert!(success);
    assert!(stderr.contains("Topping change not applied"));

    let quote: Value = serde_json::from_str(&stdout).unwrap();
    let customization = &quote["lines"][0]["customization"];
    assert_eq!(customization["toppingCharge"], "1.50");
    assert_eq!(customization["rejected"][0]["index"], 0);
    assert_eq!(customization["modifications"][0]["half"], "left");
    assert_eq!(quote["totals"]["subtotal"], "16.99");
    assert_eq!(quote["totals"]["hasRejections"], true);
}

#[test]
fn unknown_topping_fails() {
    let order = order_file(
        r#"{"lines": [{"menuItemId": "m", "name": "M", "size": "12\"", "basePrice": "9.99",
            "modifications": [{"type": "add", "toppingId": "anchovies"}]}]}"#,
    );
    let (stdout, stderr, success) = run(CATALOG, order.path().to_str().unwrap(), &[]);

    assert!(!success);
    assert!(stdout.is_empty());
    assert!(stderr.contains("anchovies"));
}

#[test]
fn price_above_ceiling_fails() {
    let order = order_file(
        r#"{"lines": [{"menuItemId": "m", "name": "M", "size": "12\"",
            "basePrice": "90000000000000000", "quantity": 2}]}"#,
    );
    let (stdout, stderr, success) = run(CATALOG, order.path().to_str().unwrap(), &[]);

    assert!(!success);
    assert!(stdout.is_empty());
    assert!(stderr.contains("base price must be between $0.00 and $10000.00"));
}

#[test]
fn malformed_order_fails() {
    let order = order_file("{ \"lines\": [");
    let (_, stderr, success) = run(CATALOG, order.path().to_str().unwrap(), &[]);

    assert!(!success);
    assert!(stderr.contains("Invalid JSON") || stderr.contains("Quote failed"));
}

#[test]
fn strict_sizes_flag_rejects_unknown_labels() {
    let order = order_file(
        r#"{"lines": [{"menuItemId": "m", "name": "M", "size": "Party Size", "basePrice": "24.99"}]}"#,
    );
    let path = order.path().to_str().unwrap();

    let (stdout, stderr, success) = run(CATALOG, path, &[]);
    assert!(success);
    assert!(stderr.contains("matched no tier"));
    let quote: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(quote["totals"]["subtotal"], "24.99");

    let (_, _, success) = run(CATALOG, path, &["--strict-sizes"]);
    assert!(!success);
}

#[test]
fn missing_arguments_exit_with_usage_error() {
    let output = Command::new(env!("CARGO_BIN_EXE_quote"))
        .args(["--catalog", CATALOG])
        .output()
        .expect("failed to run binary");

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("--order"));
}
