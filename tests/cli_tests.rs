use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn invoice_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("invoice-layout"))
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Config dir holding the fixture config.toml
fn fixture_config(temp_dir: &TempDir) -> PathBuf {
    let config_path = temp_dir.path().join("invoice-config");
    fs::create_dir_all(&config_path).unwrap();
    fs::copy(fixture("config.toml"), config_path.join("config.toml")).unwrap();
    config_path
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_help() {
    invoice_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Render order invoices"));
}

#[test]
fn test_version() {
    invoice_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("invoice-layout"));
}

#[test]
fn test_init_creates_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("invoice-config");

    invoice_cmd()
        .args(["-C", path_str(&config_path), "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized invoice-layout config"));

    assert!(config_path.join("config.toml").exists());
    assert!(config_path.join("order.toml").exists());
    assert!(config_path.join("customer.toml").exists());
    assert!(config_path.join("output").is_dir());
}

#[test]
fn test_init_fails_if_exists() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("invoice-config");

    invoice_cmd()
        .args(["-C", path_str(&config_path), "init"])
        .assert()
        .success();

    invoice_cmd()
        .args(["-C", path_str(&config_path), "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_status_without_init() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("nonexistent");

    invoice_cmd()
        .args(["-C", path_str(&config_path), "status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_status() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = fixture_config(&temp_dir);

    invoice_cmd()
        .args(["-C", path_str(&config_path), "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Invoice Layout Status"))
        .stdout(predicate::str::contains("VENTURE FUTURE"))
        .stdout(predicate::str::contains("₹ INR"));
}

#[test]
fn test_preview_sample_order() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = fixture_config(&temp_dir);

    invoice_cmd()
        .args([
            "-C",
            path_str(&config_path),
            "preview",
            "--order",
            path_str(&fixture("order.json")),
            "--customer",
            path_str(&fixture("customer.json")),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("VENTURE FUTURE"))
        .stdout(predicate::str::contains("BILLED TO:"))
        .stdout(predicate::str::contains("TOTAL EXCL. GST"))
        .stdout(predicate::str::contains("₹3000.00"))
        .stdout(predicate::str::contains("Amount Due (INR): ₹0.00"));
}

#[test]
fn test_layout_outputs_json() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = fixture_config(&temp_dir);

    let output = invoice_cmd()
        .args([
            "-C",
            path_str(&config_path),
            "layout",
            "--order",
            path_str(&fixture("order.json")),
            "--customer",
            path_str(&fixture("customer.json")),
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let layout: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows: Vec<_> = layout
        .as_array()
        .unwrap()
        .iter()
        .filter(|i| i["kind"] == "table_row")
        .collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(
        rows[1]["cells"],
        serde_json::json!([
            "Unisex Face Beauty Cream(35g)",
            "₹1000.00",
            "₹0.00",
            "₹3000.00",
            "₹180.00"
        ])
    );
    assert_eq!(rows[0]["widths"], serde_json::json!([60.0, 40.0, 40.0, 50.0, 40.0]));
}

#[test]
fn test_generate_text_to_default_path() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = fixture_config(&temp_dir);

    invoice_cmd()
        .args([
            "-C",
            path_str(&config_path),
            "generate",
            "--order",
            path_str(&fixture("order_multi.toml")),
            "--customer",
            path_str(&fixture("customer.json")),
            "--format",
            "text",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated invoice ORD-2026-0042"))
        .stdout(predicate::str::contains("Total:    ₹40.97"))
        .stdout(predicate::str::contains("Status:   shipped"));

    let written = config_path.join("output/INVOICE-ORD-2026-0042.txt");
    let content = fs::read_to_string(written).unwrap();
    assert!(content.contains("Sunscreen SPF 50"));
    assert!(content.contains("₹15.00"));
}

#[test]
fn test_generate_text_to_custom_path() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = fixture_config(&temp_dir);
    let output = temp_dir.path().join("out/invoice.txt");

    invoice_cmd()
        .args([
            "-C",
            path_str(&config_path),
            "generate",
            "--order",
            path_str(&fixture("order.json")),
            "--customer",
            path_str(&fixture("customer.json")),
            "--format",
            "text",
            "-o",
            path_str(&output),
        ])
        .assert()
        .success();

    assert!(output.exists());
}

#[test]
fn test_generate_missing_items() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = fixture_config(&temp_dir);

    invoice_cmd()
        .args([
            "-C",
            path_str(&config_path),
            "generate",
            "--order",
            path_str(&fixture("order_missing_items.json")),
            "--customer",
            path_str(&fixture("customer.json")),
            "--format",
            "text",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Order has no items list"));

    assert!(!config_path.join("output").exists());
}

#[test]
fn test_generate_missing_order_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = fixture_config(&temp_dir);

    invoice_cmd()
        .args([
            "-C",
            path_str(&config_path),
            "preview",
            "--order",
            "nonexistent.json",
            "--customer",
            path_str(&fixture("customer.json")),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nonexistent.json"));
}

#[test]
fn test_malformed_order_json() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = fixture_config(&temp_dir);
    let bad = temp_dir.path().join("bad.json");
    fs::write(&bad, r#"{"items": [{"name": "x", "salePrice": 1}"#).unwrap();

    invoice_cmd()
        .args([
            "-C",
            path_str(&config_path),
            "layout",
            "--order",
            path_str(&bad),
            "--customer",
            path_str(&fixture("customer.json")),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse"));
}

#[test]
fn test_bad_item_values_are_validation_errors() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = fixture_config(&temp_dir);
    let order = |items: &str| {
        format!(
            r#"{{
                "id": "ORD-BAD",
                "customerPhone": "9591958760",
                "shippingAddress": "Puttur",
                "createdAt": "2025-01-01T00:00:00Z",
                "items": [{items}]
            }}"#
        )
    };

    let cases = [
        (
            r#"{"name": "Soap", "salePrice": "abc", "quantity": 1}"#,
            "Field 'items[1].salePrice' has malformed value \"abc\"",
        ),
        (
            r#"{"name": "Soap", "salePrice": "1.234", "quantity": 1}"#,
            "Field 'items[1].salePrice' has malformed value \"1.234\"",
        ),
        (
            r#"{"name": "Soap", "salePrice": 5, "quantity": -1}"#,
            "Item 1 has invalid quantity -1",
        ),
    ];

    for (i, (items, message)) in cases.iter().enumerate() {
        let path = temp_dir.path().join(format!("bad-{i}.json"));
        fs::write(&path, order(items)).unwrap();

        invoice_cmd()
            .args([
                "-C",
                path_str(&config_path),
                "generate",
                "--order",
                path_str(&path),
                "--customer",
                path_str(&fixture("customer.json")),
                "--format",
                "text",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid invoice data"))
            .stderr(predicate::str::contains(*message));
    }

    assert!(!config_path.join("output").exists());
}

#[test]
fn test_init_templates_preview() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("invoice-config");

    invoice_cmd()
        .args(["-C", path_str(&config_path), "init"])
        .assert()
        .success();

    invoice_cmd()
        .args([
            "-C",
            path_str(&config_path),
            "preview",
            "--order",
            path_str(&config_path.join("order.toml")),
            "--customer",
            path_str(&config_path.join("customer.toml")),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Your Company Name"))
        .stdout(predicate::str::contains("Technical Consulting"))
        .stdout(predicate::str::contains("$300.00"))
        .stdout(predicate::str::contains("Amount Due (USD): $330.00"));
}
