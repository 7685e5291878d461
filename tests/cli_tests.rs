//! CLI integration tests
//!
//! These tests verify the CLI commands work correctly by running the binary.

#![cfg(feature = "cli")]

use std::process::Command;

use ionschema::documents::read_value;

fn ionschema_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_ionschema"))
}

// ============================================================================
// Check Command Tests
// ============================================================================

#[test]
fn test_cli_check_valid_values() {
    let output = ionschema_bin()
        .args(["check", "--constraint", "required::ordered::[a, b]", "a::b::1", "x::a::y::b::2"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "check should succeed");
    assert_eq!(stdout.lines().filter(|line| line.starts_with("✓ ")).count(), 2);
}

#[test]
fn test_cli_check_invalid_value_exits_with_failure() {
    let output = ionschema_bin()
        .args(["check", "--constraint", "[required::a, b]", "b::1"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.lines().any(|line| line.starts_with("✗ ")));
    assert!(stdout.contains("missing_annotation: missing annotation(s): a"));
}

#[test]
fn test_cli_check_json_output() {
    let output = ionschema_bin()
        .args(["check", "--json", "--constraint", "required::ordered::[a, b]", "b::a::1"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("should be valid JSON");

    assert_eq!(json[0]["valid"], false);
    assert_eq!(json[0]["violations"][0]["code"], "annotations_mismatch");
    let constraint = json[0]["violations"][0]["constraint"].as_str().expect("constraint as text");
    assert_eq!(
        read_value(constraint).unwrap(),
        read_value("required::ordered::[a, b]").unwrap()
    );
    assert_eq!(read_value(json[0]["value"].as_str().unwrap()).unwrap(), read_value("b::a::1").unwrap());
}

#[test]
fn test_cli_check_values_from_file() {
    let path = std::env::temp_dir().join(format!("ionschema-cli-{}.ion", std::process::id()));
    std::fs::write(&path, "a::2020-01-01T a::{{aGVsbG8=}} 1.5").unwrap();

    let output = ionschema_bin()
        .args(["check", "--constraint", "required::[a]", "--file"])
        .arg(&path)
        .output()
        .expect("Failed to execute command");
    std::fs::remove_file(&path).ok();

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout.lines().filter(|line| line.starts_with("✓ ")).count(), 2);
    assert_eq!(stdout.lines().filter(|line| line.starts_with("✗ ")).count(), 1);
}

#[test]
fn test_cli_check_invalid_schema() {
    let output = ionschema_bin()
        .args(["check", "--constraint", "[a, 5]", "a::1"])
        .output()
        .expect("Failed to execute command");

    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr.contains("invalid schema"));
}

// ============================================================================
// Inspect Command Tests
// ============================================================================

#[test]
fn test_cli_inspect_ordered() {
    let output = ionschema_bin()
        .args(["inspect", "--constraint", "required::ordered::[a, optional::b]"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "inspect should succeed");
    assert!(stdout.contains("Strategy: ordered"));
    assert!(stdout.contains("a (required)"));
    assert!(stdout.contains("b (optional)"));
    assert!(stdout.contains("s1 --ε--> s2"));
}

#[test]
fn test_cli_inspect_json_output() {
    let output = ionschema_bin()
        .args(["inspect", "--json", "--constraint", "[a]"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("should be valid JSON");

    assert_eq!(json["strategy"], "unordered");
    assert_eq!(json["annotations"][0]["text"], "a");
    assert_eq!(json["annotations"][0]["required"], false);
    assert!(json.get("automaton").is_none());
}
