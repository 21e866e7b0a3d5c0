//! Integration tests for the `tojson` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the convert and
//! policy subcommands through the actual binary, including stdin/stdout
//! piping, file I/O, environment settings and error handling.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: path to the sample.json fixture.
fn sample_json_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/sample.json")
}

fn tojson() -> Command {
    let mut cmd = Command::cargo_bin("tojson").unwrap();
    cmd.env_remove("TOJSON_TRACE")
        .env_remove("TOJSON_MAP_KEYS")
        .env_remove("RUST_LOG");
    cmd
}

// ─────────────────────────────────────────────────────────────────────────────
// Convert subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn convert_stdin_to_stdout() {
    tojson()
        .arg("convert")
        .write_stdin(r#"{"name":"Alice","age":30}"#)
        .assert()
        .success()
        .stdout("{\n  \"name\": \"Alice\",\n  \"age\": 30\n}\n");
}

#[test]
fn convert_file_to_stdout_keeps_key_order() {
    let output = tojson()
        .args(["convert", "-i", sample_json_path()])
        .output()
        .unwrap();
    assert!(output.status.success());

    let text = String::from_utf8(output.stdout).unwrap();
    let keys: Vec<usize> = ["\"name\"", "\"age\"", "\"scores\"", "\"address\"", "\"active\""]
        .iter()
        .map(|key| text.find(key).expect("key must be present"))
        .collect();
    assert!(keys.windows(2).all(|pair| pair[0] < pair[1]), "{text}");
    assert!(text.contains("\"scores\": [\n    98,\n    87.5,\n    null\n  ]"));
}

#[test]
fn convert_file_to_file() {
    let output_path = std::env::temp_dir().join("tojson-test-convert-output.json");
    let _ = std::fs::remove_file(&output_path);

    tojson()
        .args(["convert", "-i", sample_json_path(), "-o"])
        .arg(&output_path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let content = std::fs::read_to_string(&output_path).expect("output file must exist");
    let written: serde_json::Value = serde_json::from_str(&content).unwrap();
    let fixture: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(sample_json_path()).unwrap()).unwrap();
    assert_eq!(written, fixture);
    assert!(content.ends_with('\n'));

    let _ = std::fs::remove_file(&output_path);
}

#[test]
fn convert_with_envelope() {
    tojson()
        .args(["convert", "--envelope"])
        .write_stdin("[1,2]")
        .assert()
        .success()
        .stdout("{\n  \"result\": [\n    1,\n    2\n  ]\n}\n");
}

#[test]
fn convert_null_document() {
    tojson()
        .args(["convert", "--envelope"])
        .write_stdin("null")
        .assert()
        .success()
        .stdout("{\n  \"result\": null\n}\n");
}

#[test]
fn convert_has_no_strict_keys_flag() {
    // Parsed JSON only ever has string keys; strictness is a library setting.
    tojson()
        .args(["convert", "--strict-keys"])
        .write_stdin(r#"{"1":2}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--strict-keys"));
}

#[test]
fn convert_invalid_json_fails() {
    tojson()
        .arg("convert")
        .write_stdin("this is not valid json {{{")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input is not valid JSON"));
}

#[test]
fn convert_missing_input_file_fails() {
    tojson()
        .args(["convert", "-i", "/nonexistent/tojson-input.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Tracing and environment settings
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn trace_flag_logs_strategy_decisions() {
    tojson()
        .args(["--trace", "convert"])
        .write_stdin(r#"{"a":[1]}"#)
        .assert()
        .success()
        .stderr(predicate::str::contains("processing value"))
        .stdout(predicate::str::contains("\"a\""));
}

#[test]
fn trace_env_logs_strategy_decisions() {
    tojson()
        .env("TOJSON_TRACE", "1")
        .arg("convert")
        .write_stdin("true")
        .assert()
        .success()
        .stderr(predicate::str::contains("processing value"));
}

#[test]
fn no_trace_by_default() {
    tojson()
        .arg("convert")
        .write_stdin("true")
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn bad_map_keys_env_warns_and_continues() {
    tojson()
        .env("TOJSON_MAP_KEYS", "sometimes")
        .arg("convert")
        .write_stdin("{}")
        .assert()
        .success()
        .stdout("{}\n")
        .stderr(predicate::str::contains("unknown map key policy"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Policy subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn policy_snake_cases_untagged_fields() {
    tojson()
        .args(["policy", "UserID"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"user_id\""))
        .stdout(predicate::str::contains("\"omit_always\": false"))
        .stdout(predicate::str::contains("\"omit_if_empty\": false"));
}

#[test]
fn policy_with_tag() {
    tojson()
        .args(["policy", "CreatedAt", "--tag", "created,omitempty"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"created\""))
        .stdout(predicate::str::contains("\"omit_if_empty\": true"));
}

#[test]
fn policy_with_dash_tag() {
    tojson()
        .args(["policy", "Password", "--tag=-"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"omit_always\": true"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Usage
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn missing_subcommand_fails() {
    tojson().assert().failure();
}

#[test]
fn help_lists_subcommands() {
    tojson()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("convert"))
        .stdout(predicate::str::contains("policy"));
}
