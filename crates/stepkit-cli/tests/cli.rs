//! End-to-end tests for the `stepkit` binary.
#![expect(clippy::expect_used, reason = "tests require descriptive panic messages")]

use std::io::Write;

use assert_cmd::Command;
use serde_json::{Value, json};
use tempfile::NamedTempFile;

fn stepkit() -> Command {
    let mut cmd = Command::cargo_bin("stepkit").expect("binary exists");
    cmd.env_remove("STEPKIT_LOG_LEVEL").env_remove("STEPKIT_PRETTY");
    cmd
}

fn json_output(cmd: &mut Command) -> Value {
    let output = cmd.output().expect("runs");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

fn json_file(value: &Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    serde_json::to_writer(&mut file, value).expect("write JSON");
    file.flush().expect("flush");
    file
}

#[test]
fn args_prints_argument_definitions() {
    let json = json_output(stepkit().args(["args", "^I am logged in as (manager|seller)$"]));
    assert_eq!(
        json,
        json!([{
            "name": "arg0",
            "type": "enum",
            "required": true,
            "enumValues": ["manager", "seller"],
        }])
    );
}

#[test]
fn best_reads_definitions_from_a_file() {
    let definitions = json_file(&json!([
        {"id": "free", "pattern": "I am logged in as {string}", "keyword": "Given"},
        {"id": "role", "pattern": "I am logged in as (manager|seller)", "keyword": "Given"},
    ]));
    let json = json_output(stepkit().args([
        "best",
        "I am logged in as seller",
        "--keyword",
        "and",
        "--definitions",
    ]).arg(definitions.path()));
    assert_eq!(json.get("definitionId"), Some(&json!("role")));
}

#[test]
fn best_all_lists_ranked_candidates() {
    let definitions = json_file(&json!([
        {"id": "free", "pattern": "I am logged in as {string}", "keyword": "Given"},
        {"id": "role", "pattern": "I am logged in as (manager|seller)", "keyword": "Given"},
    ]));
    let json = json_output(
        stepkit()
            .args(["best", "I am logged in as seller", "--all", "--definitions"])
            .arg(definitions.path()),
    );
    let ids: Vec<&Value> = json
        .as_array()
        .expect("ranked list")
        .iter()
        .filter_map(|candidate| candidate.pointer("/result/definitionId"))
        .collect();
    assert_eq!(ids, vec![&json!("role"), &json!("free")]);
}

#[test]
fn segments_merge_existing_metadata() {
    let existing = json_file(&json!([{"name": "who", "type": "word", "required": false}]));
    let json = json_output(
        stepkit()
            .args(["segments", "I greet {string}", "--existing"])
            .arg(existing.path()),
    );
    assert_eq!(
        json.pointer("/1/arg"),
        Some(&json!({"name": "who", "type": "string", "required": false}))
    );
}

#[test]
fn resolve_and_format_render_text() {
    let resolved = json_output(stepkit().args([
        "resolve",
        "I add {int} item(s) to (cart|list)",
        "--value",
        "2",
        "--value",
        "list",
    ]));
    assert_eq!(resolved, json!({"text": "I add 2 items to list"}));

    let formatted = json_output(stepkit().args(["format", "I add {int}"]));
    assert_eq!(formatted.get("plainText"), Some(&json!("I add [arg0]")));
}

#[test]
fn invalid_log_level_from_environment_fails() {
    let output = stepkit()
        .env("STEPKIT_LOG_LEVEL", "loud")
        .args(["regex", "x"])
        .output()
        .expect("runs");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown log level"));
}

#[test]
fn missing_definitions_file_is_reported() {
    let output = stepkit()
        .args(["best", "x", "--definitions", "/nonexistent/definitions.json"])
        .output()
        .expect("runs");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to read"));
}
