//! Integration tests for the `agenda` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the run, summary
//! and check-config subcommands through the actual binary, including
//! stdin/stdout piping, file I/O, overrides and error handling.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

/// Helper: path to the request.json fixture.
fn request_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/request.json")
}

/// Helper: path to the config.json fixture.
fn config_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/config.json")
}

/// Helper: read the request.json fixture as a string.
fn request_json() -> String {
    std::fs::read_to_string(request_path()).expect("request.json fixture must exist")
}

/// Helper: run `agenda run` with extra args and parse stdout as JSON.
fn run_json(args: &[&str]) -> Value {
    let output = Command::cargo_bin("agenda")
        .unwrap()
        .arg("run")
        .args(args)
        .output()
        .expect("agenda run should execute");
    assert!(output.status.success(), "agenda run failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

fn suggested_task_ids(result: &Value) -> Vec<String> {
    result["suggestions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["taskId"].as_str().unwrap().to_string())
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Run subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn run_stdin_to_stdout() {
    Command::cargo_bin("agenda")
        .unwrap()
        .arg("run")
        .write_stdin(request_json())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"conflicts\""))
        .stdout(predicate::str::contains("\"suggestions\""));
}

#[test]
fn run_file_reports_items_in_start_order_and_one_conflict() {
    let result = run_json(&["-i", request_path()]);

    let ids: Vec<&str> = result["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["lunch", "swim", "dentist", "piano", "taxes", "plants"]);

    let conflicts = result["conflicts"].as_array().unwrap();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0]["firstId"], "swim");
    assert_eq!(conflicts[0]["secondId"], "dentist");
    assert_eq!(conflicts[0]["overlapMinutes"], 30);
}

#[test]
fn run_file_to_file() {
    let output_path = std::env::temp_dir().join("agenda-test-run-output.json");
    let _ = std::fs::remove_file(&output_path);

    Command::cargo_bin("agenda")
        .unwrap()
        .args(["run", "-i", request_path(), "-o"])
        .arg(&output_path)
        .arg("--pretty")
        .assert()
        .success();

    let content = std::fs::read_to_string(&output_path).expect("output file must exist");
    let value: Value = serde_json::from_str(&content).expect("output should be JSON");
    assert!(value["items"].is_array());
    assert!(content.contains('\n'), "pretty output spans lines");

    let _ = std::fs::remove_file(&output_path);
}

#[test]
fn daily_load_cap_flag_limits_must_tasks() {
    // "Pack lunch" is already scheduled today, so a cap of one leaves no room for taxes.
    let result = run_json(&["-i", request_path(), "--daily-load-cap", "1"]);

    let ids = suggested_task_ids(&result);
    assert!(!ids.is_empty());
    assert!(ids.iter().all(|id| id == "plants"));
}

#[test]
fn config_file_overrides_suggestion_count() {
    let result = run_json(&["-i", request_path(), "--config", config_path()]);

    assert_eq!(suggested_task_ids(&result), vec!["taxes", "plants"]);
}

#[test]
fn invalid_request_fails() {
    Command::cargo_bin("agenda")
        .unwrap()
        .arg("run")
        .write_stdin("this is not valid json {{{")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse request"));
}

#[test]
fn unknown_time_zone_fails() {
    let request = request_json().replace("Europe/Berlin", "Europe/Atlantis");

    Command::cargo_bin("agenda")
        .unwrap()
        .arg("run")
        .write_stdin(request)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid timezone: Europe/Atlantis"));
}

#[test]
fn missing_input_file_fails() {
    Command::cargo_bin("agenda")
        .unwrap()
        .args(["run", "-i", "/nonexistent/request.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Summary subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn summary_renders_local_times() {
    // Europe/Berlin is UTC+1 in mid-March.
    Command::cargo_bin("agenda")
        .unwrap()
        .args(["summary", "-i", request_path()])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Agenda\n"))
        .stdout(predicate::str::contains("  09:00-10:00  Swim practice\n"))
        .stdout(predicate::str::contains("  --:--        File taxes\n"))
        .stdout(predicate::str::contains("  Swim practice <> Dentist (30 min)\n"))
        .stdout(predicate::str::contains("Suggestions\n"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Check-config subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn check_config_prints_effective_config() {
    Command::cargo_bin("agenda")
        .unwrap()
        .args(["check-config", "-i", config_path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"suggestionsPerTask\": 1"))
        .stdout(predicate::str::contains("\"dayStartHour\": 7"));
}

#[test]
fn check_config_rejects_inverted_window() {
    Command::cargo_bin("agenda")
        .unwrap()
        .arg("check-config")
        .write_stdin(r#"{"dayStartHour": 21, "dayEndHour": 8}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Argument handling
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn missing_subcommand_shows_usage() {
    Command::cargo_bin("agenda")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
