//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

fn opsdash() -> Command {
    let mut cmd = Command::cargo_bin("opsdash").unwrap();
    // Keep the developer's real config out of the tests
    cmd.env("OPSDASH_CONFIG", "/nonexistent/opsdash/config.toml");
    cmd
}

#[test]
fn test_top_level_help() {
    opsdash()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("metrics"))
        .stdout(predicate::str::contains("alerts"));
}

#[test]
fn test_serve_help() {
    opsdash()
        .arg("serve")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--ephemeral"))
        .stdout(predicate::str::contains("--database-url"));
}

#[test]
fn test_metrics_add_help() {
    opsdash()
        .args(["metrics", "add", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Reading value"));
}

#[test]
fn test_alerts_add_help() {
    opsdash()
        .args(["alerts", "add", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Comparison operator"));
}

#[test]
fn test_metrics_add_requires_value() {
    opsdash()
        .args(["metrics", "add", "cpu"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("<VALUE>"));
}

#[test]
fn test_config_path_honors_env() {
    opsdash()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/nonexistent/opsdash/config.toml"));
}

#[test]
fn test_config_show_without_file() {
    opsdash()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("using defaults"));
}

#[test]
fn test_unreachable_endpoint_fails_cleanly() {
    opsdash()
        .args(["--endpoint", "http://127.0.0.1:9", "alerts", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to reach"));
}
