//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

fn schoolctl() -> Command {
    let mut cmd = Command::cargo_bin("schoolctl").unwrap();
    cmd.env("SCHOOLCTL_CONFIG", "/nonexistent/schoolctl/config.toml")
        .env_remove("SCHOOLCTL_ENDPOINT")
        .env_remove("DATABASE_URL");
    cmd
}

// === Help Tests ===

#[test]
fn test_list_help() {
    let mut cmd = schoolctl();
    cmd.arg("list").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Case-insensitive match"));
}

#[test]
fn test_add_help() {
    let mut cmd = schoolctl();
    cmd.arg("add").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("10-digit contact number"))
        .stdout(predicate::str::contains("--email"));
}

#[test]
fn test_states_help() {
    let mut cmd = schoolctl();
    cmd.arg("states").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("JSON array"));
}

#[test]
fn test_serve_help() {
    let mut cmd = schoolctl();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--upload-dir"));
}

// === Add Command Tests ===

#[test]
fn test_add_rejects_invalid_form_locally() {
    let mut cmd = schoolctl();
    cmd.args([
        "--endpoint",
        "http://127.0.0.1:1",
        "add",
        "--name",
        "X",
        "--address",
        "short",
        "--city",
        "Pune",
        "--state",
        "Maharashtra",
        "--contact",
        "12345",
        "--email",
        "not-an-email",
    ]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains(
            "Contact number must be exactly 10 digits",
        ))
        .stderr(predicate::str::contains("Please enter a valid email"))
        .stderr(predicate::str::contains("failed validation"))
        .stderr(predicate::str::contains("Failed to connect").not());
}

#[test]
fn test_list_reports_unreachable_api() {
    let mut cmd = schoolctl();
    cmd.args(["--endpoint", "http://127.0.0.1:1", "list"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to connect to school API"));
}

// === Completions ===

#[test]
fn test_completions_bash() {
    let mut cmd = schoolctl();
    cmd.arg("completions").arg("bash");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("schoolctl"));
}
