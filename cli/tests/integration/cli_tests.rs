//! Integration tests for the CLI surface: help, version, status and pin.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

pub const PROJECT: &str = r"
applications:
  web:
    run:
      volumes:
        /srv/web: /data
environments:
  prod:
    nodes:
      n1:
        host: unix:///nonexistent/riot-test.sock
";

/// `riot` with colors off and every path pinned inside `dir`.
pub fn riot(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("riot"));
    cmd.env("NO_COLOR", "1")
        .env("RIOT_CONFIG", dir.join("config.yaml"))
        .env_remove("RIOT_LOCK")
        .env_remove("RIOT_LOG")
        .env("RIOT_PROJECT", dir.join("riot.yaml"));
    cmd
}

/// A temp project directory holding `PROJECT` as `riot.yaml`.
pub fn project_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("riot.yaml"), PROJECT).expect("write riot.yaml");
    dir
}

// --- Help and version tests ---

#[test]
fn test_cli_no_args_shows_help_and_exits_two() {
    let dir = project_dir();
    riot(dir.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Deploy built container images"));
}

#[test]
fn test_cli_help_lists_commands() {
    let dir = project_dir();
    riot(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("deploy"))
        .stdout(predicate::str::contains("status"))
        .stdout(predicate::str::contains("pin"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_deploy_help_shows_node_and_timeout() {
    let dir = project_dir();
    riot(dir.path())
        .args(["deploy", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--node"))
        .stdout(predicate::str::contains("--timeout"))
        .stdout(predicate::str::contains("--env"));
}

#[test]
fn test_version_command_shows_version() {
    let dir = project_dir();
    riot(dir.path())
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("riot 0.1.0"));
}

#[test]
fn test_version_command_json_outputs_valid_json() {
    let dir = project_dir();
    riot(dir.path())
        .args(["version", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""version": "0.1.0""#));
}

#[test]
fn test_no_color_accepts_any_conventional_value() {
    let dir = project_dir();
    for value in ["1", "yes", "", "0"] {
        riot(dir.path())
            .env("NO_COLOR", value)
            .arg("version")
            .assert()
            .success()
            .stdout(predicate::str::contains("riot 0.1.0"));
    }
}

#[test]
fn test_no_color_flag_still_works_without_env() {
    let dir = project_dir();
    riot(dir.path())
        .env_remove("NO_COLOR")
        .args(["--no-color", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("riot.lock is empty"));
}

// --- Status and pin ---

#[test]
fn test_status_without_lock_file_reports_empty_ledger() {
    let dir = project_dir();
    riot(dir.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("riot.lock is empty"));
    assert!(!dir.path().join("riot.lock").exists());
}

#[test]
fn test_pin_then_status_shows_artifact() {
    let dir = project_dir();
    riot(dir.path())
        .args(["pin", "web", "registry/web:3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("web pinned to registry/web:3"));

    let lock = std::fs::read_to_string(dir.path().join("riot.lock")).expect("riot.lock");
    assert!(lock.contains("web: registry/web:3"), "got: {lock}");
    assert!(!dir.path().join("riot.lock.lease").exists());

    let out = riot(dir.path())
        .args(["status", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).expect("valid json");
    assert_eq!(v["applications"][0]["application"], "web");
    assert_eq!(v["applications"][0]["artifact"], "registry/web:3");
}

#[test]
fn test_pin_unknown_application_fails() {
    let dir = project_dir();
    riot(dir.path())
        .args(["pin", "api", "registry/api:1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Application 'api' is not defined"));
    assert!(!dir.path().join("riot.lock").exists());
}

#[test]
fn test_lock_flag_overrides_ledger_location() {
    let dir = project_dir();
    let lock = dir.path().join("custom.lock");
    riot(dir.path())
        .arg("--lock")
        .arg(&lock)
        .args(["pin", "web", "registry/web:9"])
        .assert()
        .success();
    assert!(lock.exists());
    assert!(!dir.path().join("riot.lock").exists());
}

#[test]
fn test_missing_project_file_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    riot(dir.path())
        .args(["pin", "web", "registry/web:3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read project file"));
}
