//! Integration tests for `riot deploy` paths that fail before any runtime
//! call, so no Docker daemon is needed.

use predicates::prelude::*;

use crate::cli_tests::{project_dir, riot};

#[test]
fn test_deploy_without_pinned_artifact_asks_for_build() {
    let dir = project_dir();
    riot(dir.path())
        .args(["deploy", "web", "--node", "n1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "application web has no riot.lock entry. Please run riot build",
        ));
    assert!(!dir.path().join("riot.lock").exists(), "ledger must not be written");
    assert!(!dir.path().join("riot.lock.lease").exists(), "lease released");
}

#[test]
fn test_deploy_missing_artifact_json_error_code() {
    let dir = project_dir();
    let out = riot(dir.path())
        .args(["--json", "deploy", "web", "--node", "n1"])
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).expect("valid json");
    assert_eq!(v["error"], true);
    assert_eq!(v["code"], "missing_artifact");
}

#[test]
fn test_deploy_leaves_existing_ledger_untouched_on_failure() {
    let dir = project_dir();
    let lock = dir.path().join("riot.lock");
    let content = "versions:\n  api: registry/api:1\ndeployments:\n  web:\n    n1: c0\n";
    std::fs::write(&lock, content).expect("write riot.lock");

    riot(dir.path())
        .args(["deploy", "web", "--node", "n1"])
        .assert()
        .failure();
    assert_eq!(std::fs::read_to_string(&lock).expect("read"), content);
}

#[test]
fn test_deploy_unknown_node_is_rejected() {
    let dir = project_dir();
    riot(dir.path())
        .args(["deploy", "web", "--node", "n9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Node 'n9' is not part of environment 'prod'",
        ));
}

#[test]
fn test_deploy_unknown_environment_is_rejected() {
    let dir = project_dir();
    riot(dir.path())
        .args(["deploy", "web", "--node", "n1", "--env", "staging"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Environment 'staging' is not defined"));
}

#[test]
fn test_deploy_refused_while_lease_is_held() {
    let dir = project_dir();
    std::fs::write(dir.path().join("riot.lock.lease"), "4242\n").expect("write lease");
    riot(dir.path())
        .args(["--json", "deploy", "web", "--node", "n1"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("ledger_busy"));
    assert!(dir.path().join("riot.lock.lease").exists(), "foreign lease left alone");
}

#[test]
fn test_deploy_rejects_zero_timeout() {
    let dir = project_dir();
    riot(dir.path())
        .args(["deploy", "web", "--node", "n1", "--timeout", "0"])
        .assert()
        .code(2);
}
