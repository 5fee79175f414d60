//! Tests for the pin and status services over an in-memory ledger.

use riot_cli::application::services::{pin, status};
use riot_cli::domain::Ledger;

use crate::helpers::{MemoryLedgerStore, WEB_ARTIFACT, pinned_ledger};

#[tokio::test]
async fn test_pin_records_artifact_and_reports_previous() {
    let store = MemoryLedgerStore::with(pinned_ledger());
    let outcome = pin::pin_artifact(&store, "web", " registry/web:4 ")
        .await
        .expect("pin");
    assert_eq!(outcome.artifact, "registry/web:4");
    assert_eq!(outcome.previous.as_deref(), Some(WEB_ARTIFACT));
    assert_eq!(
        store.current().resolve_artifact("web").expect("pinned"),
        "registry/web:4"
    );
    assert_eq!(store.saves(), 1);
}

#[tokio::test]
async fn test_pin_same_artifact_does_not_rewrite_ledger() {
    let store = MemoryLedgerStore::with(pinned_ledger());
    pin::pin_artifact(&store, "web", WEB_ARTIFACT)
        .await
        .expect("pin");
    assert_eq!(store.saves(), 0);
}

#[tokio::test]
async fn test_pin_rejects_blank_artifact() {
    let store = MemoryLedgerStore::with(Ledger::default());
    assert!(pin::pin_artifact(&store, "web", "   ").await.is_err());
    assert_eq!(store.saves(), 0);
}

#[tokio::test]
async fn test_pin_keeps_recorded_deployments() {
    let mut ledger = pinned_ledger();
    ledger.record_instance("web", "n1", "c1");
    let store = MemoryLedgerStore::with(ledger);
    pin::pin_artifact(&store, "web", "registry/web:4")
        .await
        .expect("pin");
    assert_eq!(store.current().prior_instance("web", "n1"), Some("c1"));
}

#[tokio::test]
async fn test_status_lists_applications_with_instances() {
    let mut ledger = pinned_ledger();
    ledger.record_instance("web", "n1", "c1");
    let store = MemoryLedgerStore::with(ledger);

    let all = status::ledger_status(&store, None).await.expect("status");
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].artifact.as_deref(), Some(WEB_ARTIFACT));
    assert_eq!(all[0].deployments[0].instance, "c1");

    let none = status::ledger_status(&store, Some("api"))
        .await
        .expect("status");
    assert!(none.is_empty());
}
