//! Tests for the file-backed ledger store and its deploy lease.

use riot_cli::application::ports::LedgerStore;
use riot_cli::domain::{Ledger, LedgerError};
use riot_cli::infra::ledger_store::{LEDGER_FILE, LedgerFile};

use crate::helpers::{WEB_ARTIFACT, pinned_ledger};

fn store_in(dir: &tempfile::TempDir) -> LedgerFile {
    LedgerFile::new(dir.path().join(LEDGER_FILE))
}

#[tokio::test]
async fn test_missing_file_loads_empty_ledger() {
    let dir = tempfile::tempdir().expect("tempdir");
    let ledger = store_in(&dir).load().await.expect("load");
    assert!(ledger.is_empty());
}

#[tokio::test]
async fn test_save_writes_nested_yaml_layout() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = store_in(&dir);
    let mut ledger = pinned_ledger();
    ledger.record_instance("web", "n1", "c1");

    store.save(&ledger).await.expect("save");

    let content = std::fs::read_to_string(store.path()).expect("read");
    assert_eq!(
        content,
        format!("versions:\n  web: {WEB_ARTIFACT}\ndeployments:\n  web:\n    n1: c1\n")
    );
    assert_eq!(store.load().await.expect("load"), ledger);
}

#[tokio::test]
async fn test_saving_unchanged_ledger_is_byte_identical() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = store_in(&dir);
    store.save(&pinned_ledger()).await.expect("save");
    let first = std::fs::read(store.path()).expect("read");

    let reloaded: Ledger = store.load().await.expect("load");
    store.save(&reloaded).await.expect("save");
    assert_eq!(std::fs::read(store.path()).expect("read"), first);
}

#[tokio::test]
async fn test_corrupt_file_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = store_in(&dir);
    std::fs::write(store.path(), "deployments: 7\n").expect("write");
    let err = store.load().await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LedgerError>(),
        Some(LedgerError::Corrupt { .. })
    ));
}

#[test]
fn test_second_lease_is_busy_until_first_is_dropped() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = store_in(&dir);

    let lease = store.lease().expect("first lease");
    assert!(lease.path().exists());

    let err = store.lease().unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LedgerError>(),
        Some(LedgerError::Busy { .. })
    ));
    assert!(err.to_string().contains("another deploy holds"), "got: {err}");

    let lease_path = lease.path().to_path_buf();
    drop(lease);
    assert!(!lease_path.exists(), "lease file removed on drop");
    store.lease().expect("lease available again");
}
