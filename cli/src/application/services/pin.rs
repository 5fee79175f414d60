//! Application service — record a built artifact in the ledger.
//!
//! This is the hand-off point for external build tooling: whatever produced
//! the image pins its reference here so `riot deploy` can resolve it.

use anyhow::{Result, ensure};

use crate::application::ports::LedgerStore;

/// Outcome of pinning an artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinOutcome {
    pub application: String,
    pub artifact: String,
    pub previous: Option<String>,
}

/// Pin `artifact` as the current build of `application`.
///
/// # Errors
///
/// Returns an error if the artifact reference is blank or the ledger cannot
/// be loaded or saved.
pub async fn pin_artifact(
    store: &impl LedgerStore,
    application: &str,
    artifact: &str,
) -> Result<PinOutcome> {
    let artifact = artifact.trim();
    ensure!(!artifact.is_empty(), "artifact reference must not be empty");

    let mut ledger = store.load().await?;
    let previous = ledger.pin_artifact(application, artifact);
    if previous.as_deref() != Some(artifact) {
        store.save(&ledger).await?;
    }
    Ok(PinOutcome {
        application: application.to_string(),
        artifact: artifact.to_string(),
        previous,
    })
}
