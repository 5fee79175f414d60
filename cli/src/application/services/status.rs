//! Application service — summarize the ledger.

use anyhow::Result;
use serde::Serialize;

use crate::application::ports::LedgerStore;
use crate::domain::Ledger;

/// One application's pinned artifact and where it runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationStatus {
    pub application: String,
    /// `None` when the application has deployments but no pinned artifact.
    pub artifact: Option<String>,
    pub deployments: Vec<NodeInstance>,
}

/// An instance recorded on a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeInstance {
    pub node: String,
    pub instance: String,
}

/// Load the ledger and summarize it, optionally for a single application.
///
/// # Errors
///
/// Returns an error if the ledger cannot be loaded.
pub async fn ledger_status(
    store: &impl LedgerStore,
    application: Option<&str>,
) -> Result<Vec<ApplicationStatus>> {
    let ledger = store.load().await?;
    Ok(summarize(&ledger, application))
}

/// Group the ledger by application, sorted by name.
#[must_use]
pub fn summarize(ledger: &Ledger, application: Option<&str>) -> Vec<ApplicationStatus> {
    let mut out: Vec<ApplicationStatus> = ledger
        .versions()
        .map(|(app, artifact)| ApplicationStatus {
            application: app.to_string(),
            artifact: Some(artifact.to_string()),
            deployments: Vec::new(),
        })
        .collect();

    for entry in ledger.deployments() {
        let idx = match out.binary_search_by(|s| s.application.as_str().cmp(entry.application)) {
            Ok(idx) => idx,
            Err(idx) => {
                out.insert(
                    idx,
                    ApplicationStatus {
                        application: entry.application.to_string(),
                        artifact: None,
                        deployments: Vec::new(),
                    },
                );
                idx
            }
        };
        out[idx].deployments.push(NodeInstance {
            node: entry.node.to_string(),
            instance: entry.instance.to_string(),
        });
    }

    if let Some(app) = application {
        out.retain(|s| s.application == app);
    }
    out
}
