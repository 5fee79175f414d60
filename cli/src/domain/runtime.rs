//! Runtime-level container configuration and pull progress events.
//!
//! `runtime_config` is the only place an application's run configuration is
//! translated for the container runtime.

use serde::Serialize;

use crate::domain::project::RunConfig;

/// A bind mount from a host path into the container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MountSpec {
    pub source: String,
    pub target: String,
}

/// Container configuration handed to `RuntimeClient::create`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RuntimeConfig {
    pub privileged: bool,
    /// `None` when no volumes are configured; never `Some(vec![])`.
    pub mounts: Option<Vec<MountSpec>>,
}

/// Translate an application's run configuration for the runtime.
#[must_use]
pub fn runtime_config(run: &RunConfig) -> RuntimeConfig {
    let mounts = (!run.volumes.is_empty()).then(|| {
        run.volumes
            .iter()
            .map(|(source, target)| MountSpec {
                source: source.clone(),
                target: target.clone(),
            })
            .collect()
    });
    RuntimeConfig {
        privileged: run.privileged,
        mounts,
    }
}

/// One progress message from an artifact pull.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullEvent {
    /// Layer or image id the message refers to.
    pub id: Option<String>,
    pub status: Option<String>,
    /// Pre-rendered progress bar text, when the runtime supplies one.
    pub progress: Option<String>,
}

impl PullEvent {
    /// Single-line rendering, e.g. `"a1b2c3: Downloading [==>   ]"`.
    #[must_use]
    pub fn line(&self) -> String {
        let mut out = String::new();
        if let Some(id) = &self.id {
            out.push_str(id);
            out.push_str(": ");
        }
        if let Some(status) = &self.status {
            out.push_str(status);
        }
        if let Some(progress) = &self.progress {
            out.push(' ');
            out.push_str(progress);
        }
        out
    }
}
