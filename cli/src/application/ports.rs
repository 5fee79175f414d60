//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` — never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use futures_util::stream::BoxStream;

use crate::domain::{Environment, Ledger, Node, Project, PullEvent, RiotConfig, RuntimeConfig};

// ── Container Runtime Ports ───────────────────────────────────────────────────

/// Yields a runtime client for a node inside an environment.
#[allow(async_fn_in_trait)]
pub trait RuntimeClientProvider {
    /// The client type handed to the reconciler.
    type Client: RuntimeClient;

    /// Connect to the container runtime on `node` using the access context of
    /// `environment`.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime cannot be reached.
    async fn client(&self, node: &Node, environment: &Environment) -> Result<Self::Client>;
}

/// Container lifecycle operations on one node.
#[allow(async_fn_in_trait)]
pub trait RuntimeClient {
    /// Pull `artifact` onto the node. The stream ends when the pull is done;
    /// an `Err` item means the pull failed.
    fn pull(&self, artifact: &str) -> BoxStream<'_, Result<PullEvent>>;
    /// Stop `instance`. `None` uses the runtime's default grace period.
    async fn stop(&self, instance: &str, timeout: Option<Duration>) -> Result<()>;
    /// Create an anonymous instance and return its identifier.
    async fn create(&self, artifact: &str, config: &RuntimeConfig) -> Result<String>;
    /// Start a created instance.
    async fn start(&self, instance: &str) -> Result<()>;
}

// ── Progress Reporting Ports ──────────────────────────────────────────────────

/// Receives every event of an artifact pull. Sync trait — no async needed.
pub trait PullProgress {
    fn on_event(&self, event: &PullEvent);
}

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait — no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── Persistence Ports ─────────────────────────────────────────────────────────

/// Abstracts ledger persistence (load/save).
#[allow(async_fn_in_trait)]
pub trait LedgerStore {
    /// Load the ledger, returning an empty one if none has been written yet.
    async fn load(&self) -> Result<Ledger>;
    /// Persist the given ledger.
    async fn save(&self, ledger: &Ledger) -> Result<()>;
}

/// Abstracts loading the project definition.
#[allow(async_fn_in_trait)]
pub trait ProjectSource {
    /// Load and parse the project definition.
    async fn load(&self) -> Result<Project>;
}

/// Abstracts user configuration persistence.
pub trait ConfigStore {
    /// Load configuration, returning defaults if none is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    fn load(&self) -> Result<RiotConfig>;
    /// Persist configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn save(&self, config: &RiotConfig) -> Result<()>;
    /// Location of the configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    fn path(&self) -> Result<PathBuf>;
}
