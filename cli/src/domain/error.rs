//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

use crate::domain::deploy::DeployStep;

// ── Deploy errors ─────────────────────────────────────────────────────────────

/// Errors surfaced by a single deploy of one application onto one node.
///
/// Runtime failures are carried unchanged as the error `source`.
#[derive(Debug, Error)]
pub enum DeployError {
    #[error("application {application} has no riot.lock entry. Please run riot build")]
    MissingArtifact { application: String },

    #[error("cannot reach the container runtime on node '{node}'")]
    Connectivity {
        node: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to pull {artifact}")]
    Pull {
        artifact: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to stop previous instance {instance}")]
    Stop {
        instance: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to create instance from {artifact}")]
    Create {
        artifact: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to start instance {instance}")]
    Start {
        instance: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("deploy cancelled while {}", step.describe())]
    Cancelled { step: DeployStep },
}

impl DeployError {
    /// Stable machine-readable code used by `--json` error output.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingArtifact { .. } => "missing_artifact",
            Self::Connectivity { .. } => "connectivity",
            Self::Pull { .. } => "pull",
            Self::Stop { .. } => "stop",
            Self::Create { .. } => "create",
            Self::Start { .. } => "start",
            Self::Cancelled { .. } => "cancelled",
        }
    }

    /// The step the deploy was in when it failed.
    #[must_use]
    pub fn step(&self) -> DeployStep {
        match self {
            Self::MissingArtifact { .. } => DeployStep::Resolve,
            Self::Connectivity { .. } => DeployStep::Connect,
            Self::Pull { .. } => DeployStep::Pull,
            Self::Stop { .. } => DeployStep::Stop,
            Self::Create { .. } => DeployStep::Create,
            Self::Start { .. } => DeployStep::Start,
            Self::Cancelled { step } => *step,
        }
    }

    /// Returns `true` when the node may be left without a running instance
    /// while the ledger still names the previous one.
    ///
    /// `had_prior` is whether the ledger recorded an instance for the pair
    /// before the deploy. A deploy only gets past the stop step once that
    /// instance is stopped, so a first deploy is never stale.
    #[must_use]
    pub fn leaves_stale_ledger(&self, had_prior: bool) -> bool {
        had_prior && self.step().is_after_stop()
    }

    /// The instance that was created but never started, if any.
    #[must_use]
    pub fn unstarted_instance(&self) -> Option<&str> {
        match self {
            Self::Start { instance, .. } => Some(instance),
            _ => None,
        }
    }
}

// ── Ledger errors ─────────────────────────────────────────────────────────────

/// Errors related to loading, saving, and leasing the ledger file.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(
        "another deploy holds {lease}. Wait for it to finish, or remove the file if no deploy is running."
    )]
    Busy { lease: String },

    #[error("ledger {path} is corrupt: {reason}")]
    Corrupt { path: String, reason: String },
}

// ── Project errors ────────────────────────────────────────────────────────────

/// Errors related to looking things up in `riot.yaml`.
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Application '{0}' is not defined in riot.yaml.")]
    UnknownApplication(String),

    #[error("Environment '{0}' is not defined in riot.yaml.")]
    UnknownEnvironment(String),

    #[error("Node '{node}' is not part of environment '{environment}'.")]
    UnknownNode { node: String, environment: String },

    #[error(
        "No environment selected. Pass --env <name> or set one: riot config set defaults.environment <name>"
    )]
    NoEnvironment,
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\n{hint}")]
    InvalidValue {
        key: String,
        value: String,
        hint: String,
    },
}
