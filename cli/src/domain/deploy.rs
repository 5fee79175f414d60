//! Deploy step vocabulary and the outcome of a successful deploy.

use serde::Serialize;

/// The ordered steps of a single deploy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeployStep {
    /// Look up the desired artifact in the ledger.
    Resolve,
    /// Obtain a runtime client for the node.
    Connect,
    /// Pull the artifact onto the node.
    Pull,
    /// Stop the previously recorded instance.
    Stop,
    /// Create the new instance.
    Create,
    /// Start the new instance.
    Start,
}

impl DeployStep {
    /// Human-readable description used in progress and error messages.
    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            Self::Resolve => "resolving the artifact",
            Self::Connect => "connecting to the node",
            Self::Pull => "pulling the artifact",
            Self::Stop => "stopping the previous instance",
            Self::Create => "creating the new instance",
            Self::Start => "starting the new instance",
        }
    }

    /// Steps that run once the previous instance has been stopped.
    #[must_use]
    pub fn is_after_stop(self) -> bool {
        matches!(self, Self::Create | Self::Start)
    }
}

/// What a successful deploy did on the node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeployReport {
    pub application: String,
    pub node: String,
    pub artifact: String,
    /// Identifier of the instance now running.
    pub instance: String,
    /// Identifier of the instance that was stopped, if one was recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replaced: Option<String>,
}
