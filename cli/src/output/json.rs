//! JSON output helpers.
//!
//! `JsonRenderer` prints command results as pretty JSON on stdout, and
//! `format_error` builds the error object used by every `--json` code path
//! when a command fails.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::application::services::pin::PinOutcome;
use crate::application::services::status::ApplicationStatus;
use crate::domain::{ConfigError, DeployError, DeployReport, LedgerError, ProjectError, RiotConfig};

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Stable machine-readable code for an error chain.
#[must_use]
pub fn error_code(err: &anyhow::Error) -> &'static str {
    if let Some(e) = err.downcast_ref::<DeployError>() {
        return e.code();
    }
    if let Some(e) = err.downcast_ref::<LedgerError>() {
        return match e {
            LedgerError::Busy { .. } => "ledger_busy",
            LedgerError::Corrupt { .. } => "ledger_corrupt",
        };
    }
    if let Some(e) = err.downcast_ref::<ProjectError>() {
        return match e {
            ProjectError::UnknownApplication(_) => "unknown_application",
            ProjectError::UnknownEnvironment(_) => "unknown_environment",
            ProjectError::UnknownNode { .. } => "unknown_node",
            ProjectError::NoEnvironment => "no_environment",
        };
    }
    if err.downcast_ref::<ConfigError>().is_some() {
        return "invalid_config";
    }
    "error"
}

/// Renders command results as JSON.
pub struct JsonRenderer;

impl JsonRenderer {
    fn print(value: &impl Serialize) -> Result<()> {
        let out = serde_json::to_string_pretty(value).context("JSON serialization failed")?;
        println!("{out}");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_version(version: &str) -> Result<()> {
        Self::print(&serde_json::json!({ "version": version }))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_deploy(report: &DeployReport) -> Result<()> {
        Self::print(report)
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_status(status: &[ApplicationStatus]) -> Result<()> {
        Self::print(&serde_json::json!({ "applications": status }))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_pin(outcome: &PinOutcome) -> Result<()> {
        Self::print(&serde_json::json!({
            "application": outcome.application,
            "artifact": outcome.artifact,
            "previous": outcome.previous,
        }))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_config(config: &RiotConfig, path: &Path) -> Result<()> {
        Self::print(&serde_json::json!({
            "path": path.display().to_string(),
            "config": config,
        }))
    }
}
