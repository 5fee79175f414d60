//! `riot pin` — record a built artifact for an application.

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::ProjectSource;
use crate::application::services::pin as service;
use crate::commands::interrupt::InterruptGuard;

/// Arguments for the pin command.
#[derive(Args)]
pub struct PinArgs {
    /// Application defined in riot.yaml
    pub app: String,
    /// Artifact reference, e.g. registry.example.com/web:3
    pub artifact: String,
}

/// Run `riot pin`.
///
/// # Errors
///
/// Returns an error if the application is not defined, another deploy holds
/// the ledger, or the ledger cannot be written.
pub async fn run(args: &PinArgs, app: &AppContext) -> Result<()> {
    let project = app.project.load().await?;
    project.application(&args.app)?;

    // Catch SIGINT until the lease is released.
    let _interrupts = InterruptGuard::arm(None)?;
    let _lease = app.ledger.lease()?;
    let outcome = service::pin_artifact(&app.ledger, &args.app, &args.artifact).await?;
    tracing::info!(application = %outcome.application, artifact = %outcome.artifact, "pinned");
    app.renderer().render_pin(&outcome)
}
