//! `riot status` — show pinned artifacts and recorded deployments.

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::status as service;

/// Arguments for the status command.
#[derive(Args, Default)]
pub struct StatusArgs {
    /// Only show this application
    #[arg(long)]
    pub app: Option<String>,
}

/// Run `riot status`.
///
/// # Errors
///
/// Returns an error if the ledger cannot be read.
pub async fn run(args: &StatusArgs, app: &AppContext) -> Result<()> {
    let status = service::ledger_status(&app.ledger, args.app.as_deref()).await?;
    app.renderer().render_status(&status)
}
