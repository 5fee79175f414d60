//! `riot deploy` — run an application's pinned artifact on a node.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::{LedgerStore, ProgressReporter, ProjectSource};
use crate::application::services::config_service;
use crate::application::services::deploy::{self as service, DeployTarget};
use crate::commands::interrupt::InterruptGuard;
use crate::domain::{DeployError, DeployReport};
use crate::infra::docker::DockerProvider;

/// Arguments for the deploy command.
#[derive(Args)]
pub struct DeployArgs {
    /// Application defined in riot.yaml
    pub app: String,

    /// Target node
    #[arg(long)]
    pub node: String,

    /// Environment the node belongs to (default: defaults.environment, or the
    /// only environment in riot.yaml)
    #[arg(long = "env")]
    pub environment: Option<String>,

    /// Cancel the deploy after this many seconds
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,
}

/// Run `riot deploy`.
///
/// The ledger is leased for the whole load → deploy → save window and saved
/// only when the deploy succeeds. Interrupts are caught from before the lease
/// is taken until it is released.
///
/// # Errors
///
/// Returns an error if the project lookup fails, another deploy holds the
/// ledger, or any deploy step fails.
pub async fn run(args: &DeployArgs, app: &AppContext) -> Result<()> {
    let config = config_service::load_config(&app.config_store)?;
    let project = app.project.load().await?;
    let application = project.application(&args.app)?;
    let environment = project.select_environment(
        args.environment.as_deref(),
        config.defaults.environment.as_deref(),
    )?;
    let node = project.node(&environment.name, &args.node)?;

    let interrupts = InterruptGuard::arm(args.timeout.map(Duration::from_secs))?;
    let _lease = app.ledger.lease()?;
    let ledger = app.ledger.load().await?;
    let replaced = ledger
        .prior_instance(&application.name, &node.name)
        .map(str::to_owned);

    let provider = DockerProvider::new(config.docker.timeout_secs);
    let reporter = app.terminal_reporter();
    let target = DeployTarget {
        application: &application,
        node: &node,
        environment: &environment,
    };
    let result = service::deploy(
        target,
        ledger,
        &provider,
        &reporter,
        &reporter,
        interrupts.token(),
    )
    .await;

    let ledger = match result {
        Ok(ledger) => ledger,
        Err(e) => {
            for hint in failure_hints(&e, &args.app, &args.node, replaced.as_deref()) {
                reporter.warn(&hint);
            }
            return Err(e.into());
        }
    };
    drop(reporter);

    app.ledger
        .save(&ledger)
        .await
        .with_context(|| format!("saving {}", app.ledger.path().display()))?;

    let report = DeployReport {
        application: application.name.clone(),
        node: node.name.clone(),
        artifact: ledger.resolve_artifact(&application.name)?.to_string(),
        instance: ledger
            .prior_instance(&application.name, &node.name)
            .context("deploy finished without recording an instance")?
            .to_string(),
        replaced,
    };
    app.renderer().render_deploy(&report)
}

/// Follow-up actions for the operator after a failed deploy.
fn failure_hints(err: &DeployError, app: &str, node: &str, prior: Option<&str>) -> Vec<String> {
    let mut hints = Vec::new();
    if let Some(prior) = prior.filter(|_| err.leaves_stale_ledger(true)) {
        hints.push(format!(
            "{app} is not running on {node} after {}; riot.lock still records {prior}. Re-run: riot deploy {app} --node {node}",
            err.step().describe()
        ));
    }
    if let Some(instance) = err.unstarted_instance() {
        hints.push(format!(
            "instance {instance} was created on {node} but never started and is not in riot.lock. Remove it: docker rm {instance}"
        ));
    }
    hints
}
