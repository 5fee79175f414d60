//! Application service — deploy one application onto one node.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.
//!
//! The reconciler is fail-fast: no step is retried and nothing is rolled
//! back. It never persists the ledger; the caller saves the returned value.

use std::future::Future;

use futures_util::StreamExt as _;
use tokio_util::sync::CancellationToken;

use crate::application::ports::{
    ProgressReporter, PullProgress, RuntimeClient, RuntimeClientProvider,
};
use crate::domain::{
    Application, DeployError, DeployStep, Environment, Ledger, Node, runtime_config,
};

/// The (application, node, environment) triple a deploy converges.
#[derive(Debug, Clone, Copy)]
pub struct DeployTarget<'a> {
    pub application: &'a Application,
    pub node: &'a Node,
    pub environment: &'a Environment,
}

/// Converge `target.node` to run the artifact the ledger pins for
/// `target.application`, replacing the previously recorded instance.
///
/// Returns the ledger with the new instance recorded. On error the caller
/// should discard the ledger it passed in unchanged on disk.
///
/// # Errors
///
/// Returns `DeployError::MissingArtifact` before contacting the node when
/// the application has no pinned artifact, the step-specific variant when a
/// runtime call fails, and `DeployError::Cancelled` when `cancel` fires.
pub async fn deploy(
    target: DeployTarget<'_>,
    ledger: Ledger,
    provider: &impl RuntimeClientProvider,
    progress: &impl PullProgress,
    reporter: &impl ProgressReporter,
    cancel: &CancellationToken,
) -> Result<Ledger, DeployError> {
    let had_prior = ledger
        .prior_instance(&target.application.name, &target.node.name)
        .is_some();
    let result = converge(target, ledger, provider, progress, reporter, cancel).await;
    if let Err(e) = &result {
        if e.leaves_stale_ledger(had_prior) {
            tracing::warn!(
                application = %target.application.name,
                node = %target.node.name,
                step = ?e.step(),
                "previous instance stopped but no replacement is running; ledger left unchanged"
            );
        }
        if let Some(instance) = e.unstarted_instance() {
            tracing::warn!(
                application = %target.application.name,
                node = %target.node.name,
                instance = %instance,
                "instance created but not started; it is not recorded in the ledger"
            );
        }
    }
    result
}

async fn converge(
    target: DeployTarget<'_>,
    mut ledger: Ledger,
    provider: &impl RuntimeClientProvider,
    progress: &impl PullProgress,
    reporter: &impl ProgressReporter,
    cancel: &CancellationToken,
) -> Result<Ledger, DeployError> {
    let DeployTarget {
        application,
        node,
        environment,
    } = target;

    let artifact = ledger.resolve_artifact(&application.name)?.to_string();

    reporter.step(&format!("connecting to {}...", node.name));
    tracing::info!(node = %node.name, host = %node.host, environment = %environment.name, "connecting");
    let client = guarded(cancel, DeployStep::Connect, provider.client(node, environment))
        .await?
        .map_err(|source| DeployError::Connectivity {
            node: node.name.clone(),
            source,
        })?;

    reporter.step(&format!("pulling {artifact}..."));
    tracing::info!(application = %application.name, artifact = %artifact, "pulling");
    let pull = async {
        let mut events = client.pull(&artifact);
        while let Some(event) = events.next().await {
            progress.on_event(&event?);
        }
        anyhow::Ok(())
    };
    guarded(cancel, DeployStep::Pull, pull)
        .await?
        .map_err(|source| DeployError::Pull {
            artifact: artifact.clone(),
            source,
        })?;

    if let Some(prior) = ledger
        .prior_instance(&application.name, &node.name)
        .map(str::to_owned)
    {
        reporter.step(&format!("stopping previous instance {prior}..."));
        tracing::info!(application = %application.name, node = %node.name, instance = %prior, "stopping");
        guarded(cancel, DeployStep::Stop, client.stop(&prior, None))
            .await?
            .map_err(|source| DeployError::Stop {
                instance: prior.clone(),
                source,
            })?;
    }

    let config = runtime_config(&application.run);
    reporter.step(&format!("creating instance from {artifact}..."));
    let instance = guarded(cancel, DeployStep::Create, client.create(&artifact, &config))
        .await?
        .map_err(|source| DeployError::Create {
            artifact: artifact.clone(),
            source,
        })?;
    tracing::info!(application = %application.name, node = %node.name, instance = %instance, "created");

    reporter.step(&format!("starting instance {instance}..."));
    guarded(cancel, DeployStep::Start, client.start(&instance))
        .await?
        .map_err(|source| DeployError::Start {
            instance: instance.clone(),
            source,
        })?;
    tracing::info!(application = %application.name, node = %node.name, instance = %instance, "started");

    ledger.record_instance(&application.name, &node.name, instance);
    Ok(ledger)
}

/// Race `fut` against `cancel`. A token that is already cancelled wins
/// without polling `fut`.
async fn guarded<T>(
    cancel: &CancellationToken,
    step: DeployStep,
    fut: impl Future<Output = T>,
) -> Result<T, DeployError> {
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(DeployError::Cancelled { step }),
        out = fut => Ok(out),
    }
}
