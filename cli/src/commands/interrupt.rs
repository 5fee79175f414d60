//! Ctrl-C, SIGTERM and deadline handling for commands that hold the ledger
//! lease.
//!
//! Signal handlers are installed before `InterruptGuard::arm` returns, so an
//! interrupt that arrives while the lease is held cancels the token instead
//! of killing the process and leaving `riot.lock.lease` behind.

use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Cancels its token on an interrupt or once the optional deadline passes.
/// The watcher task is aborted on drop.
pub struct InterruptGuard {
    token: CancellationToken,
    watcher: JoinHandle<()>,
}

impl InterruptGuard {
    /// Install the signal handlers and start watching.
    ///
    /// # Errors
    ///
    /// Returns an error if a signal handler cannot be installed.
    pub fn arm(timeout: Option<Duration>) -> Result<Self> {
        let token = CancellationToken::new();
        let interrupted = listen()?;
        let watcher = tokio::spawn(cancel_on(token.clone(), interrupted, timeout));
        Ok(Self { token, watcher })
    }

    #[must_use]
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}

impl Drop for InterruptGuard {
    fn drop(&mut self) {
        self.watcher.abort();
    }
}

#[cfg(unix)]
fn listen() -> Result<impl Future<Output = ()> + Send + 'static> {
    use anyhow::Context as _;
    use tokio::signal::unix::{SignalKind, signal};

    let mut int = signal(SignalKind::interrupt()).context("installing SIGINT handler")?;
    let mut term = signal(SignalKind::terminate()).context("installing SIGTERM handler")?;
    Ok(async move {
        tokio::select! {
            _ = int.recv() => tracing::warn!("interrupted"),
            _ = term.recv() => tracing::warn!("terminated"),
        }
    })
}

#[cfg(not(unix))]
fn listen() -> Result<impl Future<Output = ()> + Send + 'static> {
    Ok(async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::warn!("interrupted"),
            Err(e) => {
                tracing::warn!(error = %e, "cannot listen for Ctrl-C");
                std::future::pending::<()>().await;
            }
        }
    })
}

async fn cancel_on(
    token: CancellationToken,
    interrupted: impl Future<Output = ()>,
    timeout: Option<Duration>,
) {
    let deadline = async {
        match timeout {
            Some(t) => {
                tokio::time::sleep(t).await;
                tracing::warn!(secs = t.as_secs(), "timed out");
            }
            None => std::future::pending().await,
        }
    };
    tokio::select! {
        () = interrupted => {}
        () = deadline => {}
    }
    token.cancel();
}
