//! Infrastructure implementation of the `LedgerStore` port.
//!
//! `LedgerFile` provides async load/save of `riot.lock` using
//! `tokio::task::spawn_blocking` with atomic write (temp file + rename) to
//! prevent ledger corruption. `LedgerLease` serializes deploys that share a
//! ledger.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write as _};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::LedgerStore;
use crate::domain::{Ledger, LedgerError};
use crate::infra::fs::write_atomic;

/// Default ledger file name, next to `riot.yaml`.
pub const LEDGER_FILE: &str = "riot.lock";

/// `riot.lock` on disk.
pub struct LedgerFile {
    path: PathBuf,
}

impl LedgerFile {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Take the exclusive deploy lease for this ledger.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Busy` if another process holds the lease, or an
    /// I/O error if the lease file cannot be created.
    pub fn lease(&self) -> Result<LedgerLease> {
        LedgerLease::acquire(lease_path(&self.path))
    }

    fn load_sync(path: &Path) -> Result<Ledger> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Ledger::default()),
            Err(e) => {
                return Err(e).with_context(|| format!("reading ledger {}", path.display()));
            }
        };
        if content.trim().is_empty() {
            return Ok(Ledger::default());
        }
        serde_yaml::from_str(&content).map_err(|e| {
            LedgerError::Corrupt {
                path: path.display().to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    fn save_sync(path: &Path, ledger: &Ledger) -> Result<()> {
        let content = serde_yaml::to_string(ledger).context("serializing ledger")?;
        write_atomic(path, &content)
    }
}

impl LedgerStore for LedgerFile {
    async fn load(&self) -> Result<Ledger> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || Self::load_sync(&path))
            .await
            .context("ledger load task panicked")?
    }

    async fn save(&self, ledger: &Ledger) -> Result<()> {
        let path = self.path.clone();
        let ledger = ledger.clone();
        tokio::task::spawn_blocking(move || Self::save_sync(&path, &ledger))
            .await
            .context("ledger save task panicked")?
    }
}

fn lease_path(ledger: &Path) -> PathBuf {
    let mut name = ledger.file_name().unwrap_or_default().to_os_string();
    name.push(".lease");
    ledger.with_file_name(name)
}

/// Exclusive lease on a ledger, held for a whole load → deploy → save window.
///
/// The lease file is created atomically and removed on drop. A lease left
/// behind by a killed process must be removed by hand.
#[derive(Debug)]
pub struct LedgerLease {
    path: PathBuf,
}

impl LedgerLease {
    fn acquire(path: PathBuf) -> Result<Self> {
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(LedgerError::Busy {
                    lease: path.display().to_string(),
                }
                .into());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("creating lease {}", path.display()));
            }
        };
        // Holder pid, for whoever has to clean up a stale lease.
        writeln!(file, "{}", std::process::id())
            .with_context(|| format!("writing lease {}", path.display()))?;
        Ok(Self { path })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for LedgerLease {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            tracing::warn!(lease = %self.path.display(), error = %e, "could not remove ledger lease");
        }
    }
}
