//! Application context — unified state passed to every command handler.
//!
//! `AppContext` is constructed once in `Cli::run()` from the global flags and
//! owns the output context and the file-backed stores every command uses.

use std::path::{Path, PathBuf};

use crate::infra::config::YamlConfigStore;
use crate::infra::ledger_store::{LEDGER_FILE, LedgerFile};
use crate::infra::project::YamlProjectSource;
use crate::output::{HumanRenderer, JsonRenderer, OutputContext, Renderer, TerminalReporter};

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Where the project definition and ledger live.
pub struct PathFlags {
    /// Path to `riot.yaml`.
    pub project: PathBuf,
    /// Path to `riot.lock`; defaults to a sibling of the project file.
    pub lock: Option<PathBuf>,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
    /// File locations.
    pub paths: PathFlags,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    ///
    /// Always quiet in JSON mode so progress lines never mix with the JSON
    /// document on stdout.
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// `riot.yaml`.
    pub project: YamlProjectSource,
    /// `riot.lock`.
    pub ledger: LedgerFile,
    /// User configuration store.
    pub config_store: YamlConfigStore,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    #[must_use]
    pub fn new(flags: AppFlags) -> Self {
        let mode = if flags.output.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };
        let lock = flags
            .paths
            .lock
            .unwrap_or_else(|| default_lock_path(&flags.paths.project));

        Self {
            output: OutputContext::new(
                flags.output.no_color,
                flags.output.quiet || flags.output.json,
            ),
            mode,
            project: YamlProjectSource::new(flags.paths.project),
            ledger: LedgerFile::new(lock),
            config_store: YamlConfigStore,
        }
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Returns the appropriate `Renderer` variant for the current output mode.
    #[must_use]
    pub fn renderer(&self) -> Renderer<'_> {
        match self.mode {
            OutputMode::Human => Renderer::Human(HumanRenderer::new(&self.output)),
            OutputMode::Json => Renderer::Json(JsonRenderer),
        }
    }

    /// Progress reporter bound to this context's output.
    #[must_use]
    pub fn terminal_reporter(&self) -> TerminalReporter<'_> {
        TerminalReporter::new(&self.output)
    }
}

/// `riot.lock` next to the project file.
#[must_use]
pub fn default_lock_path(project: &Path) -> PathBuf {
    project.with_file_name(LEDGER_FILE)
}
