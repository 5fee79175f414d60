//! CLI argument parsing with clap derive

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags, OutputFlags, PathFlags};
use crate::commands;
use crate::infra::project::PROJECT_FILE;

/// Deploy built container images onto nodes and track what runs where
#[derive(Parser)]
#[command(
    name = "riot",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output (any non-empty `NO_COLOR` except 0/false/no/off)
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Project file
    #[arg(long, global = true, env = "RIOT_PROJECT", default_value = PROJECT_FILE)]
    pub project: PathBuf,

    /// Ledger file (default: riot.lock next to the project file)
    #[arg(long, global = true, env = "RIOT_LOCK")]
    pub lock: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Deploy an application's pinned artifact onto a node
    Deploy(commands::deploy::DeployArgs),

    /// Show pinned artifacts and where they run
    Status(commands::status::StatusArgs),

    /// Pin a built artifact for an application
    Pin(commands::pin::PinArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Returns `true` when `--json` was passed.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<()> {
        let Cli {
            json,
            quiet,
            no_color,
            project,
            lock,
            command,
        } = self;
        let app = AppContext::new(AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                json,
            },
            paths: PathFlags { project, lock },
        });

        match command {
            Command::Deploy(args) => commands::deploy::run(&args, &app).await,
            Command::Status(args) => commands::status::run(&args, &app).await,
            Command::Pin(args) => commands::pin::run(&args, &app).await,
            Command::Config(cmd) => commands::config::run(&app, cmd),
            Command::Version => commands::version::run(&app),
        }
    }
}
