//! Human-readable terminal renderer.

use std::path::Path;

use owo_colors::OwoColorize as _;

use crate::application::services::pin::PinOutcome;
use crate::application::services::status::ApplicationStatus;
use crate::domain::{DeployReport, RiotConfig};
use crate::output::OutputContext;

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the CLI version.
    pub fn render_version(&self, version: &str) {
        println!("riot {version}");
    }

    /// Render the result of a successful deploy.
    pub fn render_deploy(&self, report: &DeployReport) {
        self.ctx.success(&format!(
            "{} is running {} on {}",
            report.application,
            report.artifact.style(self.ctx.styles.ident),
            report.node
        ));
        self.ctx.kv("instance:", &report.instance);
        if let Some(replaced) = &report.replaced {
            self.ctx.kv("replaced:", replaced);
        }
    }

    /// Render the ledger summary.
    pub fn render_status(&self, status: &[ApplicationStatus]) {
        if status.is_empty() {
            self.ctx
                .info("riot.lock is empty. Pin a build: riot pin <app> <artifact>");
            return;
        }
        for (i, app) in status.iter().enumerate() {
            if i > 0 && !self.ctx.quiet {
                println!();
            }
            self.ctx.header(&app.application);
            match &app.artifact {
                Some(artifact) => self.ctx.kv("artifact:", artifact),
                None => self.ctx.warn("no artifact pinned"),
            }
            if app.deployments.is_empty() {
                self.ctx.kv("deployed:", "(none)");
            }
            for d in &app.deployments {
                self.ctx.kv(&format!("{}:", d.node), &d.instance);
            }
        }
    }

    /// Render the result of `riot pin`.
    pub fn render_pin(&self, outcome: &PinOutcome) {
        match outcome.previous.as_deref() {
            Some(prev) if prev == outcome.artifact => self.ctx.info(&format!(
                "{} already pinned to {}",
                outcome.application, outcome.artifact
            )),
            Some(prev) => self.ctx.success(&format!(
                "{} pinned to {} (was {prev})",
                outcome.application, outcome.artifact
            )),
            None => self.ctx.success(&format!(
                "{} pinned to {}",
                outcome.application, outcome.artifact
            )),
        }
    }

    /// Render the current riot configuration.
    pub fn render_config(&self, config: &RiotConfig, path: &Path) {
        println!();
        println!(
            "  {}",
            format!("Configuration ({})", path.display()).style(self.ctx.styles.header)
        );
        println!();
        println!(
            "  {:<24} {}",
            "defaults.environment:",
            config.defaults.environment.as_deref().unwrap_or("(not set)")
        );
        println!("  {:<24} {}", "docker.timeout_secs:", config.docker.timeout_secs);
        println!();
        println!("  {}", "Environment:".style(self.ctx.styles.bold));
        for var in ["RIOT_CONFIG", "RIOT_PROJECT", "RIOT_LOCK", "RIOT_LOG", "NO_COLOR"] {
            println!(
                "    {:<18} {}",
                format!("{var}:"),
                std::env::var(var).unwrap_or_else(|_| "(not set)".to_string())
            );
        }
        println!();
    }
}
