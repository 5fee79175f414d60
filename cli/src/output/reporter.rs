//! `TerminalReporter` — Presentation-layer implementation of the
//! `ProgressReporter` and `PullProgress` ports.
//!
//! Wraps `&OutputContext` so application services can emit progress events
//! without depending on any presentation type directly.

use std::cell::RefCell;

use indicatif::ProgressBar;
use owo_colors::OwoColorize as _;

use crate::application::ports::{ProgressReporter, PullProgress};
use crate::domain::PullEvent;
use crate::output::{OutputContext, progress};

/// Terminal progress reporter that wraps an `OutputContext`.
///
/// - `step()` prints `"  → {message}"` (suppressed when `ctx.quiet`)
/// - `success()` prints `"  ✓ {message}"` (suppressed when `ctx.quiet`)
/// - `warn()` prints `"  ! {message}"` (suppressed when `ctx.quiet`)
/// - `on_event()` drives a single spinner line while an artifact is pulled,
///   shown only when `ctx.show_progress()`; the spinner is settled before the
///   next printed message.
pub struct TerminalReporter<'a> {
    ctx: &'a OutputContext,
    pull: RefCell<Option<ProgressBar>>,
}

impl<'a> TerminalReporter<'a> {
    /// Create a new `TerminalReporter` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self {
            ctx,
            pull: RefCell::new(None),
        }
    }

    fn settle_pull(&self) {
        if let Some(pb) = self.pull.borrow_mut().take() {
            progress::finish_with(&pb, "✓", "pull complete");
        }
    }
}

impl ProgressReporter for TerminalReporter<'_> {
    fn step(&self, message: &str) {
        self.settle_pull();
        if !self.ctx.quiet {
            println!("  {} {message}", "→".style(self.ctx.styles.step));
        }
    }

    fn success(&self, message: &str) {
        self.settle_pull();
        self.ctx.success(message);
    }

    fn warn(&self, message: &str) {
        self.settle_pull();
        self.ctx.warn(message);
    }
}

impl PullProgress for TerminalReporter<'_> {
    fn on_event(&self, event: &PullEvent) {
        let line = event.line();
        tracing::debug!(progress = %line, "pull");
        if !self.ctx.show_progress() {
            return;
        }
        self.pull
            .borrow_mut()
            .get_or_insert_with(|| progress::spinner("pulling"))
            .set_message(line);
    }
}

impl Drop for TerminalReporter<'_> {
    fn drop(&mut self) {
        if let Some(pb) = self.pull.get_mut().take() {
            pb.finish_and_clear();
        }
    }
}
