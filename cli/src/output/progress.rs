//! indicatif spinners for long-running deploy steps.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", " "];

/// Template-based style, or indicatif's default spinner if `template` is
/// rejected.
fn style(template: &str) -> ProgressStyle {
    ProgressStyle::with_template(template)
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(TICKS)
}

/// Start a steadily ticking spinner showing `msg`.
#[must_use]
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(style("  {spinner:.cyan} {msg}"));
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Freeze the spinner line as `prefix msg`.
pub fn finish_with(pb: &ProgressBar, prefix: &str, msg: &str) {
    pb.set_style(style("  {prefix} {msg}"));
    pb.set_prefix(prefix.to_string());
    pb.finish_with_message(msg.to_string());
}
