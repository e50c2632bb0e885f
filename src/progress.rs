//! Progress display while resolving
//!
//! Shows an indicatif spinner on stderr during registry lookups.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner shown while entries are resolved
pub struct Progress {
    /// Whether progress display is enabled (disabled in quiet mode)
    enabled: bool,
    /// Current spinner
    bar: Option<ProgressBar>,
}

impl Progress {
    /// Create a new progress reporter
    pub fn new(enabled: bool) -> Self {
        Self { enabled, bar: None }
    }

    /// Create a disabled progress reporter
    pub fn disabled() -> Self {
        Self::new(false)
    }

    /// Returns true if a spinner is currently shown
    pub fn is_active(&self) -> bool {
        self.bar.is_some()
    }

    /// Show a spinner with a message
    pub fn spinner(&mut self, message: &str) {
        if !self.enabled {
            return;
        }

        let style = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(style);
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(80));
        self.bar = Some(spinner);
    }

    /// Update the message
    pub fn set_message(&self, message: &str) {
        if let Some(ref bar) = self.bar {
            bar.set_message(message.to_string());
        }
    }

    /// Finish and clear the current spinner
    pub fn finish_and_clear(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Drop for Progress {
    fn drop(&mut self) {
        self.finish_and_clear();
    }
}
