//! Output formatting for resolution results
//!
//! This module provides:
//! - Diff output showing old and new requirement lines
//! - JSON output for machine processing
//! - Text output for human-readable display

mod diff;
mod json;
mod text;

pub use diff::DiffFormatter;
pub use json::JsonFormatter;
pub use text::TextFormatter;

use crate::domain::ResolutionResult;
use clap::ValueEnum;
use std::io::Write;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Removed and added requirement lines
    #[default]
    Diff,
    /// JSON report for machine processing
    Json,
    /// Human-readable text output
    Text,
}

/// Configuration for output formatting
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Output format (diff, json, text)
    pub format: OutputFormat,
    /// Path shown in diff headers
    pub display_path: String,
    /// Whether to use colors (when supported)
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            display_path: "<stdin>".to_string(),
            color: true,
        }
    }
}

impl OutputConfig {
    /// Create a new output configuration
    pub fn new(format: OutputFormat, display_path: impl Into<String>) -> Self {
        Self {
            format,
            display_path: display_path.into(),
            color: true,
        }
    }

    /// Enable or disable colors (builder pattern)
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format and write the resolution results
    fn format(&self, results: &[ResolutionResult], writer: &mut dyn Write) -> std::io::Result<()>;
}

/// Create an output formatter based on configuration
pub fn create_formatter(config: &OutputConfig) -> Box<dyn OutputFormatter> {
    match config.format {
        OutputFormat::Diff => Box::new(DiffFormatter::new(config.display_path.clone())),
        OutputFormat::Json => Box::new(JsonFormatter::new()),
        OutputFormat::Text => Box::new(TextFormatter::new(config.color)),
    }
}

/// Render results to a string with the given formatter
pub fn render(
    formatter: &dyn OutputFormatter,
    results: &[ResolutionResult],
) -> std::io::Result<String> {
    let mut buffer = Vec::new();
    formatter.format(results, &mut buffer)?;
    String::from_utf8(buffer).map_err(std::io::Error::other)
}
