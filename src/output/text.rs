//! Text output formatter for human-readable display
//!
//! This module provides:
//! - One aligned line per resolved entry
//! - Delta labels colored by magnitude (major/minor/patch)

use crate::domain::{ResolutionResult, SemverDelta};
use crate::output::OutputFormatter;
use colored::Colorize;
use std::io::Write;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn label(&self, delta: SemverDelta) -> String {
        if !self.color {
            return delta.label().to_string();
        }
        match delta {
            SemverDelta::Major => "major".red().bold().to_string(),
            SemverDelta::Minor => "minor".yellow().to_string(),
            SemverDelta::Patch => "patch".green().to_string(),
            SemverDelta::Unknown => "unknown".dimmed().to_string(),
        }
    }

    fn arrow(&self) -> String {
        if self.color {
            "→".dimmed().to_string()
        } else {
            "->".to_string()
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, results: &[ResolutionResult], writer: &mut dyn Write) -> std::io::Result<()> {
        let name_width = results.iter().map(|r| r.name().len()).max().unwrap_or(0);
        let spec_width = results
            .iter()
            .map(|r| r.entry.specifier().unwrap_or("*").len())
            .max()
            .unwrap_or(0);

        for result in results {
            let chosen = if self.color {
                result.chosen_version.bold().to_string()
            } else {
                result.chosen_version.clone()
            };
            writeln!(
                writer,
                "{:<name_width$}  {:<spec_width$} {} {}  [{}]  {}",
                result.name(),
                result.entry.specifier().unwrap_or("*"),
                self.arrow(),
                chosen,
                self.label(result.semver_delta),
                result.reason,
            )?;
        }

        Ok(())
    }
}
