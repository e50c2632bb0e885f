//! JSON output formatter for machine processing

use crate::domain::{ResolutionResult, SemverDelta};
use crate::output::OutputFormatter;
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
#[derive(Debug, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self
    }
}

/// JSON representation of the full report
#[derive(Serialize)]
struct JsonOutput<'a> {
    reports: Vec<JsonReport<'a>>,
}

/// JSON representation of one resolved entry
#[derive(Serialize)]
struct JsonReport<'a> {
    /// Package name
    name: &'a str,
    /// Specifier as written in the manifest
    current_version: Option<&'a str>,
    /// Version that was chosen
    chosen_version: &'a str,
    /// Why it was chosen
    reason: &'a str,
    /// Change magnitude
    semver_delta: SemverDelta,
}

impl<'a> From<&'a ResolutionResult> for JsonReport<'a> {
    fn from(result: &'a ResolutionResult) -> Self {
        Self {
            name: &result.entry.name,
            current_version: result.entry.spec.as_deref(),
            chosen_version: &result.chosen_version,
            reason: &result.reason,
            semver_delta: result.semver_delta,
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, results: &[ResolutionResult], writer: &mut dyn Write) -> std::io::Result<()> {
        let output = JsonOutput {
            reports: results.iter().map(JsonReport::from).collect(),
        };

        let json = serde_json::to_string_pretty(&output).map_err(std::io::Error::other)?;

        writeln!(writer, "{}", json)?;

        Ok(())
    }
}
