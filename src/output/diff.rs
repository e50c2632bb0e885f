//! Diff output formatter for showing changes
//!
//! Writes a `---`/`+++` header followed by `-old`/`+new` pairs for every
//! entry whose requirement line would change.

use crate::domain::ResolutionResult;
use crate::output::OutputFormatter;
use std::io::Write;

/// Diff formatter for showing version changes
pub struct DiffFormatter {
    /// Path shown in the header
    path: String,
}

impl DiffFormatter {
    /// Create a new diff formatter
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

fn requirement_prefix(result: &ResolutionResult) -> String {
    let entry = &result.entry;
    if entry.extras.is_empty() {
        entry.name.clone()
    } else {
        format!("{}[{}]", entry.name, entry.extras.join(","))
    }
}

impl OutputFormatter for DiffFormatter {
    fn format(&self, results: &[ResolutionResult], writer: &mut dyn Write) -> std::io::Result<()> {
        writeln!(writer, "--- {}", self.path)?;
        writeln!(writer, "+++ {}", self.path)?;

        for result in results {
            let prefix = requirement_prefix(result);
            let old_line = format!("{}{}", prefix, result.entry.specifier().unwrap_or(""));
            let new_line = format!("{}=={}", prefix, result.chosen_version);

            if old_line != new_line {
                writeln!(writer, "-{}", old_line)?;
                writeln!(writer, "+{}", new_line)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ManifestEntry, SemverDelta};
    use crate::output::render;

    fn result(entry: ManifestEntry, chosen: &str) -> ResolutionResult {
        ResolutionResult::new(entry, chosen, "latest, unconstrained", SemverDelta::Unknown)
    }

    #[test]
    fn test_diff_shows_changed_entries_only() {
        let results = vec![
            result(ManifestEntry::new("fastapi").with_spec("==0.85.0"), "0.115.0"),
            result(ManifestEntry::new("requests").with_spec("==2.32.5"), "2.32.5"),
            result(ManifestEntry::new("uvicorn"), "0.30.6"),
        ];

        let output = render(&DiffFormatter::new("requirements.txt"), &results).unwrap();

        assert_eq!(
            output,
            "--- requirements.txt\n+++ requirements.txt\n\
             -fastapi==0.85.0\n+fastapi==0.115.0\n\
             -uvicorn\n+uvicorn==0.30.6\n"
        );
    }

    #[test]
    fn test_diff_keeps_extras() {
        let results = vec![result(
            ManifestEntry::new("fastapi")
                .with_spec(">=0.85")
                .with_extras(["all"]),
            "0.115.0",
        )];

        let output = render(&DiffFormatter::new("<stdin>"), &results).unwrap();

        assert!(output.starts_with("--- <stdin>\n+++ <stdin>\n"));
        assert!(output.contains("-fastapi[all]>=0.85\n"));
        assert!(output.contains("+fastapi[all]==0.115.0\n"));
    }
}
