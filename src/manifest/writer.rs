//! Manifest rewriting and file I/O
//!
//! This module provides:
//! - Rewriting requirement lines to exact pins of the chosen versions
//! - Change detection over resolution results
//! - Reading and writing manifest files

use crate::domain::ResolutionResult;
use crate::error::ManifestError;
use crate::manifest::requirements_txt::parse_line;
use crate::resolver::delta::exact_pin;
use pep508_rs::pep440_rs::Version;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Rewrite every resolved requirement line as `name[extras]==chosen; markers`
///
/// `results` pair with requirement lines in order, as `resolve_all` returns
/// them, so repeated names with different markers each keep their own result.
/// Lines without a matching result are kept verbatim, as is a trailing
/// newline. Inline comments are carried over.
pub fn update_manifest_content(content: &str, results: &[ResolutionResult]) -> String {
    let mut pending = results.iter().peekable();

    let mut updated: Vec<String> = Vec::new();
    for line in content.lines() {
        let result = parse_line(line).and_then(|entry| {
            pending.next_if(|result| result.name() == entry.name)
        });
        match result {
            Some(result) => updated.push(pinned_line(line, result)),
            None => updated.push(line.to_string()),
        }
    }

    let mut output = updated.join("\n");
    if content.ends_with('\n') {
        output.push('\n');
    }
    output
}

fn pinned_line(original: &str, result: &ResolutionResult) -> String {
    let entry = &result.entry;
    let mut line = entry.name.clone();
    if !entry.extras.is_empty() {
        line.push_str(&format!("[{}]", entry.extras.join(",")));
    }
    line.push_str(&format!("=={}", result.chosen_version));
    if let Some(markers) = &entry.markers {
        line.push_str(&format!("; {}", markers));
    }
    if let Some((_, comment)) = original.split_once('#') {
        line.push_str(&format!("  # {}", comment.trim()));
    }
    line
}

/// Returns true if writing the results would change the manifest
///
/// Unpinned and range-constrained entries always count as changes; an exact
/// pin counts only when it differs from the chosen version.
pub fn has_changes(results: &[ResolutionResult]) -> bool {
    results.iter().any(|result| {
        let Some(pin) = result.entry.specifier().and_then(exact_pin) else {
            return true;
        };
        match Version::from_str(&result.chosen_version) {
            Ok(chosen) => chosen != pin,
            Err(_) => true,
        }
    })
}

/// Read the content of a manifest file
pub fn read_manifest(path: &Path) -> Result<String, ManifestError> {
    if !path.exists() {
        return Err(ManifestError::not_found(path));
    }
    fs::read_to_string(path).map_err(|e| ManifestError::read_error(path, e))
}

/// Write content to a manifest file
pub fn write_manifest(path: &Path, content: &str) -> Result<(), ManifestError> {
    fs::write(path, content).map_err(|e| ManifestError::write_error(path, e))
}
