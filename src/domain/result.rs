//! Resolution result types

use super::ManifestEntry;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Magnitude of change between a pinned version and the chosen version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemverDelta {
    /// Major component changed
    Major,
    /// Minor component changed
    Minor,
    /// Patch/micro component changed
    Patch,
    /// No single baseline, no forward progress, or unparseable
    #[default]
    Unknown,
}

impl SemverDelta {
    /// Returns the plain label
    pub fn label(&self) -> &'static str {
        match self {
            SemverDelta::Major => "major",
            SemverDelta::Minor => "minor",
            SemverDelta::Patch => "patch",
            SemverDelta::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SemverDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Security advisory attached to a resolution
///
/// Nothing populates these yet; the field is kept so reports have a stable shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advisory {
    /// Advisory identifier (e.g. `GHSA-...` or `PYSEC-...`)
    pub id: String,
    /// Short description
    pub summary: String,
    /// Link to the advisory, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Result of resolving one manifest entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionResult {
    /// The entry that was resolved
    pub entry: ManifestEntry,
    /// The chosen version, exactly as the registry lists it
    pub chosen_version: String,
    /// Human-readable explanation of the choice
    pub reason: String,
    /// Change magnitude relative to the entry's pin
    pub semver_delta: SemverDelta,
    /// Advisories affecting the chosen version
    #[serde(default)]
    pub advisories: Vec<Advisory>,
}

impl ResolutionResult {
    /// Creates a new result with no advisories
    pub fn new(
        entry: ManifestEntry,
        chosen_version: impl Into<String>,
        reason: impl Into<String>,
        semver_delta: SemverDelta,
    ) -> Self {
        Self {
            entry,
            chosen_version: chosen_version.into(),
            reason: reason.into(),
            semver_delta,
            advisories: Vec::new(),
        }
    }

    /// Returns the package name
    pub fn name(&self) -> &str {
        &self.entry.name
    }
}
