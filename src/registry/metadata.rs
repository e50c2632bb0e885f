//! Typed package metadata shared by registry adapters and the resolver

use std::collections::BTreeMap;

/// Metadata for one distributable artifact of a release
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactRecord {
    /// Runtime compatibility expression (PEP 345 `Requires-Python`), if declared
    pub requires_python: Option<String>,
}

impl ArtifactRecord {
    /// Creates a record without a compatibility expression
    pub fn unconstrained() -> Self {
        Self::default()
    }

    /// Creates a record requiring the given Python range
    pub fn requires(expression: impl Into<String>) -> Self {
        Self {
            requires_python: Some(expression.into()),
        }
    }
}

/// Release metadata for a single package
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageMetadata {
    /// The registry's authoritative latest version
    pub latest_version: Option<String>,
    /// Artifact records keyed by version string as published
    pub releases: BTreeMap<String, Vec<ArtifactRecord>>,
}

impl PackageMetadata {
    /// Creates metadata from a release map
    pub fn new(releases: BTreeMap<String, Vec<ArtifactRecord>>) -> Self {
        Self {
            latest_version: None,
            releases,
        }
    }

    /// Sets the authoritative latest version (builder pattern)
    pub fn with_latest(mut self, version: impl Into<String>) -> Self {
        self.latest_version = Some(version.into());
        self
    }

    /// Adds a release with its artifacts (builder pattern)
    pub fn with_release(mut self, version: impl Into<String>, artifacts: Vec<ArtifactRecord>) -> Self {
        self.releases.insert(version.into(), artifacts);
        self
    }

    /// Returns the published version strings
    pub fn versions(&self) -> impl Iterator<Item = &str> {
        self.releases.keys().map(String::as_str)
    }

    /// Returns the artifact records for a version
    pub fn artifacts(&self, version: &str) -> &[ArtifactRecord] {
        self.releases.get(version).map(Vec::as_slice).unwrap_or(&[])
    }
}
