//! Manifest entry and parsed manifest structures

use super::Ecosystem;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single dependency entry in a manifest file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Normalized package name
    pub name: String,
    /// Version specifier as written (e.g. `==1.2.3`, `>=1.0,<2.0`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec: Option<String>,
    /// Environment markers, carried through unevaluated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markers: Option<String>,
    /// Requested extras, carried through unchanged
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extras: Vec<String>,
}

impl ManifestEntry {
    /// Creates an unconstrained entry
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            spec: None,
            markers: None,
            extras: Vec::new(),
        }
    }

    /// Sets the version specifier (builder pattern)
    pub fn with_spec(mut self, spec: impl Into<String>) -> Self {
        self.spec = Some(spec.into());
        self
    }

    /// Sets the environment markers (builder pattern)
    pub fn with_markers(mut self, markers: impl Into<String>) -> Self {
        self.markers = Some(markers.into());
        self
    }

    /// Sets the extras (builder pattern)
    pub fn with_extras<I, S>(mut self, extras: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extras = extras.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the specifier, treating blank text as absent
    pub fn specifier(&self) -> Option<&str> {
        self.spec
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

impl fmt::Display for ManifestEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.extras.is_empty() {
            write!(f, "[{}]", self.extras.join(","))?;
        }
        if let Some(spec) = self.specifier() {
            write!(f, "{}", spec)?;
        }
        if let Some(ref markers) = self.markers {
            write!(f, "; {}", markers)?;
        }
        Ok(())
    }
}

/// A parsed dependency manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    /// Ecosystem the manifest belongs to
    pub ecosystem: Ecosystem,
    /// Original file content
    pub raw: String,
    /// Registry entries in file order
    pub entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Creates a new manifest
    pub fn new(ecosystem: Ecosystem, raw: impl Into<String>, entries: Vec<ManifestEntry>) -> Self {
        Self {
            ecosystem,
            raw: raw.into(),
            entries,
        }
    }

    /// Returns true if the manifest declares no registry entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_new_is_unconstrained() {
        let entry = ManifestEntry::new("requests");
        assert_eq!(entry.name, "requests");
        assert!(entry.spec.is_none());
        assert!(entry.markers.is_none());
        assert!(entry.extras.is_empty());
    }

    #[test]
    fn test_entry_builders() {
        let entry = ManifestEntry::new("uvloop")
            .with_spec(">=0.17.0")
            .with_markers("sys_platform != \"win32\"")
            .with_extras(["speedups"]);
        assert_eq!(entry.spec.as_deref(), Some(">=0.17.0"));
        assert_eq!(entry.markers.as_deref(), Some("sys_platform != \"win32\""));
        assert_eq!(entry.extras, vec!["speedups"]);
    }

    #[test]
    fn test_specifier_blank_is_absent() {
        let entry = ManifestEntry::new("requests").with_spec("   ");
        assert_eq!(entry.specifier(), None);

        let entry = ManifestEntry::new("requests").with_spec(" >=2.0 ");
        assert_eq!(entry.specifier(), Some(">=2.0"));
    }

    #[test]
    fn test_entry_display() {
        let entry = ManifestEntry::new("fastapi")
            .with_spec("==0.85.0")
            .with_extras(["all"])
            .with_markers("python_version >= \"3.8\"");
        assert_eq!(
            entry.to_string(),
            "fastapi[all]==0.85.0; python_version >= \"3.8\""
        );
    }

    #[test]
    fn test_serde_entry_skips_empty_fields() {
        let entry = ManifestEntry::new("requests");
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"name":"requests"}"#);

        let parsed: ManifestEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, entry);
    }

    #[test]
    fn test_manifest_is_empty() {
        let manifest = Manifest::new(Ecosystem::Python, "", Vec::new());
        assert!(manifest.is_empty());
    }
}
