//! Runtime compatibility filtering
//!
//! Drops releases whose artifacts all declare a `Requires-Python` range that
//! excludes the target interpreter. Missing or unparseable metadata never
//! excludes a release.

use crate::error::ConfigError;
use crate::registry::{ArtifactRecord, PackageMetadata};
use crate::resolver::version::Candidate;
use pep508_rs::pep440_rs::{Version, VersionSpecifiers};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// Target Python interpreter version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetPython {
    raw: String,
    version: Version,
}

impl TargetPython {
    /// Parse a target version such as `3.11` or `3.12.1`
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let raw = raw.trim();
        let version = Version::from_str(raw).map_err(|e| ConfigError::InvalidPythonVersion {
            value: raw.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            raw: raw.to_string(),
            version,
        })
    }

    /// The version as given
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The parsed version
    pub fn version(&self) -> &Version {
        &self.version
    }
}

impl fmt::Display for TargetPython {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Keep the candidates usable on `target`
///
/// With no target the candidates are returned unchanged.
pub fn filter<'a>(
    candidates: Vec<Candidate<'a>>,
    metadata: &PackageMetadata,
    target: Option<&TargetPython>,
) -> Vec<Candidate<'a>> {
    let Some(target) = target else {
        return candidates;
    };

    candidates
        .into_iter()
        .filter(|candidate| {
            let keep = is_compatible(metadata.artifacts(candidate.raw), target.version());
            if !keep {
                debug!(
                    "Excluding {} (incompatible with Python {})",
                    candidate.raw, target
                );
            }
            keep
        })
        .collect()
}

/// Decide whether a release with these artifacts runs on `target`
///
/// A release is kept when it has no artifacts, when any artifact declares no
/// range, when any declared range contains the target, or when at least one
/// range failed to parse.
pub fn is_compatible(artifacts: &[ArtifactRecord], target: &Version) -> bool {
    let mut parse_errors = 0usize;

    for record in artifacts {
        let Some(expression) = record.requires_python.as_deref() else {
            return true;
        };

        match VersionSpecifiers::from_str(expression) {
            Ok(specifiers) => {
                if specifiers.contains(target) {
                    return true;
                }
            }
            Err(e) => {
                warn!("Ignoring unparseable Requires-Python '{}': {}", expression, e);
                parse_errors += 1;
            }
        }
    }

    artifacts.is_empty() || parse_errors > 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::version::candidates;
    use rstest::rstest;

    fn target(raw: &str) -> TargetPython {
        TargetPython::parse(raw).unwrap()
    }

    fn records(expressions: &[Option<&str>]) -> Vec<ArtifactRecord> {
        expressions
            .iter()
            .map(|e| ArtifactRecord {
                requires_python: e.map(str::to_string),
            })
            .collect()
    }

    #[test]
    fn test_target_python_parse() {
        let t = target("3.11");
        assert_eq!(t.as_str(), "3.11");
        assert_eq!(t.to_string(), "3.11");
    }

    #[test]
    fn test_target_python_invalid() {
        let err = TargetPython::parse("three").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPythonVersion { .. }));
    }

    #[rstest]
    #[case::no_artifacts(&[], true)]
    #[case::unconstrained(&[None], true)]
    #[case::satisfied(&[Some(">=3.8")], true)]
    #[case::unsatisfied(&[Some(">=3.12")], false)]
    #[case::one_of_many_satisfied(&[Some(">=3.12"), Some(">=3.7")], true)]
    #[case::one_unconstrained(&[Some(">=3.12"), None], true)]
    #[case::all_unparseable(&[Some("python3 please"), Some("~~3")], true)]
    #[case::unparseable_and_unsatisfied(&[Some(">=3.12"), Some("garbage")], true)]
    #[case::compound_satisfied(&[Some(">=3.7, <4")], true)]
    #[case::exclusion(&[Some("!=3.11.*")], false)]
    fn test_is_compatible(#[case] expressions: &[Option<&str>], #[case] expected: bool) {
        let target = target("3.11");
        assert_eq!(
            is_compatible(&records(expressions), target.version()),
            expected
        );
    }

    #[test]
    fn test_filter_without_target_is_identity() {
        let metadata = PackageMetadata::default()
            .with_release("1.0.0", records(&[Some(">=3.12")]))
            .with_release("2.0.0", records(&[Some(">=3.13")]));
        let all = candidates(&metadata);
        let filtered = filter(all.clone(), &metadata, None);
        assert_eq!(filtered, all);
    }

    #[test]
    fn test_filter_drops_incompatible_versions() {
        let metadata = PackageMetadata::default()
            .with_release("4.0.0", records(&[Some(">=3.7")]))
            .with_release("4.5.0", records(&[Some(">=3.8")]))
            .with_release("4.9.0", records(&[Some(">=3.12")]));
        let target = target("3.11");
        let filtered = filter(candidates(&metadata), &metadata, Some(&target));
        let raws: Vec<&str> = filtered.iter().map(|c| c.raw).collect();
        assert_eq!(raws, vec!["4.0.0", "4.5.0"]);
    }

    #[test]
    fn test_filter_keeps_release_with_unconstrained_artifact() {
        let metadata = PackageMetadata::default()
            .with_release("1.0.0", records(&[Some(">=3.13"), None]));
        let target = target("3.8");
        let filtered = filter(candidates(&metadata), &metadata, Some(&target));
        assert_eq!(filtered.len(), 1);
    }
}
