//! Candidate versions parsed from registry release keys
//!
//! Ordering follows PEP 440: pre-releases sort below their release,
//! `1.0` equals `1.0.0`, post-releases and local versions sort above.

use crate::registry::PackageMetadata;
use pep508_rs::pep440_rs::Version;
use std::cmp::Ordering;
use std::str::FromStr;
use tracing::debug;

/// A published version that parsed successfully
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate<'a> {
    /// Version string as the registry lists it
    pub raw: &'a str,
    /// Parsed version
    pub version: Version,
}

impl<'a> Candidate<'a> {
    /// Parse a release key, returning `None` for non-PEP 440 strings
    pub fn parse(raw: &'a str) -> Option<Self> {
        Version::from_str(raw)
            .inspect_err(|e| debug!("Skipping unparseable release '{}': {}", raw, e))
            .ok()
            .map(|version| Self { raw, version })
    }

    /// Returns true for pre-release and dev versions
    pub fn is_prerelease(&self) -> bool {
        self.version.any_prerelease()
    }
}

impl Ord for Candidate<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.version
            .cmp(&other.version)
            .then_with(|| self.raw.cmp(other.raw))
    }
}

impl PartialOrd for Candidate<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Collect every parseable release of a package, sorted ascending
pub fn candidates(metadata: &PackageMetadata) -> Vec<Candidate<'_>> {
    let mut parsed: Vec<Candidate<'_>> = metadata.versions().filter_map(Candidate::parse).collect();
    parsed.sort();
    parsed
}

/// Returns the highest candidate
pub fn latest<'a, 'b>(candidates: &'b [Candidate<'a>]) -> Option<&'b Candidate<'a>> {
    candidates.iter().max()
}
