//! Manifest detection, parsing and rewriting
//!
//! This module provides functionality to:
//! - Detect the ecosystem of a manifest from its filename or content
//! - Parse requirements.txt content into entries
//! - Rewrite a manifest with resolved versions

mod detector;
pub mod requirements_txt;
mod writer;

pub use detector::identify;
pub use requirements_txt::{normalize_name, parse_requirements};
pub use writer::{has_changes, read_manifest, update_manifest_content, write_manifest};

use crate::domain::{Ecosystem, Manifest};
use crate::error::ManifestError;

/// Parse manifest content for an ecosystem
pub fn parse_manifest(content: &str, ecosystem: Ecosystem) -> Result<Manifest, ManifestError> {
    match ecosystem {
        Ecosystem::Python => Ok(parse_requirements(content)),
        other => Err(ManifestError::UnsupportedEcosystem { ecosystem: other }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_manifest_python() {
        let manifest = parse_manifest("requests>=2.0", Ecosystem::Python).unwrap();
        assert_eq!(manifest.entries.len(), 1);
    }

    #[test]
    fn test_parse_manifest_unsupported() {
        let err = parse_manifest("{}", Ecosystem::Node).unwrap_err();
        assert!(matches!(
            err,
            ManifestError::UnsupportedEcosystem {
                ecosystem: Ecosystem::Node
            }
        ));
        assert_eq!(err.to_string(), "unsupported ecosystem: node");

        assert!(parse_manifest("", Ecosystem::Unknown).is_err());
    }
}
