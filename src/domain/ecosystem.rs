//! Ecosystem type definitions for dependency manifests

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Package ecosystems a manifest can belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    /// Python (requirements.txt, pyproject.toml)
    Python,
    /// Node.js (package.json)
    Node,
    /// Could not be determined
    Unknown,
}

impl Ecosystem {
    /// Returns the display name for this ecosystem
    pub fn display_name(&self) -> &'static str {
        match self {
            Ecosystem::Python => "Python",
            Ecosystem::Node => "Node.js",
            Ecosystem::Unknown => "unknown",
        }
    }

    /// Returns the registry that serves this ecosystem
    pub fn registry_name(&self) -> &'static str {
        match self {
            Ecosystem::Python => "PyPI",
            Ecosystem::Node => "npm",
            Ecosystem::Unknown => "unknown",
        }
    }

    /// Returns true if the resolver can update manifests of this ecosystem
    pub fn is_supported(&self) -> bool {
        matches!(self, Ecosystem::Python)
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Ecosystem::Python => "python",
            Ecosystem::Node => "node",
            Ecosystem::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Ecosystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "python" | "py" | "pip" => Ok(Ecosystem::Python),
            "node" | "nodejs" | "npm" => Ok(Ecosystem::Node),
            other => Err(format!(
                "invalid ecosystem '{}': expected 'python' or 'node'",
                other
            )),
        }
    }
}
