//! Ecosystem detection from filename hints and content patterns
//!
//! Features:
//! - Filename hints win: requirements*.txt, *.in, pyproject.toml, package.json
//! - JSON content with dependency tables is Node
//! - PEP 508 lines with an operator, extras or markers are Python

use crate::domain::Ecosystem;
use crate::manifest::requirements_txt::{is_requirement_candidate, strip_inline_comment};
use pep508_rs::{Requirement, VerbatimUrl};
use std::path::Path;
use std::str::FromStr;

/// Detect the ecosystem of a manifest
pub fn identify(content: &str, filename: Option<&str>) -> Ecosystem {
    if let Some(ecosystem) = filename.and_then(identify_by_filename) {
        return ecosystem;
    }

    if looks_like_package_json(content) {
        Ecosystem::Node
    } else if looks_like_requirements(content) {
        Ecosystem::Python
    } else {
        Ecosystem::Unknown
    }
}

fn identify_by_filename(filename: &str) -> Option<Ecosystem> {
    let name = Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())?
        .to_ascii_lowercase();

    if name == "package.json" {
        return Some(Ecosystem::Node);
    }
    let is_requirements = name.starts_with("requirements") && name.ends_with(".txt");
    if is_requirements || name.ends_with(".in") || name == "pyproject.toml" {
        return Some(Ecosystem::Python);
    }
    None
}

fn looks_like_package_json(content: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(content)
        .ok()
        .as_ref()
        .and_then(|value| value.as_object())
        .is_some_and(|object| {
            object.contains_key("dependencies") || object.contains_key("devDependencies")
        })
}

fn looks_like_requirements(content: &str) -> bool {
    content
        .lines()
        .map(strip_inline_comment)
        .map(str::trim)
        .filter(|line| is_requirement_candidate(line))
        .any(|line| {
            let has_detail = line.contains(['<', '>', '=', '~', '!', '[', ';']);
            has_detail && Requirement::<VerbatimUrl>::from_str(line).is_ok()
        })
}
