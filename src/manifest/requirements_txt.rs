//! requirements.txt parser
//!
//! Reads one PEP 508 requirement per line. Option lines (`-r`, `-e`,
//! `--index-url`), URL and VCS requirements, and lines that do not parse are
//! skipped. The specifier text is kept exactly as written.

use crate::domain::{Ecosystem, Manifest, ManifestEntry};
use pep508_rs::{Requirement, VerbatimUrl, VersionOrUrl};
use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// `name[extras] specifier`, markers already removed
static REQUIREMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9](?:[A-Za-z0-9._-]*[A-Za-z0-9])?)\s*(?:\[([^\]]*)\])?\s*(.*)$")
        .unwrap()
});

/// Runs of `-`, `_` and `.` collapse to `-` under PEP 503
static NAME_SEPARATOR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[-_.]+").unwrap());

const VCS_PREFIXES: [&str; 4] = ["git+", "hg+", "svn+", "bzr+"];

/// Normalize a package name (PEP 503)
pub fn normalize_name(name: &str) -> String {
    NAME_SEPARATOR_RE
        .replace_all(name.trim(), "-")
        .to_ascii_lowercase()
}

/// Remove a trailing `# comment`
pub fn strip_inline_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Returns true if a trimmed line could hold a registry requirement
pub(crate) fn is_requirement_candidate(line: &str) -> bool {
    !line.is_empty()
        && !line.starts_with('#')
        && !line.starts_with('-')
        && !line.contains("://")
        && !VCS_PREFIXES.iter().any(|prefix| line.starts_with(prefix))
}

/// Parse requirements.txt content
pub fn parse_requirements(content: &str) -> Manifest {
    let entries = content.lines().filter_map(parse_line).collect();
    Manifest::new(Ecosystem::Python, content, entries)
}

/// Parse a single line into an entry
///
/// Returns `None` for anything that is not a registry requirement.
pub fn parse_line(line: &str) -> Option<ManifestEntry> {
    let requirement = strip_inline_comment(line.trim()).trim();
    if !is_requirement_candidate(requirement) {
        return None;
    }

    let (body, markers) = match requirement.split_once(';') {
        Some((body, markers)) => (body.trim(), Some(markers.trim())),
        None => (requirement, None),
    };

    let parsed = Requirement::<VerbatimUrl>::from_str(body)
        .inspect_err(|e| warn!("Skipping unparseable requirement '{}': {}", body, e))
        .ok()?;
    if matches!(parsed.version_or_url, Some(VersionOrUrl::Url(_))) {
        debug!("Skipping URL requirement '{}'", body);
        return None;
    }

    let caps = REQUIREMENT_RE.captures(body)?;
    let name = normalize_name(caps.get(1)?.as_str());
    let extras: Vec<String> = caps
        .get(2)
        .map(|m| {
            m.as_str()
                .split(',')
                .map(str::trim)
                .filter(|extra| !extra.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    let spec = caps
        .get(3)
        .map(|m| unwrap_parens(m.as_str().trim()))
        .filter(|spec| !spec.is_empty());

    let mut entry = ManifestEntry::new(name).with_extras(extras);
    if let Some(spec) = spec {
        entry = entry.with_spec(spec);
    }
    if let Some(markers) = markers.filter(|m| !m.is_empty()) {
        entry = entry.with_markers(markers);
    }
    Some(entry)
}

fn unwrap_parens(spec: &str) -> &str {
    spec.strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .map(str::trim)
        .unwrap_or(spec)
}
