//! Delta classification between a pinned baseline and the chosen version

use crate::domain::SemverDelta;
use pep508_rs::pep440_rs::Version;
use std::str::FromStr;

/// Extract the pinned version from an exact-equality or bare-version specifier
///
/// Ranges, wildcards and compound specifiers yield `None`.
pub fn exact_pin(spec: &str) -> Option<Version> {
    let spec = spec.trim();
    let version = spec
        .strip_prefix("===")
        .or_else(|| spec.strip_prefix("=="))
        .unwrap_or(spec)
        .trim();

    if version.is_empty() || version.contains(',') || version.contains('*') {
        return None;
    }
    Version::from_str(version).ok()
}

/// Classify the change from `baseline` to `chosen`
///
/// Only an exact pin yields a known delta. Downgrades, no-ops and changes
/// outside the release triple are `Unknown`.
pub fn classify(baseline: Option<&str>, chosen: &str) -> SemverDelta {
    let Some(base) = baseline.and_then(exact_pin) else {
        return SemverDelta::Unknown;
    };
    let Ok(chosen) = Version::from_str(chosen.trim()) else {
        return SemverDelta::Unknown;
    };

    if chosen <= base {
        return SemverDelta::Unknown;
    }

    let component = |v: &Version, i: usize| v.release().get(i).copied().unwrap_or(0);
    if component(&chosen, 0) != component(&base, 0) {
        SemverDelta::Major
    } else if component(&chosen, 1) != component(&base, 1) {
        SemverDelta::Minor
    } else if component(&chosen, 2) != component(&base, 2) {
        SemverDelta::Patch
    } else {
        SemverDelta::Unknown
    }
}
