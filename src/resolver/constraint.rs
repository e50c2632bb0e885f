//! Constraint evaluation over compatible candidates
//!
//! Picks the highest candidate that satisfies an entry's PEP 440 specifier.
//! An unsatisfiable or malformed specifier never blocks an update: the
//! highest candidate overall is chosen and the reason says why.

use crate::resolver::delta::exact_pin;
use crate::resolver::version::{self, Candidate};
use pep508_rs::pep440_rs::{Version, VersionSpecifiers};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Why a version was chosen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionRule {
    /// No specifier given
    Unconstrained,
    /// Highest candidate satisfying the specifier
    SatisfiesConstraint(String),
    /// Specifier matched nothing; highest candidate used instead
    Unsatisfiable(String),
    /// Specifier could not be parsed and was ignored
    InvalidConstraint(String),
    /// Exact pin ignored on request
    PinRelaxed(String),
}

impl fmt::Display for SelectionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionRule::Unconstrained => write!(f, "latest, unconstrained"),
            SelectionRule::SatisfiesConstraint(spec) => {
                write!(f, "latest satisfying constraint `{}`", spec)
            }
            SelectionRule::Unsatisfiable(spec) => write!(
                f,
                "constraint `{}` unsatisfiable, using latest available",
                spec
            ),
            SelectionRule::InvalidConstraint(spec) => write!(
                f,
                "invalid constraint `{}` ignored; latest, unconstrained",
                spec
            ),
            SelectionRule::PinRelaxed(spec) => {
                write!(f, "pin `{}` relaxed; latest, unconstrained", spec)
            }
        }
    }
}

/// The chosen candidate and the rule that chose it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<'a> {
    /// Version string as published
    pub version: &'a str,
    /// Rule that produced the choice
    pub rule: SelectionRule,
}

impl<'a> Selection<'a> {
    fn new(candidate: &Candidate<'a>, rule: SelectionRule) -> Self {
        Self {
            version: candidate.raw,
            rule,
        }
    }
}

/// Parse a specifier, reading a bare version as an exact pin
pub fn parse_specifier(spec: &str) -> Result<VersionSpecifiers, String> {
    let spec = spec.trim();
    if Version::from_str(spec).is_ok() {
        return VersionSpecifiers::from_str(&format!("=={}", spec)).map_err(|e| e.to_string());
    }
    VersionSpecifiers::from_str(spec).map_err(|e| e.to_string())
}

/// Choose a version from `candidates`
///
/// Returns `None` only when `candidates` is empty. With `relax_pins`, an exact
/// pin is treated as no specifier at all.
pub fn select<'a>(
    candidates: &[Candidate<'a>],
    specifier: Option<&str>,
    relax_pins: bool,
) -> Option<Selection<'a>> {
    let latest = version::latest(candidates)?;

    let Some(spec) = specifier.map(str::trim).filter(|s| !s.is_empty()) else {
        return Some(Selection::new(latest, SelectionRule::Unconstrained));
    };

    if relax_pins && exact_pin(spec).is_some() {
        return Some(Selection::new(
            latest,
            SelectionRule::PinRelaxed(spec.to_string()),
        ));
    }

    let specifiers = match parse_specifier(spec) {
        Ok(specifiers) => specifiers,
        Err(e) => {
            warn!("Ignoring invalid version specifier '{}': {}", spec, e);
            return Some(Selection::new(
                latest,
                SelectionRule::InvalidConstraint(spec.to_string()),
            ));
        }
    };

    let best = candidates
        .iter()
        .filter(|candidate| specifiers.contains(&candidate.version))
        .max();

    Some(match best {
        Some(best) => Selection::new(best, SelectionRule::SatisfiesConstraint(spec.to_string())),
        None => Selection::new(latest, SelectionRule::Unsatisfiable(spec.to_string())),
    })
}
