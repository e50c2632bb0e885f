//! Core domain models for depfix
//!
//! This module contains the fundamental types shared by the resolver and the
//! manifest tooling:
//! - Ecosystem types for manifest classification
//! - Manifest entries and parsed manifests
//! - Resolution results and change classification

mod ecosystem;
mod entry;
mod result;

pub use ecosystem::Ecosystem;
pub use entry::{Manifest, ManifestEntry};
pub use result::{Advisory, ResolutionResult, SemverDelta};
