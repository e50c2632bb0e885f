//! Registry adapters for fetching package release metadata
//!
//! This module provides:
//! - HTTP client shared foundation with timeout handling
//! - PyPI JSON API adapter
//! - Typed release metadata consumed by the resolver

mod client;
mod metadata;
mod pypi;

pub use client::HttpClient;
pub use metadata::{ArtifactRecord, PackageMetadata};
pub use pypi::PyPIAdapter;

use crate::error::RegistryError;
use async_trait::async_trait;

/// Source of per-package release metadata
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Get the registry name
    fn registry_name(&self) -> &'static str;

    /// Fetch metadata for a package
    ///
    /// Returns `Ok(None)` when the registry has no such package.
    async fn fetch(&self, package: &str) -> Result<Option<PackageMetadata>, RegistryError>;
}
