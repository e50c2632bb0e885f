//! Version resolution engine
//!
//! This module provides:
//! - Metadata cache with coalesced, bounded fetches
//! - Runtime compatibility filtering (`Requires-Python`)
//! - Constraint evaluation with fail-open fallbacks
//! - Delta classification against pinned versions
//! - `PythonResolver`, which runs the per-entry pipeline over many entries

mod cache;
pub mod compat;
pub mod constraint;
pub mod delta;
pub mod version;

pub use cache::MetadataCache;
pub use compat::TargetPython;
pub use constraint::{Selection, SelectionRule};

use crate::config::ResolverConfig;
use crate::domain::{ManifestEntry, ResolutionResult};
use crate::error::{ConfigError, ResolveError};
use crate::registry::{HttpClient, MetadataSource, PackageMetadata, PyPIAdapter};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Resolves manifest entries against a Python package index
pub struct PythonResolver {
    config: ResolverConfig,
    target: Option<TargetPython>,
    cache: MetadataCache,
}

impl PythonResolver {
    /// Create a resolver over an arbitrary metadata source
    pub fn new(config: ResolverConfig, source: Arc<dyn MetadataSource>) -> Result<Self, ConfigError> {
        if config.max_concurrency == 0 {
            return Err(ConfigError::InvalidConcurrency {
                value: config.max_concurrency,
            });
        }
        let target = config
            .python_version
            .as_deref()
            .map(TargetPython::parse)
            .transpose()?;
        let cache = MetadataCache::new(source, config.max_concurrency);

        Ok(Self {
            config,
            target,
            cache,
        })
    }

    /// Create a resolver talking to the configured PyPI-compatible index
    pub fn from_config(config: ResolverConfig) -> Result<Self, ConfigError> {
        let client = HttpClient::with_timeout(config.timeout)?;
        let source = Arc::new(PyPIAdapter::with_base_url(client, config.index_url.clone()));
        Self::new(config, source)
    }

    /// The configuration this resolver was built with
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Target Python version, if any
    pub fn python_version(&self) -> Option<&TargetPython> {
        self.target.as_ref()
    }

    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        self.config.timeout
    }

    /// Maximum simultaneous metadata fetches
    pub fn max_concurrency(&self) -> usize {
        self.config.max_concurrency
    }

    async fn metadata(&self, package: &str) -> Result<Arc<PackageMetadata>, ResolveError> {
        self.cache
            .get(package)
            .await
            .map_err(|e| ResolveError::metadata_fetch(package, e))?
            .ok_or_else(|| ResolveError::package_not_found(package))
    }

    /// Resolve a single entry
    pub async fn resolve_one(&self, entry: &ManifestEntry) -> Result<ResolutionResult, ResolveError> {
        let metadata = self.metadata(&entry.name).await?;
        let spec = entry.specifier();

        let mut candidates = version::candidates(&metadata);
        if !self.config.include_prereleases && !pins_prerelease(spec) {
            candidates.retain(|candidate| !candidate.is_prerelease());
        }
        let candidates = compat::filter(candidates, &metadata, self.target.as_ref());
        debug!("{} has {} candidate versions", entry.name, candidates.len());

        let Some(selection) = constraint::select(&candidates, spec, self.config.include_pinned)
        else {
            return Err(ResolveError::no_compatible_versions(
                &entry.name,
                self.target.as_ref().map(TargetPython::as_str),
            ));
        };

        let semver_delta = delta::classify(spec, selection.version);
        let mut reason = selection.rule.to_string();
        if let Some(target) = &self.target {
            reason.push_str(&format!(" (target Python {})", target));
        }

        info!(
            "Resolved {} {} -> {} ({})",
            entry.name,
            spec.unwrap_or("*"),
            selection.version,
            semver_delta
        );
        Ok(ResolutionResult::new(
            entry.clone(),
            selection.version,
            reason,
            semver_delta,
        ))
    }

    /// Resolve every entry, keeping each outcome
    ///
    /// Results are in input order. A failed entry does not cancel the others.
    pub async fn resolve_each(
        &self,
        entries: &[ManifestEntry],
    ) -> Vec<Result<ResolutionResult, ResolveError>> {
        join_all(entries.iter().map(|entry| self.resolve_one(entry))).await
    }

    /// Resolve every entry, failing on the first error in input order
    pub async fn resolve_all(
        &self,
        entries: &[ManifestEntry],
    ) -> Result<Vec<ResolutionResult>, ResolveError> {
        self.resolve_each(entries).await.into_iter().collect()
    }

    /// Latest published version of a package
    ///
    /// Prefers the registry's own latest-version field and falls back to the
    /// highest parseable release.
    pub async fn latest_version(&self, package: &str) -> Result<String, ResolveError> {
        let metadata = self.metadata(package).await?;
        if let Some(latest) = metadata.latest_version.as_deref() {
            return Ok(latest.to_string());
        }
        let candidates = version::candidates(&metadata);
        version::latest(&candidates)
            .map(|candidate| candidate.raw.to_string())
            .ok_or_else(|| ResolveError::no_compatible_versions(package, None))
    }
}

fn pins_prerelease(spec: Option<&str>) -> bool {
    spec.and_then(delta::exact_pin)
        .is_some_and(|version| version.any_prerelease())
}
