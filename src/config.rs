//! Resolver configuration
//!
//! Defaults mirror what a one-shot CLI run needs: no target Python, a 30 second
//! request timeout and at most 6 registry requests in flight.

use std::time::Duration;

/// Default timeout for registry requests (30 seconds)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default number of simultaneous registry requests
pub const DEFAULT_MAX_CONCURRENCY: usize = 6;

/// Default package index base URL
pub const DEFAULT_INDEX_URL: &str = "https://pypi.org";

/// Configuration consumed by the resolver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Target Python version (e.g. "3.11"); `None` disables compatibility filtering
    pub python_version: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
    /// Maximum simultaneous metadata fetches
    pub max_concurrency: usize,
    /// Base URL of the package index
    pub index_url: String,
    /// Resolve exact pins as if unconstrained
    pub include_pinned: bool,
    /// Consider pre-release and dev versions as candidates
    pub include_prereleases: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            python_version: None,
            timeout: DEFAULT_TIMEOUT,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            index_url: DEFAULT_INDEX_URL.to_string(),
            include_pinned: false,
            include_prereleases: true,
        }
    }
}

impl ResolverConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target Python version
    pub fn with_python_version(mut self, version: impl Into<String>) -> Self {
        self.python_version = Some(version.into());
        self
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the concurrency limit
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }

    /// Set the package index base URL
    pub fn with_index_url(mut self, index_url: impl Into<String>) -> Self {
        self.index_url = index_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Resolve exact pins as if unconstrained
    pub fn with_include_pinned(mut self, include: bool) -> Self {
        self.include_pinned = include;
        self
    }

    /// Consider pre-release versions
    pub fn with_include_prereleases(mut self, include: bool) -> Self {
        self.include_prereleases = include;
        self
    }
}
