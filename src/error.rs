//! Application error types using thiserror
//!
//! Error hierarchy:
//! - RegistryError: Transport-level failures talking to a package index
//! - ResolveError: Failures that cross the resolver boundary
//! - ManifestError: Issues reading, detecting or writing manifest files
//! - ConfigError: Invalid resolver or CLI configuration

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::Ecosystem;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Resolution errors
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Manifest file related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Writing output failed
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to package registry communication
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Network request failed or returned an unexpected status
    #[error("failed to fetch package '{package}' from {registry}: {message}")]
    NetworkError {
        package: String,
        registry: String,
        message: String,
    },

    /// Rate limit exceeded
    #[error("rate limit exceeded for {registry} registry")]
    RateLimitExceeded { registry: String },

    /// Invalid response from registry
    #[error("invalid response from {registry} for '{package}': {message}")]
    InvalidResponse {
        package: String,
        registry: String,
        message: String,
    },

    /// Request exceeded the configured timeout
    #[error("timeout while fetching '{package}' from {registry}")]
    Timeout { package: String, registry: String },
}

/// Errors surfaced by the resolver for a single entry
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The registry has no such package
    #[error("package '{package}' not found")]
    PackageNotFound { package: String },

    /// Metadata could not be fetched
    #[error("failed to fetch metadata for '{package}': {source}")]
    MetadataFetch {
        package: String,
        #[source]
        source: RegistryError,
    },

    /// Every known release was excluded
    #[error("no versions of '{package}' are compatible{}", python_suffix(.python))]
    NoCompatibleVersions {
        package: String,
        python: Option<String>,
    },
}

fn python_suffix(python: &Option<String>) -> String {
    match python {
        Some(version) => format!(" with Python {}", version),
        None => String::new(),
    }
}

/// Errors related to manifest file operations
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Manifest file not found
    #[error("manifest file not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read manifest file
    #[error("failed to read manifest file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write manifest file
    #[error("failed to write manifest file {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Ecosystem cannot be updated
    #[error("unsupported ecosystem: {ecosystem}")]
    UnsupportedEcosystem { ecosystem: Ecosystem },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Target Python version is not a valid PEP 440 version
    #[error("invalid Python version '{value}': {message}")]
    InvalidPythonVersion { value: String, message: String },

    /// Concurrency limit must allow at least one request
    #[error("invalid max concurrency {value}: must be at least 1")]
    InvalidConcurrency { value: usize },

    /// HTTP client could not be built
    #[error("failed to create HTTP client: {message}")]
    HttpClient { message: String },

    /// Conflicting options
    #[error("conflicting options: {message}")]
    ConflictingOptions { message: String },

    /// No place to put the updated manifest
    #[error("Specify --in-place, --out, or --dry-run")]
    MissingOutput,
}

impl RegistryError {
    /// Creates a new NetworkError
    pub fn network_error(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::NetworkError {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::InvalidResponse {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new RateLimitExceeded error
    pub fn rate_limit_exceeded(registry: impl Into<String>) -> Self {
        RegistryError::RateLimitExceeded {
            registry: registry.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::Timeout {
            package: package.into(),
            registry: registry.into(),
        }
    }
}

impl ResolveError {
    /// Creates a new PackageNotFound error
    pub fn package_not_found(package: impl Into<String>) -> Self {
        ResolveError::PackageNotFound {
            package: package.into(),
        }
    }

    /// Creates a new MetadataFetch error
    pub fn metadata_fetch(package: impl Into<String>, source: RegistryError) -> Self {
        ResolveError::MetadataFetch {
            package: package.into(),
            source,
        }
    }

    /// Creates a new NoCompatibleVersions error
    pub fn no_compatible_versions(package: impl Into<String>, python: Option<&str>) -> Self {
        ResolveError::NoCompatibleVersions {
            package: package.into(),
            python: python.map(str::to_string),
        }
    }

    /// Returns the package the error concerns
    pub fn package(&self) -> &str {
        match self {
            ResolveError::PackageNotFound { package }
            | ResolveError::MetadataFetch { package, .. }
            | ResolveError::NoCompatibleVersions { package, .. } => package,
        }
    }
}

impl ManifestError {
    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        ManifestError::NotFound { path: path.into() }
    }

    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new WriteError
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::WriteError {
            path: path.into(),
            source,
        }
    }
}
