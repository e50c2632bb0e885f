//! PyPI JSON API adapter
//!
//! Fetches package release metadata from PyPI.
//! API endpoint: {index}/pypi/{package}/json

use crate::config::DEFAULT_INDEX_URL;
use crate::error::RegistryError;
use crate::registry::{ArtifactRecord, HttpClient, MetadataSource, PackageMetadata};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// PyPI adapter
pub struct PyPIAdapter {
    client: HttpClient,
    base_url: String,
}

/// PyPI package metadata response
#[derive(Debug, Deserialize)]
struct PyPIResponse {
    /// Package information
    #[serde(default)]
    info: Option<PyPIInfo>,
    /// Release files keyed by version
    #[serde(default)]
    releases: HashMap<String, Vec<PyPIFile>>,
}

/// Package information from PyPI
#[derive(Debug, Deserialize)]
struct PyPIInfo {
    /// Latest version according to PyPI
    #[serde(default)]
    version: Option<String>,
}

/// Release file information
#[derive(Debug, Deserialize)]
struct PyPIFile {
    /// Requires-Python metadata for this file
    #[serde(default)]
    requires_python: Option<String>,
}

impl From<PyPIResponse> for PackageMetadata {
    fn from(response: PyPIResponse) -> Self {
        let releases: BTreeMap<String, Vec<ArtifactRecord>> = response
            .releases
            .into_iter()
            .map(|(version, files)| {
                let records = files
                    .into_iter()
                    .map(|file| ArtifactRecord {
                        requires_python: file
                            .requires_python
                            .map(|s| s.trim().to_string())
                            .filter(|s| !s.is_empty()),
                    })
                    .collect();
                (version, records)
            })
            .collect();

        PackageMetadata {
            latest_version: response
                .info
                .and_then(|info| info.version)
                .filter(|v| !v.is_empty()),
            releases,
        }
    }
}

impl PyPIAdapter {
    /// Create a new PyPI adapter against pypi.org
    pub fn new(client: HttpClient) -> Self {
        Self::with_base_url(client, DEFAULT_INDEX_URL)
    }

    /// Create a new PyPI adapter against a custom index
    pub fn with_base_url(client: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Build the URL for a package
    fn build_url(&self, package: &str) -> String {
        format!("{}/pypi/{}/json", self.base_url, package)
    }
}

#[async_trait]
impl MetadataSource for PyPIAdapter {
    fn registry_name(&self) -> &'static str {
        "PyPI"
    }

    async fn fetch(&self, package: &str) -> Result<Option<PackageMetadata>, RegistryError> {
        let url = self.build_url(package);
        let response: Option<PyPIResponse> = self
            .client
            .get_json(&url, package, self.registry_name())
            .await?;

        let Some(response) = response else {
            debug!("{} not found on {}", package, self.registry_name());
            return Ok(None);
        };

        let metadata = PackageMetadata::from(response);
        debug!(
            "Found {} releases for package {}",
            metadata.releases.len(),
            package
        );
        Ok(Some(metadata))
    }
}
