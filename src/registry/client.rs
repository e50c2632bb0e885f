//! HTTP client shared foundation
//!
//! This module provides a shared HTTP client with:
//! - Configurable timeout and User-Agent
//! - 404 mapped to an absent result instead of an error
//! - Timeout, rate limit and status error classification
//!
//! Requests are never retried here; callers decide whether to retry.

use crate::config::DEFAULT_TIMEOUT;
use crate::error::{ConfigError, RegistryError};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;

/// Default User-Agent header
const DEFAULT_USER_AGENT: &str = concat!("depfix/", env!("CARGO_PKG_VERSION"));

/// HTTP client wrapper
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_config(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with a custom timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self, ConfigError> {
        Self::with_config(timeout, DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(timeout: Duration, user_agent: &str) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| ConfigError::HttpClient {
                message: e.to_string(),
            })?;

        Ok(Self { client, timeout })
    }

    /// Get the configured request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Perform a GET request and decode a JSON body
    ///
    /// Returns `Ok(None)` on 404.
    pub async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        package: &str,
        registry: &str,
    ) -> Result<Option<T>, RegistryError> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_transport_error(e, package, registry))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(RegistryError::rate_limit_exceeded(registry));
        }
        if !status.is_success() {
            return Err(RegistryError::network_error(
                package,
                registry,
                format!("HTTP {}", status),
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| classify_transport_error(e, package, registry))?;

        serde_json::from_slice::<T>(&body)
            .map(Some)
            .map_err(|e| {
                RegistryError::invalid_response(
                    package,
                    registry,
                    format!("failed to parse JSON: {}", e),
                )
            })
    }
}

fn classify_transport_error(error: reqwest::Error, package: &str, registry: &str) -> RegistryError {
    if error.is_timeout() {
        RegistryError::timeout(package, registry)
    } else {
        RegistryError::network_error(package, registry, error.to_string())
    }
}
