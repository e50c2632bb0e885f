//! Per-resolver metadata cache with bounded fetch concurrency
//!
//! Each package name owns a once-cell, so concurrent lookups of the same
//! package share one request. Only successful lookups are stored; a missing
//! package or a failed request leaves the cell empty for the next caller.

use crate::error::RegistryError;
use crate::registry::{MetadataSource, PackageMetadata};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{OnceCell, Semaphore};
use tracing::debug;

type Slot = Arc<OnceCell<Arc<PackageMetadata>>>;

/// Outcome of a lookup that did not produce metadata
enum Miss {
    NotFound,
    Failed(RegistryError),
}

/// Metadata cache owned by one resolver
pub struct MetadataCache {
    source: Arc<dyn MetadataSource>,
    limiter: Arc<Semaphore>,
    slots: Mutex<HashMap<String, Slot>>,
}

impl MetadataCache {
    /// Create an empty cache allowing `max_concurrency` requests in flight
    pub fn new(source: Arc<dyn MetadataSource>, max_concurrency: usize) -> Self {
        Self {
            source,
            limiter: Arc::new(Semaphore::new(max_concurrency)),
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Name of the registry behind this cache
    pub fn registry_name(&self) -> &'static str {
        self.source.registry_name()
    }

    /// Number of packages cached so far
    pub fn len(&self) -> usize {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|slot| slot.initialized())
            .count()
    }

    /// Returns true if nothing has been cached yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up a package, fetching it on a miss
    ///
    /// Returns `Ok(None)` when the registry has no such package.
    pub async fn get(&self, package: &str) -> Result<Option<Arc<PackageMetadata>>, RegistryError> {
        let slot = self.slot(package);

        if let Some(metadata) = slot.get() {
            debug!("Cache hit for {}", package);
            return Ok(Some(Arc::clone(metadata)));
        }

        let result = slot
            .get_or_try_init(|| async {
                let Ok(_permit) = self.limiter.acquire().await else {
                    return Err(Miss::Failed(RegistryError::network_error(
                        package,
                        self.registry_name(),
                        "request limiter closed",
                    )));
                };

                debug!("Fetching metadata for {} from {}", package, self.registry_name());
                match self.source.fetch(package).await {
                    Ok(Some(metadata)) => Ok(Arc::new(metadata)),
                    Ok(None) => Err(Miss::NotFound),
                    Err(e) => Err(Miss::Failed(e)),
                }
            })
            .await;

        match result {
            Ok(metadata) => Ok(Some(Arc::clone(metadata))),
            Err(Miss::NotFound) => Ok(None),
            Err(Miss::Failed(e)) => Err(e),
        }
    }

    fn slot(&self, package: &str) -> Slot {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(slots.entry(package.to_string()).or_default())
    }
}
