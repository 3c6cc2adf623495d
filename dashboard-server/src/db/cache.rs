//! Process-lifetime cache of the loaded fact table

use std::sync::Arc;
use std::time::Duration;

use shared::error::AppResult;
use tokio::sync::Mutex;

use super::SalesRepository;
use crate::dashboard::SalesDataset;

/// Caches the full dataset so each request only filters and aggregates.
///
/// The slot is guarded by an async mutex; concurrent first requests wait
/// on the same load instead of issuing their own query.
#[derive(Clone)]
pub struct SalesCache {
    repository: SalesRepository,
    ttl: Option<Duration>,
    slot: Arc<Mutex<Option<Arc<SalesDataset>>>>,
}

impl SalesCache {
    pub fn new(repository: SalesRepository, ttl: Option<Duration>) -> Self {
        Self {
            repository,
            ttl,
            slot: Arc::new(Mutex::new(None)),
        }
    }

    /// Cached dataset, loading it on first use or after the TTL expired
    pub async fn get(&self) -> AppResult<Arc<SalesDataset>> {
        let mut slot = self.slot.lock().await;

        if let Some(dataset) = slot.as_ref() {
            let expired = self
                .ttl
                .is_some_and(|ttl| dataset.loaded_at().elapsed() >= ttl);
            if !expired {
                return Ok(dataset.clone());
            }
            tracing::info!("Sales cache expired, reloading");
        }

        let records = self.repository.load_all().await?;
        let dataset = Arc::new(SalesDataset::new(records));
        tracing::info!(
            rows = dataset.len(),
            branches = dataset.branches().len(),
            months = dataset.months().len(),
            "Sales dataset cached"
        );
        *slot = Some(dataset.clone());
        Ok(dataset)
    }

    /// Drop the cached copy; the next `get` reloads from the database
    pub async fn invalidate(&self) {
        let previous = self.slot.lock().await.take();
        if previous.is_some() {
            tracing::info!("Sales cache invalidated");
        }
    }

    /// Whether a dataset is currently cached
    pub async fn is_loaded(&self) -> bool {
        self.slot.lock().await.is_some()
    }
}

impl std::fmt::Debug for SalesCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SalesCache")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
