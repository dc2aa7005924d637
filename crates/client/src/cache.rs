//! Reference-data caching using Moka.
//!
//! Tax schemes and contractors are read by every budget and production view
//! but change rarely. Lists are kept for a configurable time and dropped as
//! soon as the client writes to the corresponding endpoint.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use filmbudget_core::catalog::Contractor;
use filmbudget_core::tax::TaxScheme;
use filmbudget_shared::CacheConfig;
use moka::future::Cache;
use tracing::debug;

use crate::error::ClientResult;

/// Cached reference lists.
#[derive(Clone)]
pub struct ReferenceCache {
    tax_schemes: Cache<(), Arc<Vec<TaxScheme>>>,
    contractors: Cache<(), Arc<Vec<Contractor>>>,
}

impl std::fmt::Debug for ReferenceCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReferenceCache")
            .field("tax_schemes", &self.tax_schemes.entry_count())
            .field("contractors", &self.contractors.entry_count())
            .finish()
    }
}

impl Default for ReferenceCache {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}

impl ReferenceCache {
    /// Creates a cache with the configured capacity and TTL.
    #[must_use]
    pub fn new(config: &CacheConfig) -> Self {
        let ttl = Duration::from_secs(config.ttl_secs);
        Self {
            tax_schemes: Cache::builder()
                .max_capacity(config.max_capacity)
                .time_to_live(ttl)
                .build(),
            contractors: Cache::builder()
                .max_capacity(config.max_capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Cached tax schemes, loading them with `load` on a miss.
    pub async fn tax_schemes<F, Fut>(&self, load: F) -> ClientResult<Arc<Vec<TaxScheme>>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ClientResult<Vec<TaxScheme>>>,
    {
        get_or_load(&self.tax_schemes, "tax_schemes", load).await
    }

    /// Cached contractors, loading them with `load` on a miss.
    pub async fn contractors<F, Fut>(&self, load: F) -> ClientResult<Arc<Vec<Contractor>>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ClientResult<Vec<Contractor>>>,
    {
        get_or_load(&self.contractors, "contractors", load).await
    }

    /// Drops the cached tax schemes.
    pub async fn invalidate_tax_schemes(&self) {
        self.tax_schemes.invalidate(&()).await;
    }

    /// Drops the cached contractors.
    pub async fn invalidate_contractors(&self) {
        self.contractors.invalidate(&()).await;
    }

    /// Drops everything.
    pub fn clear_all(&self) {
        self.tax_schemes.invalidate_all();
        self.contractors.invalidate_all();
    }
}

async fn get_or_load<T, F, Fut>(
    cache: &Cache<(), Arc<Vec<T>>>,
    name: &'static str,
    load: F,
) -> ClientResult<Arc<Vec<T>>>
where
    T: Send + Sync + 'static,
    F: FnOnce() -> Fut,
    Fut: Future<Output = ClientResult<Vec<T>>>,
{
    if let Some(hit) = cache.get(&()).await {
        debug!(cache = name, "Reference cache hit");
        return Ok(hit);
    }

    debug!(cache = name, "Reference cache miss");
    let fresh = Arc::new(load().await?);
    cache.insert((), Arc::clone(&fresh)).await;
    Ok(fresh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use filmbudget_core::tax::TaxScheme;
    use filmbudget_shared::types::TaxSchemeId;

    fn scheme(name: &str) -> TaxScheme {
        TaxScheme {
            id: TaxSchemeId::new(),
            name: name.into(),
            is_system: false,
            components: vec![],
        }
    }

    #[tokio::test]
    async fn test_second_read_is_served_from_cache() {
        let cache = ReferenceCache::default();
        let loads = AtomicUsize::new(0);
        let counter = &loads;
        let load = move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(vec![scheme("Без налога")])
        };

        let first = cache.tax_schemes(load).await.unwrap();
        let second = cache.tax_schemes(load).await.unwrap();

        assert_eq!(loads.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_invalidate_forces_reload() {
        let cache = ReferenceCache::default();
        let loads = AtomicUsize::new(0);
        let counter = &loads;
        let load = move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(vec![scheme("СЗ 6%")])
        };

        cache.tax_schemes(load).await.unwrap();
        cache.invalidate_tax_schemes().await;
        cache.tax_schemes(load).await.unwrap();

        assert_eq!(loads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failed_load_is_not_cached() {
        let cache = ReferenceCache::default();

        let failed = cache
            .contractors(|| async { Err(crate::ClientError::Decode("eof".into())) })
            .await;
        let loaded = cache.contractors(|| async { Ok(vec![]) }).await.unwrap();

        assert!(failed.is_err());
        assert!(loaded.is_empty());
    }
}
