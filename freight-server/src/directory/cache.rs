//! Caching layer for city lookups.
//!
//! Resolving a city is the only directory call made on every request, so
//! its results are memoised per normalised (city, region) key. Failed
//! lookups are not cached.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::{GeoPoint, NodeKind, TransportNode};

use super::NodeDirectory;
use super::error::DirectoryError;

/// Cache key: lowercased city and optional lowercased region.
type CityKey = (String, Option<String>);

/// Cached city lookup.
type CityEntry = Arc<Vec<Arc<TransportNode>>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl CacheConfig {
    /// Set a custom TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(10 * 60),
            max_capacity: 1000,
        }
    }
}

fn city_key(city: &str, region: Option<&str>) -> CityKey {
    (
        city.trim().to_lowercase(),
        region
            .map(|r| r.trim().to_lowercase())
            .filter(|r| !r.is_empty()),
    )
}

/// Node directory with memoised city lookups.
///
/// Wraps any `NodeDirectory`; proximity and locate queries pass through.
pub struct CachedDirectory<D> {
    inner: D,
    cities: MokaCache<CityKey, CityEntry>,
}

impl<D: NodeDirectory> CachedDirectory<D> {
    /// Create a new cached directory.
    pub fn new(inner: D, config: &CacheConfig) -> Self {
        let cities = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, cities }
    }

    /// Access the underlying directory for operations that bypass cache.
    pub fn inner(&self) -> &D {
        &self.inner
    }

    /// Get cache statistics.
    pub fn cache_entry_count(&self) -> u64 {
        self.cities.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.cities.invalidate_all();
    }
}

impl<D: NodeDirectory> NodeDirectory for CachedDirectory<D> {
    async fn resolve_city_nodes(
        &self,
        city: &str,
        region: Option<&str>,
    ) -> Result<Vec<Arc<TransportNode>>, DirectoryError> {
        let key = city_key(city, region);

        // Try cache first
        if let Some(cached) = self.cities.get(&key).await {
            trace!(city, "city lookup served from cache");
            return Ok(cached.as_ref().clone());
        }

        let nodes = self.inner.resolve_city_nodes(city, region).await?;
        self.cities.insert(key, Arc::new(nodes.clone())).await;

        Ok(nodes)
    }

    async fn nearest_nodes(
        &self,
        point: GeoPoint,
        kind: Option<NodeKind>,
        limit: usize,
    ) -> Result<Vec<Arc<TransportNode>>, DirectoryError> {
        self.inner.nearest_nodes(point, kind, limit).await
    }

    async fn locate_city(&self, city: &str) -> Result<Option<GeoPoint>, DirectoryError> {
        self.inner.locate_city(city).await
    }
}
