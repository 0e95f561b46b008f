//! Process-wide caches for external lookups.
//!
//! Travel-time and place-search results are cached with a TTL so that
//! repeated requests for the same area don't hit the providers again.
//! Entries are independent and idempotent to recompute: an evicted or stale
//! entry just triggers a re-fetch.
//!
//! Caches are constructed once at startup and handed to the providers that
//! use them. Cloning a `TtlCache` yields another handle to the same storage.

use std::hash::Hash;
use std::time::Duration;

use moka::future::Cache as MokaCache;

/// Configuration for the caches.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries per cache.
    pub max_capacity: u64,
}

impl CacheConfig {
    /// Set a custom TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set the maximum capacity.
    pub fn with_max_capacity(mut self, max_capacity: u64) -> Self {
        self.max_capacity = max_capacity;
        self
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60 * 60),
            max_capacity: 10_000,
        }
    }
}

/// A concurrent map with TTL eviction.
pub struct TtlCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    entries: MokaCache<K, V>,
}

impl<K, V> TtlCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let entries = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { entries }
    }

    /// Get a cached entry.
    pub async fn get(&self, key: &K) -> Option<V> {
        self.entries.get(key).await
    }

    /// Insert an entry, replacing any previous value.
    pub async fn insert(&self, key: K, value: V) {
        self.entries.insert(key, value).await;
    }
}

impl<K, V> Clone for TtlCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(3600));
        assert_eq!(config.max_capacity, 10_000);
    }

    #[test]
    fn config_builder() {
        let config = CacheConfig::default()
            .with_ttl(Duration::from_secs(5))
            .with_max_capacity(10);
        assert_eq!(config.ttl, Duration::from_secs(5));
        assert_eq!(config.max_capacity, 10);
    }

    #[tokio::test]
    async fn insert_then_get() {
        let cache: TtlCache<u32, String> = TtlCache::new(&CacheConfig::default());
        assert_eq!(cache.get(&1).await, None);

        cache.insert(1, "one".to_string()).await;
        assert_eq!(cache.get(&1).await.as_deref(), Some("one"));
    }

    #[tokio::test]
    async fn clones_share_storage() {
        let cache: TtlCache<u32, u32> = TtlCache::new(&CacheConfig::default());
        let other = cache.clone();
        cache.insert(7, 49).await;
        assert_eq!(other.get(&7).await, Some(49));
    }

    #[tokio::test]
    async fn entries_expire_after_ttl() {
        let config = CacheConfig::default().with_ttl(Duration::from_millis(50));
        let cache: TtlCache<u32, u32> = TtlCache::new(&config);
        cache.insert(1, 1).await;
        assert_eq!(cache.get(&1).await, Some(1));

        tokio::time::sleep(Duration::from_millis(120)).await;
        assert_eq!(cache.get(&1).await, None);
    }
}
