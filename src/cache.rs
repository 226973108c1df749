//! In-memory response cache for lookups.
//!
//! Caches ranked results keyed by the (trimmed term, limit) pair. Case is
//! kept: dictionaries treat "Polish" and "polish" as different headwords.
//! Uses [`moka`] for async-friendly caching with TTL and automatic
//! eviction. The cache is owned by the server; the translation core never
//! sees it.

use std::time::Duration;

use moka::future::Cache;

use kotoba_translate::RankedResult;

/// Maximum number of cached result sets.
const MAX_CACHE_ENTRIES: u64 = 1_000;

/// Cache key: trimmed term plus requested limit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Trimmed term, case preserved.
    term: String,
    limit: usize,
}

impl CacheKey {
    /// Build a key; `" cat "` and `"cat"` map to the same entry.
    pub fn new(term: &str, limit: usize) -> Self {
        Self {
            term: term.trim().to_owned(),
            limit,
        }
    }
}

/// Lookup cache. Cloning shares the underlying store.
#[derive(Clone)]
pub struct LookupCache {
    inner: Option<Cache<CacheKey, RankedResult>>,
}

impl LookupCache {
    /// Create a cache with the given TTL. A TTL of `0` disables caching.
    pub fn new(ttl_seconds: u64) -> Self {
        let inner = (ttl_seconds > 0).then(|| {
            Cache::builder()
                .max_capacity(MAX_CACHE_ENTRIES)
                .time_to_live(Duration::from_secs(ttl_seconds))
                .build()
        });
        Self { inner }
    }

    /// Returns `true` if this cache stores results.
    pub fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    /// Look up cached results. `None` on miss or when disabled.
    pub async fn get(&self, key: &CacheKey) -> Option<RankedResult> {
        match &self.inner {
            Some(cache) => cache.get(key).await,
            None => None,
        }
    }

    /// Store a successful result.
    pub async fn insert(&self, key: CacheKey, result: RankedResult) {
        if let Some(cache) = &self.inner {
            cache.insert(key, result).await;
        }
    }
}
