//! `ScoreCache` backed by a moka TTL cache.

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;
use tracing::debug;

use crate::domain::errors::DomainResult;
use crate::domain::models::{CacheConfig, TransparencyResult};
use crate::domain::ports::ScoreCache;

/// Process-local result cache with time-to-live expiry.
///
/// Results are stored behind `Arc` so hits only clone on the way out.
#[derive(Clone)]
pub struct MokaScoreCache {
    results: Cache<String, Arc<TransparencyResult>>,
}

impl MokaScoreCache {
    pub fn new(config: &CacheConfig) -> Self {
        Self::with_ttl(Duration::from_secs(config.ttl_seconds), config.max_capacity)
    }

    /// Create with an explicit TTL and capacity.
    pub fn with_ttl(ttl: Duration, max_capacity: u64) -> Self {
        let results = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(ttl)
            .build();
        Self { results }
    }

    /// Approximate number of cached results.
    pub fn entry_count(&self) -> u64 {
        self.results.run_pending_tasks();
        self.results.entry_count()
    }

    pub fn invalidate_all(&self) {
        self.results.invalidate_all();
    }
}

impl std::fmt::Debug for MokaScoreCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaScoreCache")
            .field("entries", &self.results.entry_count())
            .finish()
    }
}

impl ScoreCache for MokaScoreCache {
    fn get(&self, key: &str) -> DomainResult<Option<TransparencyResult>> {
        let hit = self.results.get(key);
        debug!(key, hit = hit.is_some(), "score cache lookup");
        Ok(hit.map(|r| (*r).clone()))
    }

    fn put(&self, key: &str, result: &TransparencyResult) -> DomainResult<()> {
        self.results.insert(key.to_string(), Arc::new(result.clone()));
        Ok(())
    }

    fn invalidate(&self, key: &str) -> DomainResult<()> {
        self.results.invalidate(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::cache_key;
    use chrono::Utc;
    use uuid::Uuid;

    fn create_test_result(n: u128) -> TransparencyResult {
        TransparencyResult::unresolved(Uuid::from_u128(n), Utc::now(), 1.0)
    }

    #[test]
    fn test_put_then_get() {
        let cache = MokaScoreCache::new(&CacheConfig::default());
        let result = create_test_result(1);
        let key = cache_key(result.po_id);

        assert!(cache.get(&key).unwrap().is_none());
        cache.put(&key, &result).unwrap();
        assert_eq!(cache.get(&key).unwrap(), Some(result));
        assert_eq!(cache.entry_count(), 1);
    }

    #[test]
    fn test_invalidate() {
        let cache = MokaScoreCache::new(&CacheConfig::default());
        let result = create_test_result(2);
        let key = cache_key(result.po_id);

        cache.put(&key, &result).unwrap();
        cache.invalidate(&key).unwrap();
        assert!(cache.get(&key).unwrap().is_none());
    }

    #[test]
    fn test_entries_expire() {
        let cache = MokaScoreCache::with_ttl(Duration::from_millis(20), 10);
        let result = create_test_result(3);
        let key = cache_key(result.po_id);

        cache.put(&key, &result).unwrap();
        std::thread::sleep(Duration::from_millis(60));
        assert!(cache.get(&key).unwrap().is_none());
    }
}
