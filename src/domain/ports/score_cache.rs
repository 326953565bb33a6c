use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::TransparencyResult;

/// Cache key under which a root PO's result is stored.
pub fn cache_key(po_id: Uuid) -> String {
    format!("transparency_scores:{po_id}")
}

/// Port for the key-value store that memoises finished results.
///
/// Expiry is the adapter's concern; the engine never consults the cache.
pub trait ScoreCache: Send + Sync {
    /// Look up a cached result
    fn get(&self, key: &str) -> DomainResult<Option<TransparencyResult>>;

    /// Store a result under the given key
    fn put(&self, key: &str, result: &TransparencyResult) -> DomainResult<()>;

    /// Drop a cached result
    fn invalidate(&self, key: &str) -> DomainResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_format() {
        let id = Uuid::from_u128(1);
        assert_eq!(
            cache_key(id),
            "transparency_scores:00000000-0000-0000-0000-000000000001"
        );
    }
}
