//! Null score cache implementation.
//!
//! Used when caching is disabled but the service still needs a
//! ScoreCache implementation.

use crate::domain::errors::DomainResult;
use crate::domain::models::TransparencyResult;
use super::ScoreCache;

/// A no-op cache that stores nothing.
#[derive(Debug, Clone, Default)]
pub struct NullScoreCache;

impl NullScoreCache {
    pub fn new() -> Self {
        Self
    }
}

impl ScoreCache for NullScoreCache {
    fn get(&self, _key: &str) -> DomainResult<Option<TransparencyResult>> {
        Ok(None)
    }

    fn put(&self, _key: &str, _result: &TransparencyResult) -> DomainResult<()> {
        Ok(())
    }

    fn invalidate(&self, _key: &str) -> DomainResult<()> {
        Ok(())
    }
}
