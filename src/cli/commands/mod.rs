//! CLI command implementations.

pub mod calculate;
pub mod cycles;
pub mod suggest;
pub mod validate_config;

use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use tracing::debug;

use crate::adapters::cache::MokaScoreCache;
use crate::adapters::memory::InMemoryPurchaseOrderStore;
use crate::domain::models::{CacheConfig, EngineConfig};
use crate::domain::ports::{NullScoreCache, ScoreCache};
use crate::services::{TransparencyEngine, TransparencyService};

/// Service type the commands run against.
pub type FixtureService = TransparencyService<InMemoryPurchaseOrderStore, InMemoryPurchaseOrderStore>;

/// Load `fixture` and wire a service around it.
pub fn build_service(
    fixture: &Path,
    engine: EngineConfig,
    cache: &CacheConfig,
    use_cache: bool,
) -> Result<FixtureService> {
    // Loading problems are input errors, not calculation failures
    let store = InMemoryPurchaseOrderStore::load(fixture).map_err(|e| {
        anyhow!("Failed to load purchase orders from {}: {e}", fixture.display())
    })?;
    let store = Arc::new(store);

    let cache: Arc<dyn ScoreCache> = if use_cache && cache.enabled {
        Arc::new(MokaScoreCache::new(cache))
    } else {
        Arc::new(NullScoreCache::new())
    };
    debug!(orders = store.len(), ?engine, "built transparency service");

    Ok(TransparencyService::new(
        store.clone(),
        store,
        cache,
        TransparencyEngine::new(engine),
    ))
}
