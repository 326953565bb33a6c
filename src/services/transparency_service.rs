//! Caller-facing transparency operations.
//!
//! Wraps the engine with result caching and exposes the diagnostic
//! entrypoints (cycle listing, improvement suggestions).

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::{ImprovementSuggestion, TransparencyResult};
use crate::domain::ports::{cache_key, MaterialsLookup, PoDetailProvider, ScoreCache};
use crate::services::cycle_detector::{CycleDetector, CycleImpactReport};
use crate::services::engine::TransparencyEngine;
use crate::services::improvement_advisor::ImprovementAdvisor;

pub struct TransparencyService<P, M>
where
    P: PoDetailProvider + ?Sized,
    M: MaterialsLookup + ?Sized,
{
    provider: Arc<P>,
    materials: Arc<M>,
    cache: Arc<dyn ScoreCache>,
    engine: TransparencyEngine,
    detector: CycleDetector,
    advisor: ImprovementAdvisor,
}

impl<P, M> TransparencyService<P, M>
where
    P: PoDetailProvider + ?Sized,
    M: MaterialsLookup + ?Sized,
{
    pub fn new(
        provider: Arc<P>,
        materials: Arc<M>,
        cache: Arc<dyn ScoreCache>,
        engine: TransparencyEngine,
    ) -> Self {
        Self {
            provider,
            materials,
            cache,
            engine,
            detector: CycleDetector::new(),
            advisor: ImprovementAdvisor::new(),
        }
    }

    pub fn engine(&self) -> &TransparencyEngine {
        &self.engine
    }

    /// Transparency scores for `po_id`.
    ///
    /// With `use_cache` a cached result is returned when present. Every
    /// freshly computed result is written back to the cache. Cache failures
    /// are logged and never fail the calculation.
    #[instrument(skip(self), fields(po_id = %po_id))]
    pub fn calculate_transparency_scores(
        &self,
        po_id: Uuid,
        use_cache: bool,
    ) -> DomainResult<TransparencyResult> {
        let key = cache_key(po_id);

        if use_cache {
            match self.cache.get(&key) {
                Ok(Some(result)) => {
                    debug!(%po_id, "returning cached transparency result");
                    return Ok(result);
                }
                Ok(None) => {}
                Err(e) => warn!(%po_id, error = %e, "score cache lookup failed, recalculating"),
            }
        }

        let result = self.engine.calculate(po_id, self.provider.as_ref())?;

        if let Err(e) = self.cache.put(&key, &result) {
            warn!(%po_id, error = %e, "failed to cache transparency result");
        }
        Ok(result)
    }

    /// Entry point for scheduled recalculation; `force_recalculation` bypasses the cache.
    pub fn recalculate(&self, po_id: Uuid, force_recalculation: bool) -> DomainResult<TransparencyResult> {
        self.calculate_transparency_scores(po_id, !force_recalculation)
    }

    /// Every PO id taking part in a cycle reachable from `po_id`, deduplicated.
    #[instrument(skip(self), fields(po_id = %po_id))]
    pub fn detect_circular_references(&self, po_id: Uuid) -> DomainResult<Vec<Uuid>> {
        let cycles = self.detector.detect_cycles(po_id, self.materials.as_ref())?;
        let mut seen = HashSet::new();
        Ok(cycles
            .into_iter()
            .flatten()
            .filter(|id| seen.insert(*id))
            .collect())
    }

    /// Cycles reachable from `po_id` with their severity and footprint.
    pub fn analyze_cycles(&self, po_id: Uuid) -> DomainResult<CycleImpactReport> {
        let cycles = self.detector.detect_cycles(po_id, self.materials.as_ref())?;
        self.detector
            .analyze_cycle_impact(&cycles, self.provider.as_ref())
    }

    /// Suggestions derived from a freshly computed result; nothing is cached.
    #[instrument(skip(self), fields(po_id = %po_id))]
    pub fn get_transparency_improvement_suggestions(
        &self,
        po_id: Uuid,
    ) -> DomainResult<Vec<ImprovementSuggestion>> {
        let result = self.engine.calculate(po_id, self.provider.as_ref())?;
        Ok(self.advisor.suggest(&result))
    }

    /// Drop the cached result for `po_id`.
    pub fn invalidate(&self, po_id: Uuid) -> DomainResult<()> {
        self.cache.invalidate(&cache_key(po_id))
    }
}
