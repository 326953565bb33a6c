//! Transparency engine: traverse, score, aggregate, assemble.

use std::collections::HashSet;
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::{EngineConfig, Node, Path, PathScores, TransparencyResult};
use crate::domain::ports::PoDetailProvider;
use crate::services::confidence_calculator::ConfidenceCalculator;
use crate::services::graph_traversal::{GraphTraversal, TraversalOutcome, TraversalSettings};
use crate::services::score_aggregator::ScoreAggregator;
use crate::services::score_calculator::ScoreCalculator;

/// Synchronous, single-call orchestrator.
///
/// Holds configuration only; every call to [`TransparencyEngine::calculate`]
/// owns its traversal state, so one engine may be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct TransparencyEngine {
    config: EngineConfig,
    traversal: GraphTraversal,
    calculator: ScoreCalculator,
    confidence: ConfidenceCalculator,
    aggregator: ScoreAggregator,
}

impl TransparencyEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            traversal: GraphTraversal::new(TraversalSettings::from(&config)),
            config,
            calculator: ScoreCalculator::new(),
            confidence: ConfidenceCalculator::new(),
            aggregator: ScoreAggregator::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Score pipeline for one node: base scores, degradation, then confidence.
    ///
    /// Confidence is computed last so it sees the degraded base scores.
    pub fn score_node(&self, node: Node) -> Node {
        self.confidence.apply(self.calculator.score(node))
    }

    /// Compute the transparency result for `root_po_id`.
    ///
    /// Missing data and cycles never fail the call; only provider errors do.
    #[instrument(skip(self, provider), fields(po_id = %root_po_id))]
    pub fn calculate<P>(&self, root_po_id: Uuid, provider: &P) -> DomainResult<TransparencyResult>
    where
        P: PoDetailProvider + ?Sized,
    {
        let started = Instant::now();
        let calculated_at = Utc::now();

        let outcome = self.traversal.traverse(
            root_po_id,
            |po, depth| Node::from_purchase_order(po, depth).visited(calculated_at),
            provider,
        )?;

        if outcome.paths.is_empty() {
            let duration_ms = elapsed_ms(started);
            warn!(%root_po_id, "root purchase order could not be resolved");
            return Ok(TransparencyResult::unresolved(root_po_id, calculated_at, duration_ms));
        }

        let TraversalOutcome {
            paths,
            unresolved_po_ids,
            malformed_sources,
            truncated_branches,
            nodes_built,
            ..
        } = outcome;

        let mut paths: Vec<Path> = paths
            .into_iter()
            .map(|mut path| {
                path.nodes = path.nodes.into_iter().map(|n| self.score_node(n)).collect();
                self.aggregator.aggregate_path_scores(&mut path);
                path
            })
            .collect();

        let primary_index = self.aggregator.primary_path_index(&paths).unwrap_or(0);
        let primary_path = paths.remove(primary_index);
        let alternative_paths = paths;
        let scores = primary_path.scores().unwrap_or_default();

        let circular_references_detected = std::iter::once(&primary_path)
            .chain(&alternative_paths)
            .flat_map(|p| p.cycle_break_points.iter())
            .collect::<HashSet<_>>()
            .len();

        let mut critical_gaps = primary_path_gaps(&primary_path);
        critical_gaps.extend(
            unresolved_po_ids
                .iter()
                .map(|id| format!("Source purchase order {id} could not be resolved")),
        );
        critical_gaps.extend(
            malformed_sources
                .iter()
                .map(|(po_id, raw)| format!("Purchase order {po_id} references malformed source id '{raw}'")),
        );
        dedup_in_order(&mut critical_gaps);

        if truncated_branches > 0 {
            warn!(
                truncated_branches,
                max_paths = self.config.max_paths,
                "supply chain exceeded the path ceiling, some branches were not analysed"
            );
        }

        let traced_percentage = round2(scores.ttp * 100.0);
        let result = TransparencyResult {
            po_id: root_po_id,
            ttm_score: scores.ttm,
            ttp_score: scores.ttp,
            confidence_level: scores.confidence,
            traced_percentage,
            untraced_percentage: 100.0 - traced_percentage,
            total_nodes_analyzed: nodes_built,
            circular_references_detected,
            data_gaps_identified: critical_gaps.len(),
            improvement_potential: improvement_potential(scores),
            primary_path,
            alternative_paths,
            critical_gaps,
            calculated_at,
            calculation_duration_ms: elapsed_ms(started),
        };

        info!(
            po_id = %root_po_id,
            ttm = result.ttm_score,
            ttp = result.ttp_score,
            confidence = result.confidence_level,
            paths = result.alternative_paths.len() + 1,
            duration_ms = result.calculation_duration_ms,
            "transparency calculation completed"
        );
        Ok(result)
    }
}

/// Human-readable gaps found on the primary path.
fn primary_path_gaps(path: &Path) -> Vec<String> {
    let mut gaps = Vec::new();
    for node in &path.nodes {
        let label = format!("{} ({})", display_po(node), node.company_type);
        if node.has_input_gap() {
            gaps.push(format!("{label} declares no input materials"));
        } else if node.input_materials.iter().any(|m| !m.is_linked()) {
            gaps.push(format!("{label} has input materials without a linked source purchase order"));
        }
        if node.is_originator() {
            if !node.has_origin_data {
                gaps.push(format!("{label} is missing origin data"));
            } else if !node.has_geographic_coordinates {
                gaps.push(format!("{label} is missing geographic coordinates"));
            }
        }
    }
    debug!(gaps = gaps.len(), "collected primary path gaps");
    gaps
}

fn display_po(node: &Node) -> String {
    if node.po_number.trim().is_empty() {
        format!("PO {}", node.po_id)
    } else {
        node.po_number.clone()
    }
}

fn dedup_in_order(items: &mut Vec<String>) {
    let mut seen = HashSet::new();
    items.retain(|item| seen.insert(item.clone()));
}

fn improvement_potential(scores: PathScores) -> f64 {
    (1.0 - (scores.ttm + scores.ttp) / 2.0).clamp(0.0, 1.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{CompanyType, CyclePolicy};
    use crate::services::fixtures::{id, intermediary, originator, processor, store};

    #[test]
    fn test_two_node_chain() {
        let engine = TransparencyEngine::default();
        let graph = store(vec![processor(1, &[2]), originator(2)]);

        let result = engine.calculate(id(1), &graph).unwrap();

        assert!(result.ttm_score >= 0.7);
        assert!(result.ttp_score >= 0.8);
        assert!(result.confidence_level >= 0.7);
        assert!(result.traced_percentage >= 80.0);
        assert!((result.traced_percentage + result.untraced_percentage - 100.0).abs() < 1e-9);
        assert_eq!(result.total_nodes_analyzed, 2);
        assert!(result.alternative_paths.is_empty());
        assert!(result.critical_gaps.is_empty());
        assert_eq!(result.data_gaps_identified, 0);
    }

    #[test]
    fn test_unresolved_root() {
        let engine = TransparencyEngine::default();
        let result = engine.calculate(id(1), &store(vec![])).unwrap();

        assert_eq!(result.ttm_score, 0.0);
        assert_eq!(result.untraced_percentage, 100.0);
        assert_eq!(result.data_gaps_identified, 1);
    }

    #[test]
    fn test_cycle_is_reported() {
        let engine = TransparencyEngine::default();
        let graph = store(vec![processor(1, &[2]), processor(2, &[3]), processor(3, &[1])]);

        let result = engine.calculate(id(1), &graph).unwrap();

        assert_eq!(result.circular_references_detected, 1);
        assert!(result.primary_path.has_cycles);
        assert!(result.primary_path.nodes.iter().all(|n| n.is_circular));
    }

    #[test]
    fn test_scoring_pipeline_runs_confidence_after_degradation() {
        let engine = TransparencyEngine::default();
        let graph = store(vec![originator(1)]);
        let po = graph.get_po_details(id(1)).unwrap().unwrap();

        let mut degraded = Node::from_purchase_order(&po, 0);
        degraded.degradation_factor = 0.5;
        let full = engine.score_node(Node::from_purchase_order(&po, 0));
        let half = engine.score_node(degraded);

        assert!((half.base_ttm_score - full.base_ttm_score * 0.5).abs() < 1e-12);
        assert!((half.confidence_level - full.confidence_level * 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_gaps_from_missing_branch_and_dead_end() {
        let engine = TransparencyEngine::default();
        let graph = store(vec![
            processor(1, &[2, 99]),
            intermediary(2, CompanyType::Trader, &[]),
        ]);

        let result = engine.calculate(id(1), &graph).unwrap();

        assert_eq!(result.data_gaps_identified, result.critical_gaps.len());
        assert!(result
            .critical_gaps
            .iter()
            .any(|g| g.contains("PO-0002") && g.contains("declares no input materials")));
        assert!(result
            .critical_gaps
            .iter()
            .any(|g| g.contains(&id(99).to_string())));
    }

    #[test]
    fn test_break_at_first_keeps_full_factors() {
        let engine = TransparencyEngine::new(EngineConfig {
            cycle_policy: CyclePolicy::BreakAtFirst,
            ..Default::default()
        });
        let graph = store(vec![processor(1, &[2]), processor(2, &[1])]);

        let result = engine.calculate(id(1), &graph).unwrap();

        assert_eq!(result.circular_references_detected, 1);
        assert!(result
            .primary_path
            .nodes
            .iter()
            .all(|n| n.degradation_factor == 1.0));
    }

    #[test]
    fn test_total_nodes_counts_shared_prefix_once() {
        let engine = TransparencyEngine::default();
        let graph = store(vec![processor(1, &[2, 3, 4]), originator(2), originator(3), originator(4)]);

        let result = engine.calculate(id(1), &graph).unwrap();

        assert_eq!(result.alternative_paths.len(), 2);
        assert_eq!(result.total_nodes_analyzed, 4);
    }

    #[test]
    fn test_improvement_potential() {
        let scores = PathScores {
            ttm: 0.6,
            ttp: 0.8,
            confidence: 0.5,
        };
        assert!((improvement_potential(scores) - 0.3).abs() < 1e-12);
        assert_eq!(round2(89.456), 89.46);
    }
}
