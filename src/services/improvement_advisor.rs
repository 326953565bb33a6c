//! Improvement suggestions derived from a finished result.

use std::collections::HashSet;

use uuid::Uuid;

use crate::domain::models::{
    EffortEstimate, ImprovementSuggestion, Node, SuggestionPriority, TransparencyResult,
};

pub const CATEGORY_ORIGIN_DATA: &str = "origin_data";
pub const CATEGORY_GEOLOCATION: &str = "geolocation";
pub const CATEGORY_CERTIFICATION: &str = "certification";
pub const CATEGORY_INPUT_MATERIALS: &str = "input_materials";
pub const CATEGORY_CIRCULAR_REFERENCES: &str = "circular_references";
pub const CATEGORY_VERIFICATION: &str = "verification";

/// Turns a [`TransparencyResult`] into prioritised, actionable suggestions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImprovementAdvisor;

impl ImprovementAdvisor {
    pub fn new() -> Self {
        Self
    }

    /// Suggestions sorted by priority, then by estimated impact (largest first).
    pub fn suggest(&self, result: &TransparencyResult) -> Vec<ImprovementSuggestion> {
        let nodes = distinct_nodes(result);
        if nodes.is_empty() {
            return vec![ImprovementSuggestion {
                category: CATEGORY_INPUT_MATERIALS.to_string(),
                priority: SuggestionPriority::High,
                description: format!(
                    "Purchase order {} could not be resolved; confirm it and declare its input materials",
                    result.po_id
                ),
                impact_estimate: 1.0,
                effort_estimate: EffortEstimate::Medium,
                affected_node_ids: vec![result.po_id],
            }];
        }

        let total = nodes.len() as f64;
        let mut suggestions = Vec::new();
        let mut push = |category: &str,
                        priority: SuggestionPriority,
                        description: String,
                        weight: f64,
                        effort: EffortEstimate,
                        affected: Vec<Uuid>| {
            if affected.is_empty() {
                return;
            }
            suggestions.push(ImprovementSuggestion {
                category: category.to_string(),
                priority,
                description,
                impact_estimate: (weight * affected.len() as f64 / total).clamp(0.0, 1.0),
                effort_estimate: effort,
                affected_node_ids: affected,
            });
        };

        let gaps = select(&nodes, |n| {
            n.has_input_gap() || n.input_materials.iter().any(|m| !m.is_linked())
        });
        push(
            CATEGORY_INPUT_MATERIALS,
            SuggestionPriority::High,
            format!(
                "Link input materials to their source purchase orders for {} purchase order(s)",
                gaps.len()
            ),
            0.4,
            EffortEstimate::Medium,
            gaps,
        );

        let missing_origin = select(&nodes, |n| !n.has_origin_data);
        push(
            CATEGORY_ORIGIN_DATA,
            if result.ttp_score < 0.5 {
                SuggestionPriority::High
            } else {
                SuggestionPriority::Medium
            },
            format!(
                "Capture origin data (farm or plantation identifiers) for {} purchase order(s)",
                missing_origin.len()
            ),
            0.25,
            EffortEstimate::Medium,
            missing_origin,
        );

        let missing_geo = select(&nodes, |n| n.has_origin_data && !n.has_geographic_coordinates);
        push(
            CATEGORY_GEOLOCATION,
            SuggestionPriority::Medium,
            format!(
                "Add geographic coordinates to the origin data of {} purchase order(s)",
                missing_geo.len()
            ),
            0.2,
            EffortEstimate::Low,
            missing_geo,
        );

        let uncertified = select(&nodes, |n| !n.has_certifications);
        push(
            CATEGORY_CERTIFICATION,
            if result.ttm_score < 0.6 {
                SuggestionPriority::Medium
            } else {
                SuggestionPriority::Low
            },
            format!(
                "Obtain sustainability certifications (e.g. RSPO, NDPE) for {} supplier(s)",
                uncertified.len()
            ),
            0.3,
            EffortEstimate::High,
            uncertified,
        );

        let unverified = select(&nodes, |n| {
            n.input_materials
                .iter()
                .any(|m| !m.supplier_verified || !m.traceability_verified)
        });
        push(
            CATEGORY_VERIFICATION,
            SuggestionPriority::Medium,
            format!(
                "Verify suppliers and input traceability for {} purchase order(s)",
                unverified.len()
            ),
            0.3,
            EffortEstimate::Medium,
            unverified,
        );

        if result.circular_references_detected > 0 {
            let mut seen = HashSet::new();
            let break_points: Vec<Uuid> = result
                .all_paths()
                .flat_map(|p| p.cycle_break_points.iter().copied())
                .filter(|id| seen.insert(*id))
                .collect();
            suggestions.push(ImprovementSuggestion {
                category: CATEGORY_CIRCULAR_REFERENCES.to_string(),
                priority: SuggestionPriority::High,
                description: format!(
                    "Resolve {} circular purchase order reference(s) in the supply chain",
                    result.circular_references_detected
                ),
                impact_estimate: (0.1 * result.circular_references_detected as f64).min(0.3),
                effort_estimate: EffortEstimate::High,
                affected_node_ids: break_points,
            });
        }

        suggestions.sort_by(|a, b| {
            a.priority
                .cmp(&b.priority)
                .then_with(|| b.impact_estimate.total_cmp(&a.impact_estimate))
        });
        suggestions
    }
}

/// First occurrence of every PO across all paths, primary path first.
fn distinct_nodes(result: &TransparencyResult) -> Vec<&Node> {
    let mut seen = HashSet::new();
    result
        .all_paths()
        .flat_map(|p| p.nodes.iter())
        .filter(|n| seen.insert(n.po_id))
        .collect()
}

fn select(nodes: &[&Node], predicate: impl Fn(&Node) -> bool) -> Vec<Uuid> {
    nodes
        .iter()
        .filter(|n| predicate(n))
        .map(|n| n.po_id)
        .collect()
}
