//! Base TTM/TTP scoring for a single node.

use std::collections::HashSet;

use uuid::Uuid;

use crate::domain::models::node::normalize_certification;
use crate::domain::models::{clamp_score, InputMaterial, Node};

const TTM_ORIGIN_WEIGHT: f64 = 0.25;
const TTM_GEO_WEIGHT: f64 = 0.20;
const TTM_CERTIFICATION_WEIGHT: f64 = 0.30;
const TTM_COMPLETENESS_WEIGHT: f64 = 0.25;

const TTP_INPUT_TRACEABILITY_WEIGHT: f64 = 0.40;
const TTP_SUPPLIER_VERIFICATION_WEIGHT: f64 = 0.30;
const TTP_PROCESS_DOCUMENTATION_WEIGHT: f64 = 0.30;

const MAX_CERTIFICATION_COUNT_BONUS: f64 = 0.2;
const MAX_HIGH_VALUE_BONUS: f64 = 0.3;
const MAX_ALIGNMENT_BONUS: f64 = 0.2;

/// Computes a node's base transparency scores from its declared attributes.
///
/// Every method is pure; [`ScoreCalculator::score`] returns a new node.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreCalculator;

impl ScoreCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Populate base scores, then apply the node's degradation factor.
    pub fn score(&self, node: Node) -> Node {
        let ttm = self.calculate_ttm(&node);
        let ttp = self.calculate_ttp(&node);
        self.apply_degradation_factor(node.with_base_scores(ttm, ttp))
    }

    /// Transparency to Mill.
    pub fn calculate_ttm(&self, node: &Node) -> f64 {
        let origin = flag(node.has_origin_data);
        let geo = flag(node.has_geographic_coordinates);

        clamp_score(
            TTM_ORIGIN_WEIGHT * origin
                + TTM_GEO_WEIGHT * geo
                + TTM_CERTIFICATION_WEIGHT * self.certification_score(node)
                + TTM_COMPLETENESS_WEIGHT * node.data_completeness_score,
        )
    }

    /// Transparency to Plantation.
    pub fn calculate_ttp(&self, node: &Node) -> f64 {
        clamp_score(
            TTP_INPUT_TRACEABILITY_WEIGHT * self.input_traceability(node)
                + TTP_SUPPLIER_VERIFICATION_WEIGHT * self.supplier_verification(node)
                + TTP_PROCESS_DOCUMENTATION_WEIGHT * self.process_documentation(node),
        )
    }

    /// Tier score plus bonuses for certification count and high-value certifications.
    pub fn certification_score(&self, node: &Node) -> f64 {
        let Some(tier) = node.certification_tier else {
            return 0.0;
        };
        let count_bonus = (0.05 * node.certification_count as f64).min(MAX_CERTIFICATION_COUNT_BONUS);
        let high_value_bonus =
            (0.1 * node.high_value_certification_count as f64).min(MAX_HIGH_VALUE_BONUS);

        clamp_score(tier.score() + count_bonus + high_value_bonus)
    }

    /// Share of inputs that are linked and verified, scaled by material quality.
    ///
    /// A node without inputs is fully traceable if it is an originator and a
    /// gap otherwise.
    pub fn input_traceability(&self, node: &Node) -> f64 {
        let materials = &node.input_materials;
        if materials.is_empty() {
            return flag(node.is_originator());
        }

        let total = materials.len() as f64;
        let traceable = materials
            .iter()
            .filter(|m| m.is_linked() && m.traceability_verified)
            .count() as f64;
        let quality = materials.iter().map(material_quality).sum::<f64>() / total;

        clamp_score(traceable / total * quality)
    }

    /// Verified share of distinct suppliers plus a certification-alignment bonus.
    pub fn supplier_verification(&self, node: &Node) -> f64 {
        let materials = &node.input_materials;
        if materials.is_empty() {
            return match (node.is_originator(), node.has_certifications) {
                (true, true) => 1.0,
                (true, false) => 0.5,
                (false, _) => 0.0,
            };
        }

        let mut suppliers: HashSet<Uuid> = HashSet::new();
        let mut verified: HashSet<Uuid> = HashSet::new();
        for material in materials {
            if let Some(supplier) = material.supplier_company_id {
                suppliers.insert(supplier);
                if material.supplier_verified {
                    verified.insert(supplier);
                }
            }
        }
        let verified_share = if suppliers.is_empty() {
            0.0
        } else {
            verified.len() as f64 / suppliers.len() as f64
        };

        let own: HashSet<String> = node.normalized_certifications().collect();
        let aligned = materials
            .iter()
            .filter(|m| {
                m.certifications
                    .iter()
                    .any(|c| own.contains(&normalize_certification(c)))
            })
            .count() as f64;
        let alignment_bonus = MAX_ALIGNMENT_BONUS * aligned / materials.len() as f64;

        clamp_score(verified_share + alignment_bonus)
    }

    /// Completeness-driven documentation score.
    pub fn process_documentation(&self, node: &Node) -> f64 {
        clamp_score(
            0.6 * node.data_completeness_score
                + 0.2 * flag(node.has_origin_data)
                + 0.1 * flag(node.has_geographic_coordinates)
                + 0.1 * flag(node.has_certifications),
        )
    }

    /// Multiply both base scores by the node's degradation factor.
    pub fn apply_degradation_factor(&self, mut node: Node) -> Node {
        if node.degradation_factor < 1.0 {
            node.base_ttm_score = clamp_score(node.base_ttm_score * node.degradation_factor);
            node.base_ttp_score = clamp_score(node.base_ttp_score * node.degradation_factor);
        }
        node
    }
}

fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

/// 0.5 plus 0.1 per declared descriptive field, capped at 1.
fn material_quality(material: &InputMaterial) -> f64 {
    (0.5 + 0.1 * material.descriptive_field_count() as f64).min(1.0)
}
