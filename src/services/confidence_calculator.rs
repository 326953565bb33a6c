//! Per-node confidence estimation.

use crate::domain::models::{clamp_score, CompanyType, Node};

const COMPLETENESS_WEIGHT: f64 = 0.30;
const FRESHNESS_WEIGHT: f64 = 0.20;
const VERIFICATION_WEIGHT: f64 = 0.25;
const RELIABILITY_WEIGHT: f64 = 0.25;

/// Estimates how much a node's scores can be trusted.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfidenceCalculator;

impl ConfidenceCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Confidence in `[0, 1]`, already multiplied by the degradation factor.
    pub fn calculate(&self, node: &Node) -> f64 {
        let raw = COMPLETENESS_WEIGHT * node.data_completeness_score
            + FRESHNESS_WEIGHT * self.data_freshness(node)
            + VERIFICATION_WEIGHT * self.verification_status(node)
            + RELIABILITY_WEIGHT * self.source_reliability(node);

        clamp_score(raw * node.degradation_factor)
    }

    /// Store the computed confidence on the node.
    pub fn apply(&self, node: Node) -> Node {
        let confidence = self.calculate(&node);
        node.with_confidence(confidence)
    }

    pub fn data_freshness(&self, node: &Node) -> f64 {
        if node.visited_at.is_some() {
            0.9
        } else {
            0.5
        }
    }

    pub fn verification_status(&self, node: &Node) -> f64 {
        let mut score = 0.0;
        if node.has_origin_data {
            score += 0.3;
        }
        if node.has_certifications {
            score += 0.4;
            if node.high_value_certification_count > 0 {
                score += 0.3;
            }
        }
        if node.has_geographic_coordinates {
            score += 0.2;
        }
        clamp_score(score)
    }

    pub fn source_reliability(&self, node: &Node) -> f64 {
        let base = match node.company_type {
            CompanyType::Originator => 0.8,
            CompanyType::Processor => 0.7,
            CompanyType::Brand => 0.6,
            CompanyType::Trader | CompanyType::Unknown => 0.5,
        };
        clamp_score(base + (0.05 * node.certification_count as f64).min(0.2))
    }
}
