//! Transparency result model.
//!
//! One result is produced per engine invocation and never mutated afterwards.
//! Callers (cache layer, CLI) own it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::path::Path;

/// Coarse band for a confidence value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
    VeryLow,
}

impl ConfidenceLevel {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 0.8 => Self::High,
            s if s >= 0.5 => Self::Medium,
            s if s >= 0.2 => Self::Low,
            _ => Self::VeryLow,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::VeryLow => "very_low",
        }
    }
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Engine output for one root purchase order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransparencyResult {
    pub po_id: Uuid,
    pub ttm_score: f64,
    pub ttp_score: f64,
    pub confidence_level: f64,
    pub traced_percentage: f64,
    pub untraced_percentage: f64,
    pub total_nodes_analyzed: usize,
    pub circular_references_detected: usize,
    pub data_gaps_identified: usize,
    pub primary_path: Path,
    pub alternative_paths: Vec<Path>,
    pub improvement_potential: f64,
    pub critical_gaps: Vec<String>,
    pub calculated_at: DateTime<Utc>,
    pub calculation_duration_ms: f64,
}

impl TransparencyResult {
    /// Result for a root purchase order that could not be resolved.
    pub fn unresolved(po_id: Uuid, calculated_at: DateTime<Utc>, duration_ms: f64) -> Self {
        Self {
            po_id,
            ttm_score: 0.0,
            ttp_score: 0.0,
            confidence_level: 0.0,
            traced_percentage: 0.0,
            untraced_percentage: 100.0,
            total_nodes_analyzed: 0,
            circular_references_detected: 0,
            data_gaps_identified: 1,
            primary_path: Path::default(),
            alternative_paths: Vec::new(),
            improvement_potential: 1.0,
            critical_gaps: vec![format!("Purchase order {po_id} could not be resolved")],
            calculated_at,
            calculation_duration_ms: duration_ms,
        }
    }

    pub fn confidence_band(&self) -> ConfidenceLevel {
        ConfidenceLevel::from_score(self.confidence_level)
    }

    /// Every discovered path, primary first.
    pub fn all_paths(&self) -> impl Iterator<Item = &Path> {
        std::iter::once(&self.primary_path).chain(self.alternative_paths.iter())
    }
}
