//! Path domain model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::node::Node;

/// Path-level scores produced by aggregation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PathScores {
    pub ttm: f64,
    pub ttp: f64,
    pub confidence: f64,
}

/// An ordered root-to-leaf sequence of nodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub nodes: Vec<Node>,
    /// True iff at least one node on the path triggered cycle handling.
    pub has_cycles: bool,
    /// PO ids at which a cycle was detected and the branch was broken.
    pub cycle_break_points: Vec<Uuid>,
    pub path_ttm_score: Option<f64>,
    pub path_ttp_score: Option<f64>,
    pub path_confidence: Option<f64>,
    /// Accumulated input-contribution weight (weighted traversal only).
    pub total_weight: f64,
}

impl Path {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self {
            nodes,
            ..Default::default()
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> Option<&Node> {
        self.nodes.first()
    }

    pub fn leaf(&self) -> Option<&Node> {
        self.nodes.last()
    }

    /// Aggregated scores, once the path has been through aggregation.
    pub fn scores(&self) -> Option<PathScores> {
        Some(PathScores {
            ttm: self.path_ttm_score?,
            ttp: self.path_ttp_score?,
            confidence: self.path_confidence?,
        })
    }

    pub(crate) fn set_scores(&mut self, scores: PathScores) {
        self.path_ttm_score = Some(scores.ttm);
        self.path_ttp_score = Some(scores.ttp);
        self.path_confidence = Some(scores.confidence);
    }

    /// PO ids on this path, root first.
    pub fn po_ids(&self) -> impl Iterator<Item = Uuid> + '_ {
        self.nodes.iter().map(|n| n.po_id)
    }

    /// Deepest node depth on this path.
    pub fn max_depth(&self) -> Option<u32> {
        self.nodes.iter().map(|n| n.depth).max()
    }
}
