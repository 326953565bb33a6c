//! Primary path selection and path-level score aggregation.

use crate::domain::models::{clamp_score, Node, Path, PathScores};

const CYCLE_PRIORITY_PENALTY: f64 = 0.9;
const MAX_LENGTH_BONUS: f64 = 1.2;
const MIN_CYCLE_PENALTY: f64 = 0.7;
const LONG_CHAIN_BONUS: f64 = 1.05;
const LEAF_ORIGIN_BONUS: f64 = 1.1;
const TRACEABLE_PATH_BONUS: f64 = 1.1;
const TRACEABLE_SHARE_THRESHOLD: f64 = 0.8;

/// Chooses the representative path and rolls node scores up to path scores.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreAggregator;

impl ScoreAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Index of the highest-priority path; the first one wins ties.
    pub fn primary_path_index(&self, paths: &[Path]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (index, path) in paths.iter().enumerate() {
            let priority = self.path_priority(path);
            match best {
                Some((_, top)) if priority <= top => {}
                _ => best = Some((index, priority)),
            }
        }
        best.map(|(index, _)| index)
    }

    /// Copy of the primary path, or an empty path when there are none.
    pub fn select_primary_path(&self, paths: &[Path]) -> Path {
        self.primary_path_index(paths)
            .map(|i| paths[i].clone())
            .unwrap_or_default()
    }

    /// Ranking score used only for primary-path selection.
    pub fn path_priority(&self, path: &Path) -> f64 {
        if path.is_empty() {
            return 0.0;
        }
        let n = path.len() as f64;
        let mean = |f: fn(&Node) -> f64| path.nodes.iter().map(f).sum::<f64>() / n;

        let base = (mean(|x| x.base_ttm_score) + mean(|x| x.base_ttp_score)) / 2.0;
        let confidence_multiplier = 0.5 + 0.5 * mean(|x| x.confidence_level);
        let cycle_penalty = if path.has_cycles {
            CYCLE_PRIORITY_PENALTY
        } else {
            1.0
        };
        let length_bonus = (1.0 + 0.02 * n).min(MAX_LENGTH_BONUS);

        clamp_score(base * confidence_multiplier * cycle_penalty * length_bonus)
    }

    /// Position-weighted path scores, written back onto `path`.
    ///
    /// Reads only node fields, so repeated calls on an unchanged path give
    /// identical results.
    pub fn aggregate_path_scores(&self, path: &mut Path) -> PathScores {
        let scores = self.compute_path_scores(path);
        path.set_scores(scores);
        scores
    }

    fn compute_path_scores(&self, path: &Path) -> PathScores {
        if path.is_empty() {
            return PathScores::default();
        }

        let n = path.len();
        let mut weight_sum = 0.0;
        let mut ttm = 0.0;
        let mut ttp = 0.0;
        let mut confidence = 0.0;

        for (position, node) in path.nodes.iter().enumerate() {
            let weight = position_weight(position, n) * quality_multiplier(node);
            weight_sum += weight;
            ttm += weight * node.base_ttm_score;
            ttp += weight * node.base_ttp_score;
            confidence += weight * node.confidence_level;
        }

        if weight_sum <= 0.0 {
            return PathScores::default();
        }
        ttm /= weight_sum;
        ttp /= weight_sum;
        confidence /= weight_sum;

        let mut shared = 1.0;
        if path.has_cycles {
            let breaks = path.cycle_break_points.len() as f64;
            shared *= (1.0 - 0.1 * breaks).max(MIN_CYCLE_PENALTY);
        }
        if n > 3 {
            shared *= LONG_CHAIN_BONUS;
        }
        ttm *= shared;
        ttp *= shared;
        confidence *= shared;

        if path
            .leaf()
            .is_some_and(|leaf| leaf.has_origin_data && leaf.has_geographic_coordinates)
        {
            ttm *= LEAF_ORIGIN_BONUS;
        }

        let traceable = path.nodes.iter().filter(|x| x.is_traceable()).count() as f64;
        if traceable / n as f64 > TRACEABLE_SHARE_THRESHOLD {
            ttp *= TRACEABLE_PATH_BONUS;
        }

        PathScores {
            ttm: clamp_score(ttm),
            ttp: clamp_score(ttp),
            confidence: clamp_score(confidence),
        }
    }
}

/// Grows from 0.5 at the root to 1.0 at the leaf.
fn position_weight(position: usize, len: usize) -> f64 {
    if len <= 1 {
        1.0
    } else {
        0.5 + 0.5 * position as f64 / (len - 1) as f64
    }
}

fn quality_multiplier(node: &Node) -> f64 {
    let mut multiplier = 1.0;
    if node.data_completeness_score > 0.8 {
        multiplier *= 1.2;
    } else if node.data_completeness_score < 0.3 {
        multiplier *= 0.8;
    }
    if node.has_certifications {
        multiplier *= 1.1;
    }
    if node.is_circular {
        multiplier *= 0.7;
    }
    multiplier
}
