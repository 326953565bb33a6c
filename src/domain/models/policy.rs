//! Traversal strategy and cycle-handling policy enumerations.

use serde::{Deserialize, Serialize};

/// Order in which the supply chain is explored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraversalMode {
    /// Follow each input to its end before the next sibling
    #[default]
    DepthFirst,
    /// Expand level by level
    BreadthFirst,
    /// Explore the highest-contribution inputs first
    Weighted,
}

impl TraversalMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DepthFirst => "depth_first",
            Self::BreadthFirst => "breadth_first",
            Self::Weighted => "weighted",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "depth_first" | "dfs" => Some(Self::DepthFirst),
            "breadth_first" | "bfs" => Some(Self::BreadthFirst),
            "weighted" => Some(Self::Weighted),
            _ => None,
        }
    }
}

impl std::fmt::Display for TraversalMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the traversal does when a branch revisits a PO already on its path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CyclePolicy {
    /// Record the break point and stop the branch without penalty
    BreakAtFirst,
    /// Penalise every node already on the path, then stop the branch
    #[default]
    Degradation,
    /// Penalise only the cyclic segment so aggregation blends it with the rest
    WeightedAverage,
}

impl CyclePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BreakAtFirst => "break_at_first",
            Self::Degradation => "degradation",
            Self::WeightedAverage => "weighted_average",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "break_at_first" | "break" => Some(Self::BreakAtFirst),
            "degradation" | "degrade" => Some(Self::Degradation),
            "weighted_average" => Some(Self::WeightedAverage),
            _ => None,
        }
    }

    /// Whether the policy applies a multiplicative penalty at all.
    pub fn degrades(&self) -> bool {
        !matches!(self, Self::BreakAtFirst)
    }
}

impl std::fmt::Display for CyclePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_round_trip_names() {
        for mode in [
            TraversalMode::DepthFirst,
            TraversalMode::BreadthFirst,
            TraversalMode::Weighted,
        ] {
            assert_eq!(TraversalMode::from_str(mode.as_str()), Some(mode));
        }
        assert_eq!(TraversalMode::from_str("BFS"), Some(TraversalMode::BreadthFirst));
        assert_eq!(TraversalMode::from_str("random"), None);
    }

    #[test]
    fn test_policy_parsing_and_defaults() {
        assert_eq!(CyclePolicy::default(), CyclePolicy::Degradation);
        assert_eq!(
            CyclePolicy::from_str("weighted-average"),
            Some(CyclePolicy::WeightedAverage)
        );
        assert!(!CyclePolicy::BreakAtFirst.degrades());
        assert!(CyclePolicy::Degradation.degrades());
    }
}
