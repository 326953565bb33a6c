//! Services layer.
//!
//! The calculation pipeline (traversal, scoring, aggregation) plus the
//! caller-facing service that adds caching and diagnostics on top.

pub mod confidence_calculator;
pub mod cycle_detector;
pub mod engine;
pub mod graph_traversal;
pub mod improvement_advisor;
pub mod score_aggregator;
pub mod score_calculator;
pub mod transparency_service;

#[cfg(test)]
pub(crate) mod fixtures;

pub use confidence_calculator::ConfidenceCalculator;
pub use cycle_detector::{cycle_length, CycleDetector, CycleImpact, CycleImpactReport, CycleSeverity};
pub use engine::TransparencyEngine;
pub use graph_traversal::{GraphTraversal, TraversalOutcome, TraversalSettings};
pub use improvement_advisor::ImprovementAdvisor;
pub use score_aggregator::ScoreAggregator;
pub use score_calculator::ScoreCalculator;
pub use transparency_service::TransparencyService;
