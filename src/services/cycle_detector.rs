use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::SourceReference;
use crate::domain::ports::{MaterialsLookup, PoDetailProvider};

/// How disruptive a cycle is, judged by how many POs it spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleSeverity {
    High,
    Medium,
    Low,
}

impl CycleSeverity {
    /// `high` for ≤2 POs, `medium` for ≤4, otherwise `low`.
    pub fn from_length(length: usize) -> Self {
        match length {
            0..=2 => Self::High,
            3..=4 => Self::Medium,
            _ => Self::Low,
        }
    }
}

/// One detected cycle with its classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleImpact {
    pub po_ids: Vec<Uuid>,
    pub length: usize,
    pub severity: CycleSeverity,
}

/// Reporting summary over a set of cycles. Never fed back into scoring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CycleImpactReport {
    pub cycles: Vec<CycleImpact>,
    pub total_quantity: f64,
    pub affected_companies: BTreeSet<Uuid>,
    pub affected_products: BTreeSet<Uuid>,
}

impl CycleImpactReport {
    pub fn highest_severity(&self) -> Option<CycleSeverity> {
        self.cycles.iter().map(|c| c.severity).min()
    }
}

/// Number of distinct POs in a closed cycle (`[A, B, A]` → 2).
pub fn cycle_length(cycle: &[Uuid]) -> usize {
    match cycle {
        [] => 0,
        [first, .., last] if first == last => cycle.len() - 1,
        _ => cycle.len(),
    }
}

struct Frame {
    po_id: Uuid,
    sources: Vec<Uuid>,
    next: usize,
}

/// Service for finding cycles in the PO → input-material graph.
///
/// Runs independently of traversal and scoring: it only follows
/// `source_po_id` links through a [`MaterialsLookup`].
#[derive(Debug, Clone, Default)]
pub struct CycleDetector;

impl CycleDetector {
    pub fn new() -> Self {
        Self
    }

    /// Every cycle reachable from `start`.
    ///
    /// Each cycle lists PO ids in traversal order and ends with a repeat of
    /// its first element. The walk uses an explicit stack, so deep chains
    /// cannot exhaust the call stack.
    pub fn detect_cycles<M: MaterialsLookup + ?Sized>(
        &self,
        start: Uuid,
        lookup: &M,
    ) -> DomainResult<Vec<Vec<Uuid>>> {
        let mut visited = HashSet::new();
        let mut on_stack = HashSet::new();
        let mut current_path: Vec<Uuid> = Vec::new();
        let mut cycles = Vec::new();

        visited.insert(start);
        on_stack.insert(start);
        current_path.push(start);
        let mut stack = vec![Frame {
            po_id: start,
            sources: linked_sources(start, lookup)?,
            next: 0,
        }];

        loop {
            let next_source = match stack.last_mut() {
                None => break,
                Some(frame) if frame.next < frame.sources.len() => {
                    frame.next += 1;
                    Some(frame.sources[frame.next - 1])
                }
                Some(_) => None,
            };

            match next_source {
                Some(source) if on_stack.contains(&source) => {
                    if let Some(cycle_start) = current_path.iter().position(|&id| id == source) {
                        let mut cycle = current_path[cycle_start..].to_vec();
                        cycle.push(source);
                        debug!(cycle_len = cycle.len() - 1, "cycle detected");
                        cycles.push(cycle);
                    }
                }
                Some(source) if !visited.contains(&source) => {
                    let sources = linked_sources(source, lookup)?;
                    visited.insert(source);
                    on_stack.insert(source);
                    current_path.push(source);
                    stack.push(Frame {
                        po_id: source,
                        sources,
                        next: 0,
                    });
                }
                Some(_) => {}
                None => {
                    if let Some(frame) = stack.pop() {
                        on_stack.remove(&frame.po_id);
                        current_path.pop();
                    }
                }
            }
        }

        Ok(cycles)
    }

    /// The cycle spanning the fewest POs, first found on ties.
    pub fn find_shortest_cycle<M: MaterialsLookup + ?Sized>(
        &self,
        start: Uuid,
        lookup: &M,
    ) -> DomainResult<Option<Vec<Uuid>>> {
        Ok(self
            .detect_cycles(start, lookup)?
            .into_iter()
            .min_by_key(|c| cycle_length(c)))
    }

    /// Classify cycles and total up what they involve.
    ///
    /// POs that appear in several cycles are counted once.
    pub fn analyze_cycle_impact<P: PoDetailProvider + ?Sized>(
        &self,
        cycles: &[Vec<Uuid>],
        provider: &P,
    ) -> DomainResult<CycleImpactReport> {
        let mut report = CycleImpactReport::default();
        let mut counted = HashSet::new();

        for cycle in cycles {
            let length = cycle_length(cycle);
            report.cycles.push(CycleImpact {
                po_ids: cycle.clone(),
                length,
                severity: CycleSeverity::from_length(length),
            });

            for &po_id in cycle {
                if !counted.insert(po_id) {
                    continue;
                }
                if let Some(po) = provider.get_po_details(po_id)? {
                    report.total_quantity += po.quantity;
                    report.affected_companies.insert(po.seller_company.id);
                    report.affected_products.insert(po.product.id);
                }
            }
        }

        Ok(report)
    }
}

/// Parseable upstream ids declared on `po_id`, in declaration order.
fn linked_sources<M: MaterialsLookup + ?Sized>(po_id: Uuid, lookup: &M) -> DomainResult<Vec<Uuid>> {
    let materials = lookup.get_input_materials(po_id)?;
    let mut sources = Vec::with_capacity(materials.len());

    for material in &materials {
        match material.source_reference() {
            SourceReference::Linked(id) => sources.push(id),
            SourceReference::Malformed(raw) => {
                warn!(%po_id, source = %raw, "skipping malformed source purchase order id");
            }
            SourceReference::Missing => {}
        }
    }

    Ok(sources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fixtures::{id, originator, processor, store};

    #[test]
    fn test_three_node_cycle() {
        let detector = CycleDetector::new();
        let graph = store(vec![processor(1, &[2]), processor(2, &[3]), processor(3, &[1])]);

        let cycles = detector.detect_cycles(id(1), &graph).unwrap();

        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0], vec![id(1), id(2), id(3), id(1)]);
        assert_eq!(cycle_length(&cycles[0]), 3);
    }

    #[test]
    fn test_acyclic_chain_has_no_cycles() {
        let detector = CycleDetector::new();
        let graph = store(vec![
            processor(1, &[2]),
            processor(2, &[3]),
            processor(3, &[4]),
            originator(4),
        ]);

        assert!(detector.detect_cycles(id(1), &graph).unwrap().is_empty());
    }

    #[test]
    fn test_self_loop() {
        let detector = CycleDetector::new();
        let graph = store(vec![processor(1, &[1])]);

        let cycles = detector.detect_cycles(id(1), &graph).unwrap();
        assert_eq!(cycles, vec![vec![id(1), id(1)]]);
        assert_eq!(cycle_length(&cycles[0]), 1);
    }

    #[test]
    fn test_cycle_not_through_start() {
        let detector = CycleDetector::new();
        // 1 -> 2 -> 3 -> 2
        let graph = store(vec![processor(1, &[2]), processor(2, &[3]), processor(3, &[2])]);

        let cycles = detector.detect_cycles(id(1), &graph).unwrap();
        assert_eq!(cycles, vec![vec![id(2), id(3), id(2)]]);
    }

    #[test]
    fn test_malformed_source_is_skipped() {
        let detector = CycleDetector::new();
        let mut root = processor(1, &[2]);
        if let Some(t) = root
            .confirmation_data
            .as_mut()
            .and_then(|c| c.transformation_data.as_mut())
        {
            t.input_materials[0].source_po_id = Some("not-a-uuid".to_string());
        }
        let graph = store(vec![root, processor(2, &[1])]);

        assert!(detector.detect_cycles(id(1), &graph).unwrap().is_empty());
    }

    #[test]
    fn test_find_shortest_cycle() {
        let detector = CycleDetector::new();
        // 1 -> 2 -> 3 -> 1 and 1 -> 4 -> 1
        let graph = store(vec![
            processor(1, &[2, 4]),
            processor(2, &[3]),
            processor(3, &[1]),
            processor(4, &[1]),
        ]);

        let shortest = detector.find_shortest_cycle(id(1), &graph).unwrap().unwrap();
        assert_eq!(shortest, vec![id(1), id(4), id(1)]);
    }

    #[test]
    fn test_analyze_cycle_impact() {
        let detector = CycleDetector::new();
        let graph = store(vec![processor(1, &[2]), processor(2, &[1])]);
        let cycles = detector.detect_cycles(id(1), &graph).unwrap();

        let report = detector.analyze_cycle_impact(&cycles, &graph).unwrap();

        assert_eq!(report.cycles.len(), 1);
        assert_eq!(report.cycles[0].length, 2);
        assert_eq!(report.cycles[0].severity, CycleSeverity::High);
        assert!((report.total_quantity - 2000.0).abs() < f64::EPSILON);
        assert_eq!(report.affected_companies.len(), 2);
        assert_eq!(report.affected_products.len(), 2);
        assert_eq!(report.highest_severity(), Some(CycleSeverity::High));
    }

    #[test]
    fn test_severity_thresholds() {
        assert_eq!(CycleSeverity::from_length(1), CycleSeverity::High);
        assert_eq!(CycleSeverity::from_length(2), CycleSeverity::High);
        assert_eq!(CycleSeverity::from_length(4), CycleSeverity::Medium);
        assert_eq!(CycleSeverity::from_length(5), CycleSeverity::Low);
    }
}
