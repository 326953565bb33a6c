//! End-to-end scoring scenarios through the public engine API.

mod common;

use common::{id, material, originator, processor, setup_test_logging, store, with_inputs};
use transparency_engine::domain::models::{CompanyType, CyclePolicy, TraversalMode};
use transparency_engine::services::ScoreCalculator;
use transparency_engine::{EngineConfig, Node, TransparencyEngine};

#[test]
fn test_two_node_chain_is_well_traced() {
    setup_test_logging();
    let graph = store(vec![processor(1, &[2]), originator(2)]);

    let result = TransparencyEngine::default().calculate(id(1), &graph).unwrap();

    assert!(result.ttm_score >= 0.7, "ttm {}", result.ttm_score);
    assert!(result.ttp_score >= 0.8, "ttp {}", result.ttp_score);
    assert!(result.confidence_level >= 0.7, "confidence {}", result.confidence_level);
    assert!(result.traced_percentage >= 80.0);
    assert_eq!(result.primary_path.len(), 2);
    assert_eq!(result.primary_path.nodes[0].po_id, id(1));
    assert_eq!(result.primary_path.nodes[1].depth, 1);
}

#[test]
fn test_unresolved_root() {
    let result = TransparencyEngine::default()
        .calculate(id(42), &store(vec![]))
        .unwrap();

    assert_eq!(result.ttm_score, 0.0);
    assert_eq!(result.ttp_score, 0.0);
    assert_eq!(result.confidence_level, 0.0);
    assert_eq!(result.untraced_percentage, 100.0);
    assert_eq!(result.data_gaps_identified, 1);
    assert!(result.primary_path.is_empty());
}

#[test]
fn test_three_node_cycle_under_degradation() {
    setup_test_logging();
    let graph = store(vec![processor(1, &[2]), processor(2, &[3]), processor(3, &[1])]);
    let engine = TransparencyEngine::new(EngineConfig {
        cycle_policy: CyclePolicy::Degradation,
        ..Default::default()
    });

    let result = engine.calculate(id(1), &graph).unwrap();

    assert!(result.circular_references_detected >= 1);
    assert!(result.primary_path.has_cycles);
    assert_eq!(result.primary_path.cycle_break_points, vec![id(1)]);
    assert!(result
        .primary_path
        .nodes
        .iter()
        .all(|n| (n.degradation_factor - 0.8).abs() < 1e-12));
}

#[test]
fn test_cycle_scores_lower_than_acyclic_equivalent() {
    let cyclic = store(vec![processor(1, &[2]), processor(2, &[1])]);
    let acyclic = store(vec![processor(1, &[2]), processor(2, &[3])]);
    let engine = TransparencyEngine::default();

    let with_cycle = engine.calculate(id(1), &cyclic).unwrap();
    let without_cycle = engine.calculate(id(1), &acyclic).unwrap();

    assert!(with_cycle.ttm_score < without_cycle.ttm_score);
}

#[test]
fn test_input_traceability_depends_on_company_type() {
    let calculator = ScoreCalculator::new();
    let as_originator = Node::from_purchase_order(&with_inputs(1, CompanyType::Originator, vec![]), 0);
    let as_processor = Node::from_purchase_order(&with_inputs(1, CompanyType::Processor, vec![]), 0);

    assert_eq!(calculator.input_traceability(&as_originator), 1.0);
    assert_eq!(calculator.input_traceability(&as_processor), 0.0);
}

#[test]
fn test_weighted_mode_prefers_dominant_supplier() {
    let graph = store(vec![
        with_inputs(1, CompanyType::Processor, vec![material(2, 20.0), material(3, 80.0)]),
        processor(2, &[]),
        originator(3),
    ]);
    let engine = TransparencyEngine::new(EngineConfig {
        traversal_mode: TraversalMode::Weighted,
        ..Default::default()
    });

    let result = engine.calculate(id(1), &graph).unwrap();

    assert_eq!(result.alternative_paths.len(), 1);
    let ids: Vec<_> = result.primary_path.po_ids().collect();
    assert_eq!(ids, vec![id(1), id(3)]);
    assert!(result.primary_path.total_weight > result.alternative_paths[0].total_weight);
}

#[test]
fn test_max_depth_bounds_every_path() {
    let chain: Vec<_> = (1..=8).map(|n| processor(n, &[n + 1])).collect();
    let engine = TransparencyEngine::new(EngineConfig {
        max_depth: 3,
        ..Default::default()
    });

    let result = engine.calculate(id(1), &store(chain)).unwrap();

    for path in result.all_paths() {
        assert!(path.nodes.iter().all(|n| n.depth <= 3));
    }
    assert_eq!(result.primary_path.len(), 4);
}

#[test]
fn test_modes_agree_on_path_set() {
    let graph = store(vec![
        processor(1, &[2, 3]),
        processor(2, &[4, 5]),
        originator(3),
        originator(4),
        originator(5),
    ]);

    let mut path_sets = Vec::new();
    for mode in [TraversalMode::DepthFirst, TraversalMode::BreadthFirst, TraversalMode::Weighted] {
        let engine = TransparencyEngine::new(EngineConfig {
            traversal_mode: mode,
            ..Default::default()
        });
        let result = engine.calculate(id(1), &graph).unwrap();
        let mut ids: Vec<Vec<_>> = result.all_paths().map(|p| p.po_ids().collect()).collect();
        ids.sort();
        path_sets.push(ids);
    }

    assert_eq!(path_sets[0], path_sets[1]);
    assert_eq!(path_sets[1], path_sets[2]);
    assert_eq!(path_sets[0].len(), 3);
}

#[test]
fn test_result_serializes_to_json() {
    let graph = store(vec![processor(1, &[2]), originator(2)]);
    let result = TransparencyEngine::default().calculate(id(1), &graph).unwrap();

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["po_id"], serde_json::json!(id(1).to_string()));
    assert!(json["primary_path"]["nodes"].is_array());
}

#[test]
fn test_scores_ignore_declaration_order_of_missing_input() {
    let trader = || with_inputs(2, CompanyType::Trader, vec![]);
    let engine = TransparencyEngine::default();

    let declared_first = engine
        .calculate(id(1), &store(vec![processor(1, &[2, 99]), trader()]))
        .unwrap();
    let declared_last = engine
        .calculate(id(1), &store(vec![processor(1, &[99, 2]), trader()]))
        .unwrap();

    for result in [&declared_first, &declared_last] {
        assert!(result.alternative_paths.is_empty());
        assert_eq!(result.primary_path.po_ids().collect::<Vec<_>>(), vec![id(1), id(2)]);
        assert_eq!(result.total_nodes_analyzed, 2);
    }
    assert_eq!(declared_first.ttm_score, declared_last.ttm_score);
    assert_eq!(declared_first.ttp_score, declared_last.ttp_score);
    assert_eq!(declared_first.confidence_level, declared_last.confidence_level);
}

#[test]
fn test_depth_and_breadth_first_agree_on_cyclic_graph() {
    // 1 -> [2, 3], 2 -> 1, 3 is an originator
    let graph = store(vec![processor(1, &[2, 3]), processor(2, &[1]), originator(3)]);

    let results: Vec<_> = [TraversalMode::DepthFirst, TraversalMode::BreadthFirst]
        .into_iter()
        .map(|mode| {
            TransparencyEngine::new(EngineConfig {
                traversal_mode: mode,
                ..Default::default()
            })
            .calculate(id(1), &graph)
            .unwrap()
        })
        .collect();

    let (dfs, bfs) = (&results[0], &results[1]);
    assert_eq!(dfs.ttm_score, bfs.ttm_score);
    assert_eq!(dfs.ttp_score, bfs.ttp_score);
    assert_eq!(dfs.confidence_level, bfs.confidence_level);
    assert_eq!(dfs.circular_references_detected, 1);
    for result in &results {
        let clean = result
            .all_paths()
            .find(|p| p.po_ids().collect::<Vec<_>>() == vec![id(1), id(3)])
            .expect("path to the originator");
        assert!(!clean.has_cycles);
        assert!(clean.nodes.iter().all(|n| n.degradation_factor == 1.0));
    }
}
