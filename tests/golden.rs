//! Golden tests for the refinement kernel.
//!
//! These tests pin exact labelings on small graphs and verify determinism of
//! full runs.

use std::sync::Arc;

use wl_kernel::generate::{complete, cycle, path, star};
use wl_kernel::{
    parse_edge_list, random_graph, to_edge_list, Entity, GraphStore, InMemoryGraph, Label,
    NodeId, RefinementConfig, RefinementError, RefinementState, Refiner, Seeding, StepOutcome,
};

// ─────────────────────────────────────────────────────────────────────────────
// Test Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn node(id: u64) -> Entity {
    Entity::Node(NodeId::new(id))
}

fn pair(a: u64, b: u64) -> Entity {
    Entity::pair(NodeId::new(a), NodeId::new(b)).unwrap()
}

fn node_labels(state: &RefinementState) -> Vec<u32> {
    state
        .current_labels()
        .iter()
        .map(|(_, label)| label.get())
        .collect()
}

fn run_to_convergence(state: &mut RefinementState, graph: &InMemoryGraph) {
    // Every committed step grows the label count, so n + 1 steps is plenty.
    for _ in 0..=state.current_labels().len() {
        if !state.step(graph).unwrap().changed() {
            return;
        }
    }
    panic!("refinement did not converge");
}

/// A 6-cycle next to two triangles: every node has degree 2.
const HEXAGON_AND_TRIANGLES: &str =
    "[(1,2),(2,3),(3,4),(4,5),(5,6),(6,1)] [(1,2),(2,3),(3,1),(4,5),(5,6),(6,4)]";

// ─────────────────────────────────────────────────────────────────────────────
// 1-WL Scenarios
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_path_k1_splits_ends_from_middle() {
    let g = path(4);
    let mut state = RefinementState::initialize(1, &g).unwrap();
    assert_eq!(node_labels(&state), vec![0, 0, 0, 0]);

    let outcome = state.step(&g).unwrap();
    assert_eq!(outcome, StepOutcome::Changed { iteration: 1, label_count: 2 });
    // Leaves sort first: "0|0" < "0|0,0".
    assert_eq!(node_labels(&state), vec![0, 1, 1, 0]);

    let outcome = state.step(&g).unwrap();
    assert_eq!(outcome, StepOutcome::Unchanged { iteration: 1 });
    assert!(state.converged());
    assert_eq!(node_labels(&state), vec![0, 1, 1, 0]);
    assert_eq!(state.history().len(), 2);
}

#[test]
fn test_single_node_converges_at_zero() {
    let g = InMemoryGraph::from_parts([1], []).unwrap();
    let mut state = RefinementState::initialize(1, &g).unwrap();

    assert_eq!(state.label_count(), 1);
    assert_eq!(state.step(&g).unwrap(), StepOutcome::Unchanged { iteration: 0 });
    assert!(state.converged());
    assert_eq!(state.iteration(), 0);
}

#[test]
fn test_regular_graphs_never_split() {
    for g in [cycle(6), complete(5)] {
        let mut state = RefinementState::initialize(1, &g).unwrap();
        assert!(!state.step(&g).unwrap().changed());
        assert_eq!(state.label_count(), 1);
    }
}

#[test]
fn test_long_path_needs_half_its_length() {
    // Path of 7 nodes: classes {1,7} {2,6} {3,5} {4}.
    let g = path(7);
    let mut state = RefinementState::initialize(1, &g).unwrap();
    run_to_convergence(&mut state, &g);

    assert_eq!(state.label_count(), 4);
    assert_eq!(state.iteration(), 3);
    assert_eq!(state.label_of(&node(1)), state.label_of(&node(7)));
    assert_eq!(state.label_of(&node(3)), state.label_of(&node(5)));
    assert_ne!(state.label_of(&node(3)), state.label_of(&node(4)));
}

#[test]
fn test_degree_seeding_skips_first_split() {
    let g = star(5);
    let config = RefinementConfig::new(1).unwrap().with_seeding(Seeding::Degree);
    let mut state = RefinementState::with_config(config, &g).unwrap();

    assert_eq!(state.label_count(), 2);
    assert!(!state.step(&g).unwrap().changed());
}

// ─────────────────────────────────────────────────────────────────────────────
// 2-WL Scenarios
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_path_k2_seed_is_adjacency() {
    let g = path(4);
    let state = RefinementState::initialize(2, &g).unwrap();

    assert_eq!(state.current_labels().len(), 6);
    assert_eq!(state.label_count(), 2);
    let connected = state.label_of(&pair(1, 2));
    assert_eq!(state.label_of(&pair(2, 3)), connected);
    assert_eq!(state.label_of(&pair(3, 4)), connected);
    assert_ne!(state.label_of(&pair(1, 3)), connected);
    assert_eq!(state.label_of(&pair(1, 3)), state.label_of(&pair(1, 4)));
}

#[test]
fn test_path_k2_distinguishes_edges() {
    let g = path(4);
    let mut state = RefinementState::initialize(2, &g).unwrap();

    state.step(&g).unwrap();
    assert_ne!(state.label_of(&pair(1, 2)), state.label_of(&pair(2, 3)));
    assert_eq!(state.label_of(&pair(1, 2)), state.label_of(&pair(3, 4)));

    run_to_convergence(&mut state, &g);
    assert!(state.converged());
    assert_ne!(state.label_of(&pair(1, 2)), state.label_of(&pair(2, 3)));
}

#[test]
fn test_k2_separates_hexagon_from_triangles() {
    let g = parse_edge_list(HEXAGON_AND_TRIANGLES).unwrap().graph;
    assert_eq!(g.num_nodes(), 12);

    // Color refinement sees twelve identical nodes.
    let mut one = RefinementState::initialize(1, &g).unwrap();
    run_to_convergence(&mut one, &g);
    assert_eq!(one.label_count(), 1);

    // Triangle counting does not.
    let mut two = RefinementState::initialize(2, &g).unwrap();
    run_to_convergence(&mut two, &g);
    assert_ne!(two.label_of(&pair(1, 2)), two.label_of(&pair(7, 8)));
}

#[test]
fn test_k2_single_node_has_no_pairs() {
    let g = InMemoryGraph::from_parts([1], []).unwrap();
    let mut state = RefinementState::initialize(2, &g).unwrap();

    assert!(state.current_labels().is_empty());
    assert!(!state.step(&g).unwrap().changed());
}

// ─────────────────────────────────────────────────────────────────────────────
// Determinism
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_same_graph_same_report_100_runs() {
    let g = Arc::new(random_graph(25, 0.2, 7).unwrap());
    let refiner = Refiner::new(g, RefinementConfig::new(1).unwrap());
    let first = refiner.run().unwrap();

    for _ in 0..100 {
        let again = refiner.run().unwrap();
        assert_eq!(again.final_labels, first.final_labels);
        assert_eq!(again.generations, first.generations);
        assert_eq!(again.snapshot_id, first.snapshot_id);
        assert_eq!(again.params_hash, first.params_hash);
    }
}

#[test]
fn test_relabeled_input_same_partition_hashes() {
    // Same path written in two edge orders.
    let a = parse_edge_list("[(1,2),(2,3),(3,4),(4,5)]").unwrap().graph;
    let b = parse_edge_list("[(4,5),(3,4),(2,3),(1,2)]").unwrap().graph;

    let ra = Refiner::new(Arc::new(a), RefinementConfig::new(2).unwrap()).run().unwrap();
    let rb = Refiner::new(Arc::new(b), RefinementConfig::new(2).unwrap()).run().unwrap();
    assert_eq!(ra.generations, rb.generations);
    assert_eq!(ra.snapshot_id, rb.snapshot_id);
}

#[test]
fn test_config_change_changes_params_hash() {
    let g = Arc::new(path(5));
    let uniform = Refiner::new(g.clone(), RefinementConfig::new(1).unwrap()).run().unwrap();
    let degree = Refiner::new(
        g,
        RefinementConfig::new(1).unwrap().with_seeding(Seeding::Degree),
    )
    .run()
    .unwrap();

    assert_ne!(uniform.params_hash, degree.params_hash);
    assert_eq!(uniform.snapshot_id, degree.snapshot_id);
}

// ─────────────────────────────────────────────────────────────────────────────
// Driver
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_report_summarizes_every_generation() {
    let report = Refiner::new(Arc::new(path(7)), RefinementConfig::new(1).unwrap())
        .run()
        .unwrap();

    assert!(report.converged);
    assert_eq!(report.iterations, 3);
    assert_eq!(report.generations.len(), 4);
    let counts: Vec<usize> = report.generations.iter().map(|g| g.label_count).collect();
    assert_eq!(counts, vec![1, 2, 3, 4]);
    assert_eq!(report.final_class_sizes.values().sum::<usize>(), 7);
}

#[test]
fn test_iteration_cap_stops_early() {
    let config = RefinementConfig::new(1).unwrap().with_max_iterations(1);
    let report = Refiner::new(Arc::new(path(7)), config).run().unwrap();

    assert!(!report.converged);
    assert_eq!(report.iterations, 1);
    assert_eq!(report.generations.len(), 2);
}

#[test]
fn test_unsupported_dimension_rejected() {
    assert!(matches!(
        RefinementConfig::new(3),
        Err(RefinementError::UnsupportedDimension(3))
    ));
    assert!(matches!(
        RefinementState::initialize(0, &path(3)),
        Err(RefinementError::UnsupportedDimension(0))
    ));
}

#[test]
fn test_step_rejects_changed_graph() {
    let g = path(4);
    let mut state = RefinementState::initialize(1, &g).unwrap();

    let mut grown = g.clone();
    grown.add_edge(NodeId::new(1), NodeId::new(4)).unwrap();
    assert!(matches!(
        state.step(&grown),
        Err(RefinementError::SnapshotMismatch { .. })
    ));
    assert_eq!(state.iteration(), 0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Edge-List Fixtures
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_multi_block_offsets() {
    let parsed = parse_edge_list(HEXAGON_AND_TRIANGLES).unwrap();
    assert_eq!(parsed.blocks.len(), 2);
    assert_eq!(parsed.blocks[1].offset, 6);
    assert!(parsed.graph.is_adjacent(NodeId::new(9), NodeId::new(7)).unwrap());
    assert!(!parsed.graph.is_adjacent(NodeId::new(6), NodeId::new(7)).unwrap());
}

#[test]
fn test_edge_list_roundtrip_keeps_labels() {
    let g = random_graph(20, 0.15, 3).unwrap();
    let back = parse_edge_list(&to_edge_list(&g)).unwrap().graph;
    assert_eq!(back, g);

    let mut a = RefinementState::initialize(1, &g).unwrap();
    let mut b = RefinementState::initialize(1, &back).unwrap();
    run_to_convergence(&mut a, &g);
    run_to_convergence(&mut b, &back);
    assert_eq!(a.current_labels(), b.current_labels());
}

#[test]
fn test_label_values_are_dense() {
    let g = random_graph(30, 0.1, 11).unwrap();
    let mut state = RefinementState::initialize(1, &g).unwrap();
    run_to_convergence(&mut state, &g);

    let sizes = state.current_labels().class_sizes();
    let expected: Vec<Label> = (0..sizes.len() as u32).map(Label::new).collect();
    assert_eq!(sizes.keys().copied().collect::<Vec<_>>(), expected);
}
