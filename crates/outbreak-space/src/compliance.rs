//! Neighbour-graph invariant checks.
//!
//! Shared by the graph builder tests so every construction mode is held
//! to the same normal form.

use outbreak_core::NodeId;

use crate::graph::NeighbourGraph;

/// Assert every adjacency list is strictly ascending.
pub fn assert_sorted_unique(graph: &NeighbourGraph) {
    for i in 0..graph.node_count() {
        let list = graph.neighbours(NodeId(i as u32));
        for w in list.windows(2) {
            assert!(
                w[0] < w[1],
                "neighbours of {i} not strictly ascending: {list:?}"
            );
        }
    }
}

/// Assert no node lists itself.
pub fn assert_no_self_loops(graph: &NeighbourGraph) {
    for i in 0..graph.node_count() {
        let a = NodeId(i as u32);
        assert!(
            !graph.neighbours(a).contains(&a),
            "node {i} is its own neighbour"
        );
    }
}

/// Assert `b in neighbours(a)` implies `a in neighbours(b)`.
pub fn assert_symmetric(graph: &NeighbourGraph) {
    for i in 0..graph.node_count() {
        let a = NodeId(i as u32);
        for &b in graph.neighbours(a) {
            assert!(
                graph.neighbours(b).contains(&a),
                "{b} is a neighbour of {a} but not vice versa"
            );
        }
    }
}

/// Run every check.
pub fn run_full_compliance(graph: &NeighbourGraph) {
    assert_sorted_unique(graph);
    assert_no_self_loops(graph);
    assert_symmetric(graph);
    assert!(graph.is_well_formed());
}
