//! Hand-built topologies and point clouds.
//!
//! - [`ten_node_fixture`]: 10 nodes, 15 static edges; node 0 touches 1, 2, 3
//! - [`star_nodes`]: one hub (node 0) joined to `n` leaves
//! - [`uniform_cloud`]: seeded uniform positions in a rectangle

use outbreak_core::{Bounds, Category, Node, NodeId, Position, RandomStream};
use outbreak_space::NeighbourGraph;

/// The 15 undirected edges of the ten-node fixture.
///
/// Node 0's direct neighbours are 1, 2 and 3; nodes 4, 5, 6 and 9 are
/// two hops away; 7 and 8 are three.
pub const TEN_NODE_EDGES: [(u32, u32); 15] = [
    (0, 1),
    (0, 2),
    (0, 3),
    (1, 2),
    (1, 4),
    (2, 5),
    (3, 6),
    (3, 9),
    (4, 5),
    (4, 7),
    (5, 8),
    (6, 7),
    (6, 9),
    (7, 8),
    (8, 9),
];

/// Categories of the ten-node fixture, by id.
pub const TEN_NODE_CATEGORIES: [Category; 10] = [
    Category::Server,
    Category::Server,
    Category::Computer,
    Category::Phone,
    Category::Iot,
    Category::Computer,
    Category::Phone,
    Category::Iot,
    Category::Server,
    Category::Phone,
];

/// Positions of the ten-node fixture: a loose 4-3-3 layout, 12 units apart.
pub fn ten_node_positions() -> Vec<Position> {
    [
        (0.0, 0.0),
        (12.0, 0.0),
        (6.0, 10.0),
        (-6.0, 10.0),
        (24.0, 0.0),
        (18.0, 12.0),
        (-12.0, 20.0),
        (30.0, 12.0),
        (24.0, 24.0),
        (0.0, 24.0),
    ]
    .into_iter()
    .map(Position::from)
    .collect()
}

/// Secure nodes and the static graph of the ten-node fixture.
pub fn ten_node_fixture() -> (Vec<Node>, NeighbourGraph) {
    let nodes = ten_node_positions()
        .into_iter()
        .zip(TEN_NODE_CATEGORIES)
        .enumerate()
        .map(|(i, (p, c))| Node::new(NodeId(i as u32), p, c))
        .collect();
    let graph = NeighbourGraph::from_edges(10, &TEN_NODE_EDGES).expect("fixture edges are valid");
    (nodes, graph)
}

/// A hub (node 0) at the origin with `leaves` phones on a unit circle.
pub fn star_nodes(leaves: u32) -> (Vec<Node>, NeighbourGraph) {
    let mut nodes = vec![Node::new(NodeId(0), Position::new(0.0, 0.0), Category::Phone)];
    for i in 1..=leaves {
        let angle = f64::from(i) / f64::from(leaves.max(1)) * std::f64::consts::TAU;
        nodes.push(Node::new(
            NodeId(i),
            Position::new(angle.cos(), angle.sin()),
            Category::Phone,
        ));
    }
    let edges: Vec<(u32, u32)> = (1..=leaves).map(|i| (0, i)).collect();
    let graph =
        NeighbourGraph::from_edges(leaves as usize + 1, &edges).expect("star edges are valid");
    (nodes, graph)
}

/// `n` seeded uniform positions inside `extent`.
pub fn uniform_cloud(seed: u64, n: usize, extent: Bounds) -> Vec<Position> {
    let mut rng = RandomStream::new(seed);
    (0..n)
        .map(|_| {
            let x = rng.uniform_range(extent.min_x, extent.max_x);
            let y = rng.uniform_range(extent.min_y, extent.max_y);
            Position::new(x, y)
        })
        .collect()
}
