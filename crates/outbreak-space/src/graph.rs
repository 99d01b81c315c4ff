//! Symmetric neighbour graphs over node ids.
//!
//! Every builder produces the same normal form: for each node, a sorted
//! (ascending), duplicate-free list of neighbour ids, with `b` in
//! `neighbours(a)` exactly when `a` is in `neighbours(b)`, and no node
//! listed as its own neighbour.

use outbreak_core::{NodeId, Position};

use crate::error::SpaceError;
use crate::grid::SpatialGrid;

/// Adjacency lists indexed by node id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NeighbourGraph {
    adjacency: Vec<Vec<NodeId>>,
}

impl NeighbourGraph {
    /// Connect every pair of nodes within `radius` of each other.
    ///
    /// Candidates come from a [`SpatialGrid`] with cell size `radius`;
    /// each is kept if its Euclidean distance is `<= radius`.
    ///
    /// Nodes the grid cannot bound exactly ([`SpatialGrid::is_exact`] is
    /// false: huge or NaN coordinates) are scanned against every node, and
    /// every other node checks them as extra candidates, so the result
    /// always equals [`brute_force`](Self::brute_force).
    ///
    /// # Errors
    ///
    /// Returns [`SpaceError::InvalidRadius`] for a non-finite or
    /// non-positive radius.
    pub fn from_radius(positions: &[Position], radius: f64) -> Result<Self, SpaceError> {
        let grid = SpatialGrid::build(positions, radius)?;
        let far: Vec<NodeId> = positions
            .iter()
            .enumerate()
            .filter(|(_, p)| !grid.is_exact(**p))
            .map(|(i, _)| NodeId(i as u32))
            .collect();
        let adjacency = positions
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let id = NodeId(i as u32);
                let within = |other: &NodeId| {
                    *other != id && p.distance(&positions[other.index()]) <= radius
                };
                let mut list: Vec<NodeId> = if grid.is_exact(*p) {
                    grid.candidates(id, *p)
                        .into_iter()
                        .chain(far.iter().copied())
                        .filter(within)
                        .collect()
                } else {
                    (0..positions.len() as u32)
                        .map(NodeId)
                        .filter(within)
                        .collect()
                };
                list.sort_unstable();
                list.dedup();
                list
            })
            .collect();
        Ok(Self { adjacency })
    }

    /// Exhaustive O(n²) reference for [`from_radius`](Self::from_radius).
    ///
    /// Must produce an identical graph for every input.
    pub fn brute_force(positions: &[Position], radius: f64) -> Result<Self, SpaceError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(SpaceError::InvalidRadius { value: radius });
        }
        let adjacency = positions
            .iter()
            .enumerate()
            .map(|(i, p)| {
                positions
                    .iter()
                    .enumerate()
                    .filter(|(j, q)| *j != i && p.distance(q) <= radius)
                    .map(|(j, _)| NodeId(j as u32))
                    .collect()
            })
            .collect();
        Ok(Self { adjacency })
    }

    /// Adopt a pre-authored edge list.
    ///
    /// Each `(a, b)` is inserted into both endpoints' lists; repeated or
    /// reversed duplicates collapse.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceError::EdgeOutOfRange`] if an endpoint is not below
    /// `node_count`, or [`SpaceError::SelfLoop`] for an `(a, a)` edge.
    pub fn from_edges(node_count: usize, edges: &[(u32, u32)]) -> Result<Self, SpaceError> {
        let mut adjacency: Vec<Vec<NodeId>> = vec![Vec::new(); node_count];
        for &(from, to) in edges {
            if from as usize >= node_count || to as usize >= node_count {
                return Err(SpaceError::EdgeOutOfRange {
                    from,
                    to,
                    node_count,
                });
            }
            if from == to {
                return Err(SpaceError::SelfLoop { node: from });
            }
            adjacency[from as usize].push(NodeId(to));
            adjacency[to as usize].push(NodeId(from));
        }
        for list in &mut adjacency {
            list.sort_unstable();
            list.dedup();
        }
        Ok(Self { adjacency })
    }

    /// Neighbours of `id`, ascending. Empty for an unknown id.
    pub fn neighbours(&self, id: NodeId) -> &[NodeId] {
        self.adjacency
            .get(id.index())
            .map(|l| l.as_slice())
            .unwrap_or(&[])
    }

    /// Number of neighbours of `id`.
    pub fn degree(&self, id: NodeId) -> usize {
        self.neighbours(id).len()
    }

    /// Number of nodes the graph covers.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// `true` if the graph covers no nodes.
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// `true` if `a` and `b` are adjacent.
    pub fn contains_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.neighbours(a).binary_search(&b).is_ok()
    }

    /// Undirected edges as `(low, high)` pairs, ascending.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.adjacency.iter().enumerate().flat_map(|(i, list)| {
            let a = NodeId(i as u32);
            list.iter().filter(move |b| a < **b).map(move |b| (a, *b))
        })
    }

    /// Check the normal form: sorted, unique, no self-loops, symmetric.
    pub fn is_well_formed(&self) -> bool {
        self.adjacency.iter().enumerate().all(|(i, list)| {
            let a = NodeId(i as u32);
            list.windows(2).all(|w| w[0] < w[1])
                && list
                    .iter()
                    .all(|b| *b != a && self.contains_edge(*b, a))
        })
    }
}
