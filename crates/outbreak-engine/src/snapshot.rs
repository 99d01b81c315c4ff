//! Read-only views of world state.

use outbreak_core::{Node, NodeId, NodeState, TickId};
use outbreak_space::NeighbourGraph;

use crate::hash::state_hash;

/// Aggregate state counters for a heads-up display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StateCounts {
    /// Nodes in [`NodeState::Secure`].
    pub secure: usize,
    /// Nodes in [`NodeState::Vulnerable`]. Always zero under the current rule.
    pub vulnerable: usize,
    /// Nodes in [`NodeState::Infected`].
    pub infected: usize,
}

impl StateCounts {
    /// Count states over a node slice.
    pub fn from_nodes(nodes: &[Node]) -> Self {
        nodes.iter().fold(Self::default(), |mut c, n| {
            match n.state {
                NodeState::Secure => c.secure += 1,
                NodeState::Vulnerable => c.vulnerable += 1,
                NodeState::Infected => c.infected += 1,
            }
            c
        })
    }

    /// Total node count.
    pub fn total(&self) -> usize {
        self.secure + self.vulnerable + self.infected
    }
}

/// Borrowed view of the world after a tick.
///
/// Holds a shared borrow of the world, so the world cannot be stepped
/// while a snapshot is alive.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'w> {
    tick: TickId,
    nodes: &'w [Node],
    graph: &'w NeighbourGraph,
    counts: StateCounts,
}

impl<'w> Snapshot<'w> {
    pub(crate) fn new(tick: TickId, nodes: &'w [Node], graph: &'w NeighbourGraph) -> Self {
        Self {
            tick,
            nodes,
            graph,
            counts: StateCounts::from_nodes(nodes),
        }
    }

    /// Tick this snapshot was taken at. Tick 0 is the pre-step state.
    pub fn tick(&self) -> TickId {
        self.tick
    }

    /// All nodes, indexed by id.
    pub fn nodes(&self) -> &'w [Node] {
        self.nodes
    }

    /// A single node, or `None` when `id` is out of range.
    pub fn node(&self, id: NodeId) -> Option<&'w Node> {
        self.nodes.get(id.index())
    }

    /// The neighbour graph.
    pub fn graph(&self) -> &'w NeighbourGraph {
        self.graph
    }

    /// Aggregate state counters.
    pub fn counts(&self) -> StateCounts {
        self.counts
    }

    /// Ids of infected nodes, ascending.
    pub fn infected(&self) -> impl Iterator<Item = NodeId> + 'w {
        self.nodes.iter().filter(|n| n.is_infected()).map(|n| n.id)
    }

    /// FNV-1a hash of the node state vector.
    pub fn state_hash(&self) -> u64 {
        state_hash(self.nodes)
    }
}
