//! Tick-synchronous infection spread.
//!
//! Each tick is split in two phases so reads and writes never interleave:
//!
//! 1. **Scan** ([`InfectionSpread::scan`]): walk infected nodes in
//!    ascending id order. For each, sample up to `max_attempts` distinct
//!    neighbours without replacement; for every sampled neighbour that is
//!    `Secure`, draw one uniform trial and record a pending infection if
//!    the trial falls below the transmission probability.
//! 2. **Commit** ([`InfectionSpread::commit`]): mark every pending node
//!    infected, once.
//!
//! Because the scan only sees tick-start states, a node infected this
//! tick cannot infect anyone until the next tick, and the outcome does
//! not depend on the order in which sources would otherwise have been
//! applied.
//!
//! Random consumption order: ascending source id, then the source's
//! neighbour sample, then one trial per secure sampled target in sample
//! order.

use outbreak_core::{Node, NodeId, NodeState, RandomStream};
use outbreak_space::NeighbourGraph;
use smallvec::SmallVec;

use crate::probability::InfectionModel;

/// Default cap on neighbours sampled per infected node per tick.
pub const DEFAULT_MAX_ATTEMPTS: usize = 4;

/// Infections discovered during a scan, not yet applied.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PendingInfections {
    targets: Vec<NodeId>,
    /// Infected nodes scanned (including those with no neighbours).
    pub sources: usize,
    /// Neighbour samples drawn, summed over sources.
    pub sampled: usize,
    /// Uniform trials drawn.
    pub trials: usize,
}

impl PendingInfections {
    /// Pending targets in discovery order. May contain duplicates.
    pub fn targets(&self) -> &[NodeId] {
        &self.targets
    }

    /// `true` if no infection is pending.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Result of one full tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpreadOutcome {
    /// Nodes that changed from secure to infected, ascending, no duplicates.
    pub newly_infected: Vec<NodeId>,
    /// Infected nodes scanned.
    pub sources: usize,
    /// Neighbour samples drawn.
    pub sampled: usize,
    /// Uniform trials drawn.
    pub trials: usize,
}

/// The per-tick spread rule.
#[derive(Clone, Debug, PartialEq)]
pub struct InfectionSpread {
    model: InfectionModel,
    max_attempts: usize,
}

impl Default for InfectionSpread {
    fn default() -> Self {
        Self::new(InfectionModel::default(), DEFAULT_MAX_ATTEMPTS)
    }
}

impl InfectionSpread {
    /// Create a rule sampling at most `max_attempts` neighbours per source.
    pub fn new(model: InfectionModel, max_attempts: usize) -> Self {
        Self {
            model,
            max_attempts,
        }
    }

    /// The probability model.
    pub fn model(&self) -> &InfectionModel {
        &self.model
    }

    /// Maximum neighbours sampled per source per tick.
    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Draw this tick's targets for `source`: `min(degree, max_attempts)`
    /// distinct neighbours, in sample order.
    ///
    /// A node with no neighbours consumes no randomness.
    pub fn sample_targets(
        &self,
        graph: &NeighbourGraph,
        source: NodeId,
        rng: &mut RandomStream,
    ) -> SmallVec<[NodeId; 8]> {
        let neighbours = graph.neighbours(source);
        rng.sample_without_replacement(neighbours, self.max_attempts)
            .into_iter()
            .collect()
    }

    /// Phase one: read tick-start states and collect pending infections.
    ///
    /// `nodes` is not modified.
    pub fn scan(
        &self,
        nodes: &[Node],
        graph: &NeighbourGraph,
        rng: &mut RandomStream,
    ) -> PendingInfections {
        let mut pending = PendingInfections::default();
        for source in nodes.iter().filter(|n| n.is_infected()) {
            pending.sources += 1;
            let targets = self.sample_targets(graph, source.id, rng);
            pending.sampled += targets.len();
            for target_id in targets {
                let Some(target) = nodes.get(target_id.index()) else {
                    continue;
                };
                if target.state != NodeState::Secure {
                    continue;
                }
                let chance = self.model.between(source, target);
                pending.trials += 1;
                if rng.uniform_float() < chance {
                    pending.targets.push(target_id);
                }
            }
        }
        pending
    }

    /// Phase two: apply pending infections.
    ///
    /// Returns the nodes whose state actually changed, ascending. Applying
    /// a node that is already infected is a no-op.
    pub fn commit(nodes: &mut [Node], pending: &PendingInfections) -> Vec<NodeId> {
        let mut targets = pending.targets.clone();
        targets.sort_unstable();
        targets.dedup();
        targets.retain(|id| match nodes.get_mut(id.index()) {
            Some(node) if node.state != NodeState::Infected => {
                node.state = NodeState::Infected;
                true
            }
            _ => false,
        });
        targets
    }

    /// Run one tick: [`scan`](Self::scan) then [`commit`](Self::commit).
    pub fn step(
        &self,
        nodes: &mut [Node],
        graph: &NeighbourGraph,
        rng: &mut RandomStream,
    ) -> SpreadOutcome {
        let pending = self.scan(nodes, graph, rng);
        let newly_infected = Self::commit(nodes, &pending);
        SpreadOutcome {
            newly_infected,
            sources: pending.sources,
            sampled: pending.sampled,
            trials: pending.trials,
        }
    }
}
