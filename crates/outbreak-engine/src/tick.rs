//! Tick engine: the single-threaded simulation loop.
//!
//! [`TickEngine`] owns the node list, the neighbour graph, the spread
//! rule and the random stream. Construction places nodes and builds the
//! graph; each [`execute_tick()`](TickEngine::execute_tick) runs one
//! scan/commit cycle.
//!
//! There are no background threads and no suspension points. A tick is
//! one function call; stopping the simulation means not calling it.

use std::time::Instant;

use outbreak_core::{Node, NodeId, NodeState, RandomStream, TickId};
use outbreak_propagators::InfectionSpread;
use outbreak_space::NeighbourGraph;
use tracing::{debug, info};

use crate::config::{ConfigError, Topology, WorldConfig};
use crate::metrics::StepMetrics;
use crate::placement::{place, PlacementReport};
use crate::snapshot::{Snapshot, StateCounts};

// ── TickResult ───────────────────────────────────────────────────

/// Result of one tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickResult {
    /// Nodes infected this tick, ascending.
    pub newly_infected: Vec<NodeId>,
    /// Counters and timing for this tick.
    pub metrics: StepMetrics,
}

// ── TickEngine ───────────────────────────────────────────────────

/// Single-threaded tick engine.
pub struct TickEngine {
    nodes: Vec<Node>,
    labels: Vec<Option<String>>,
    graph: NeighbourGraph,
    rule: InfectionSpread,
    rng: RandomStream,
    current_tick: TickId,
    infected: usize,
    placement: PlacementReport,
    last_metrics: StepMetrics,
}

impl TickEngine {
    /// Construct an engine from a [`WorldConfig`].
    ///
    /// Validates the configuration, places nodes (consuming randomness in
    /// the documented order), and builds the neighbour graph. No node is
    /// infected yet. Consumes the `WorldConfig`.
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let model = config.resolved_model()?;

        let mut rng = RandomStream::new(config.seed);
        let placed = place(
            &config.placement,
            &*config.land,
            config.projection.as_ref(),
            &mut rng,
        );

        let positions: Vec<_> = placed.nodes.iter().map(|n| n.position).collect();
        let graph = match &config.topology {
            Topology::Radius => NeighbourGraph::from_radius(&positions, config.connection_radius)?,
            Topology::Edges(edges) => NeighbourGraph::from_edges(placed.nodes.len(), edges)?,
        };

        info!(
            seed = config.seed,
            nodes = placed.nodes.len(),
            edges = graph.edge_count(),
            placement = config.placement.mode(),
            topology = config.topology.mode(),
            rejected = placed.report.rejected,
            degraded = placed.report.degraded,
            "world built"
        );

        Ok(Self {
            nodes: placed.nodes,
            labels: placed.labels,
            graph,
            rule: InfectionSpread::new(model, config.max_attempts),
            rng,
            current_tick: TickId::default(),
            infected: 0,
            placement: placed.report,
            last_metrics: StepMetrics::default(),
        })
    }

    /// Advance one tick: scan from tick-start states, then commit.
    pub fn execute_tick(&mut self) -> TickResult {
        let start = Instant::now();
        let pending = self.rule.scan(&self.nodes, &self.graph, &mut self.rng);
        let newly_infected = InfectionSpread::commit(&mut self.nodes, &pending);
        self.infected += newly_infected.len();
        self.current_tick = self.current_tick.next();

        let metrics = StepMetrics {
            total_us: start.elapsed().as_micros() as u64,
            sources: pending.sources,
            sampled: pending.sampled,
            trials: pending.trials,
            newly_infected: newly_infected.len(),
            infected_total: self.infected,
        };
        debug!(
            tick = self.current_tick.0,
            sources = metrics.sources,
            sampled = metrics.sampled,
            trials = metrics.trials,
            newly_infected = metrics.newly_infected,
            infected = metrics.infected_total,
            "tick"
        );
        self.last_metrics = metrics.clone();
        TickResult {
            newly_infected,
            metrics,
        }
    }

    /// Mark `id` infected. Returns `true` if its state changed.
    pub fn infect(&mut self, id: NodeId) -> Result<bool, ConfigError> {
        let node_count = self.nodes.len();
        let node = self
            .nodes
            .get_mut(id.index())
            .ok_or(ConfigError::NodeOutOfRange {
                node: id.0,
                node_count,
            })?;
        if node.is_infected() {
            return Ok(false);
        }
        node.state = NodeState::Infected;
        self.infected += 1;
        Ok(true)
    }

    /// Infect one node chosen uniformly with a single draw.
    ///
    /// Returns `None` only for an empty world, which validation rules out.
    pub fn seed_patient_zero(&mut self) -> Option<NodeId> {
        let index = self.rng.random_index(self.nodes.len())?;
        let id = self.nodes[index].id;
        // In range by construction.
        self.infect(id).ok()?;
        info!(node = id.0, "patient zero");
        Some(id)
    }

    /// Borrow the current state.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot::new(self.current_tick, &self.nodes, &self.graph)
    }

    /// All nodes, indexed by id.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// The neighbour graph.
    pub fn graph(&self) -> &NeighbourGraph {
        &self.graph
    }

    /// The spread rule in use.
    pub fn rule(&self) -> &InfectionSpread {
        &self.rule
    }

    /// Label of a scenario or fixed node.
    pub fn label(&self, id: NodeId) -> Option<&str> {
        self.labels.get(id.index())?.as_deref()
    }

    /// Ticks executed so far.
    pub fn current_tick(&self) -> TickId {
        self.current_tick
    }

    /// Aggregate state counters.
    pub fn counts(&self) -> StateCounts {
        StateCounts::from_nodes(&self.nodes)
    }

    /// Infected node count, maintained incrementally.
    pub fn infected_count(&self) -> usize {
        self.infected
    }

    /// Placement counters from construction.
    pub fn placement_report(&self) -> PlacementReport {
        self.placement
    }

    /// Metrics from the most recent tick.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    /// Primitive draws consumed from the random stream so far.
    pub fn draws(&self) -> u64 {
        self.rng.draws()
    }
}
