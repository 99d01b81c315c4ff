//! Lockstep (synchronous) simulation world.
//!
//! [`OutbreakWorld`] is the user-facing API. Each call to
//! [`step_sync()`](OutbreakWorld::step_sync) executes one tick and returns
//! a snapshot of the resulting state.
//!
//! # Ownership model
//!
//! `OutbreakWorld` is [`Send`]. All mutating methods take `&mut self`, and
//! the [`Snapshot`] returned by `step_sync()` borrows from `self`, so the
//! caller cannot step again while holding one.

use outbreak_core::{Node, NodeId, TickId};
use outbreak_space::NeighbourGraph;

use crate::config::{ConfigError, WorldConfig};
use crate::metrics::StepMetrics;
use crate::placement::PlacementReport;
use crate::snapshot::{Snapshot, StateCounts};
use crate::tick::TickEngine;

// Fails to compile if any field is !Send.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<OutbreakWorld>();
    }
};

// ── StepResult ──────────────────────────────────────────────────

/// Result of an [`OutbreakWorld::step_sync()`] call.
pub struct StepResult<'w> {
    /// Read-only snapshot of world state after this tick.
    pub snapshot: Snapshot<'w>,
    /// Nodes infected this tick, ascending.
    pub newly_infected: Vec<NodeId>,
    /// Counters and timing for this tick.
    pub metrics: StepMetrics,
}

// ── OutbreakWorld ───────────────────────────────────────────────

/// Single-threaded world for lockstep execution.
///
/// # Example
///
/// ```
/// use outbreak_core::{Category, Position};
/// use outbreak_engine::{FixedNode, OutbreakWorld, Placement, WorldConfig};
/// use outbreak_space::OpenLand;
///
/// let nodes = (0..5)
///     .map(|i| FixedNode::new(format!("n{i}"), Position::new(i as f64 * 10.0, 0.0), Category::Phone))
///     .collect();
/// let config = WorldConfig::new(42, Placement::Fixed { nodes }, Box::new(OpenLand));
/// let mut world = OutbreakWorld::new(config).unwrap();
/// world.seed_patient_zero();
/// for _ in 0..10 {
///     let step = world.step_sync();
///     assert!(step.snapshot.counts().infected >= 1);
/// }
/// ```
pub struct OutbreakWorld {
    engine: TickEngine,
    seed: u64,
}

impl OutbreakWorld {
    /// Build a world from a [`WorldConfig`].
    ///
    /// Validates, places nodes, and builds the neighbour graph. Every node
    /// starts secure; call [`seed_patient_zero()`](Self::seed_patient_zero)
    /// or [`infect()`](Self::infect) before stepping.
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        let seed = config.seed;
        Ok(Self {
            engine: TickEngine::new(config)?,
            seed,
        })
    }

    /// Execute one tick and return the resulting state.
    pub fn step_sync(&mut self) -> StepResult<'_> {
        let result = self.engine.execute_tick();
        StepResult {
            snapshot: self.engine.snapshot(),
            newly_infected: result.newly_infected,
            metrics: result.metrics,
        }
    }

    /// Infect one uniformly chosen node. This is the last draw before the
    /// first tick.
    pub fn seed_patient_zero(&mut self) -> Option<NodeId> {
        self.engine.seed_patient_zero()
    }

    /// Infect `id` directly. Returns `true` if its state changed.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NodeOutOfRange`] when `id` is not in the world.
    pub fn infect(&mut self, id: NodeId) -> Result<bool, ConfigError> {
        self.engine.infect(id)
    }

    /// Borrow the current state without stepping.
    pub fn snapshot(&self) -> Snapshot<'_> {
        self.engine.snapshot()
    }

    /// All nodes, indexed by id.
    pub fn nodes(&self) -> &[Node] {
        self.engine.nodes()
    }

    /// The neighbour graph, for connection rendering and hover lookups.
    pub fn graph(&self) -> &NeighbourGraph {
        self.engine.graph()
    }

    /// Label of a scenario or fixed node; `None` for sampled nodes.
    pub fn label(&self, id: NodeId) -> Option<&str> {
        self.engine.label(id)
    }

    /// Aggregate state counters.
    pub fn counts(&self) -> StateCounts {
        self.engine.counts()
    }

    /// FNV-1a hash of the current node state vector.
    pub fn state_hash(&self) -> u64 {
        crate::hash::state_hash(self.engine.nodes())
    }

    /// Ticks executed so far.
    pub fn current_tick(&self) -> TickId {
        self.engine.current_tick()
    }

    /// Placement counters from construction.
    pub fn placement_report(&self) -> PlacementReport {
        self.engine.placement_report()
    }

    /// Metrics from the most recent tick.
    pub fn last_metrics(&self) -> &StepMetrics {
        self.engine.last_metrics()
    }

    /// The seed this world was built with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The underlying engine.
    pub fn engine(&self) -> &TickEngine {
        &self.engine
    }
}
