//! Per-tick metrics for the tick engine.

/// Counters and timing collected during a single tick.
///
/// Durations are in microseconds. The engine populates these after each
/// tick; the most recent value is also kept on the engine.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepMetrics {
    /// Wall-clock time for the entire tick, in microseconds.
    pub total_us: u64,
    /// Infected nodes scanned at tick start.
    pub sources: usize,
    /// Neighbour samples drawn, summed over sources.
    pub sampled: usize,
    /// Uniform trials drawn.
    pub trials: usize,
    /// Nodes that became infected this tick.
    pub newly_infected: usize,
    /// Infected nodes after the commit.
    pub infected_total: usize,
}
