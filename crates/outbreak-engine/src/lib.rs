//! World construction and the lockstep tick loop for Outbreak simulations.
//!
//! [`OutbreakWorld`] is the entry point: build it from a [`WorldConfig`],
//! seed patient zero, then call [`step_sync()`](OutbreakWorld::step_sync)
//! once per external tick signal. Each step returns a borrowed
//! [`Snapshot`] of node states plus [`StepMetrics`].
//!
//! Construction runs placement, builds the neighbour graph, and validates
//! everything up front; a world that exists can always be stepped.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod hash;
pub mod metrics;
pub mod placement;
pub mod scenario;
pub mod snapshot;
pub mod tick;
pub mod world;

pub use config::{ConfigError, FixedNode, NodeSpec, Placement, Topology, WorldConfig};
pub use hash::{layout_hash, state_hash};
pub use metrics::StepMetrics;
pub use placement::{PlacementReport, PlacedNodes};
pub use snapshot::{Snapshot, StateCounts};
pub use tick::{TickEngine, TickResult};
pub use world::{OutbreakWorld, StepResult};
