//! Outbreak: a deterministic spatial epidemic propagation engine.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Outbreak sub-crates. For most users, adding `outbreak` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use outbreak::prelude::*;
//!
//! // Ten devices on a line, 20 units apart.
//! let nodes = (0..10)
//!     .map(|i| FixedNode::new(format!("dev-{i}"), Position::new(i as f64 * 20.0, 0.0), Category::Computer))
//!     .collect();
//! let config = WorldConfig::new(42, Placement::Fixed { nodes }, Box::new(OpenLand));
//! let mut world = OutbreakWorld::new(config).unwrap();
//! world.infect(NodeId(0)).unwrap();
//!
//! let step = world.step_sync();
//! assert_eq!(step.snapshot.tick(), TickId(1));
//! assert!(step.snapshot.counts().infected >= 1);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `outbreak-core` | Ids, geometry, nodes, tables, the random stream |
//! | [`space`] | `outbreak-space` | Spatial grid, neighbour graph, land oracles, projection |
//! | [`propagators`] | `outbreak-propagators` | Infection probability and the spread rule |
//! | [`engine`] | `outbreak-engine` | Configuration, placement, tick engine, lockstep world |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, tables, and the random stream (`outbreak-core`).
///
/// Every source of randomness goes through [`types::RandomStream`].
pub use outbreak_core as types;

/// Spatial structures and land oracles (`outbreak-space`).
pub use outbreak_space as space;

/// Infection rules (`outbreak-propagators`).
///
/// [`propagators::InfectionModel`] is usable on its own, without a world.
pub use outbreak_propagators as propagators;

/// World construction and the tick loop (`outbreak-engine`).
pub use outbreak_engine as engine;

/// Common imports for typical Outbreak usage.
///
/// ```rust
/// use outbreak::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use outbreak_core::{
        Bounds, Category, LandOracle, Node, NodeId, NodeState, Position, RandomStream, TickId,
    };

    // Space
    pub use outbreak_space::{NeighbourGraph, OpenLand, PolygonLand, Projection, RasterLand};

    // Propagators
    pub use outbreak_propagators::{InfectionModel, InfectionSpread};

    // Engine
    pub use outbreak_engine::{
        ConfigError, FixedNode, NodeSpec, OutbreakWorld, Placement, Snapshot, StateCounts,
        StepMetrics, StepResult, Topology, WorldConfig,
    };
}
