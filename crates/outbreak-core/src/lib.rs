//! Core types and traits for the Outbreak propagation engine.
//!
//! This is the leaf crate of the workspace. It defines the fundamental
//! abstractions shared by every other layer: node and tick identifiers,
//! planar geometry, the node data model, static region and category
//! tables, the [`LandOracle`] capability, and the single seeded
//! [`RandomStream`] through which all randomness flows.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod geometry;
pub mod id;
pub mod node;
pub mod rng;
pub mod tables;
pub mod traits;

pub use error::TableError;
pub use geometry::{Bounds, Position};
pub use id::{NodeId, TickId};
pub use node::{Category, CategoryClass, Node, NodeState};
pub use rng::RandomStream;
pub use tables::{CategoryDistribution, Region, RegionTable};
pub use traits::LandOracle;
