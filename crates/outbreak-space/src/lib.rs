//! Spatial data structures for Outbreak simulations.
//!
//! # Neighbour graphs
//!
//! [`NeighbourGraph`] is the adjacency relation the update engine walks
//! every tick. It is built once per run, either from a connection radius
//! (accelerated by [`SpatialGrid`], with an exhaustive
//! [`NeighbourGraph::brute_force`] reference that must agree exactly) or
//! from a pre-authored edge list.
//!
//! # Land oracles
//!
//! - [`PolygonLand`]: even-odd containment over a set of outlines
//! - [`RasterLand`]: boolean mask sampled over a rectangular extent
//! - [`OpenLand`]: every coordinate is land
//!
//! [`Projection`] maps geographic coordinates onto the simulation plane.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod graph;
pub mod grid;
pub mod land;
pub mod projection;

#[cfg(test)]
pub(crate) mod compliance;

pub use error::SpaceError;
pub use graph::NeighbourGraph;
pub use grid::{CellKey, SpatialGrid};
pub use land::{point_in_polygon, OpenLand, PolygonLand, RasterLand};
pub use projection::Projection;
