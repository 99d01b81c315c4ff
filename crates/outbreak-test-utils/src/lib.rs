//! Test utilities and fixtures for Outbreak development.
//!
//! Provides small hand-built topologies ([`ten_node_fixture`],
//! [`star_nodes`]), deterministic point clouds, and land oracles whose
//! answers are scripted or counted ([`ScriptedLand`], [`CountingLand`]).

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod land;

pub use fixtures::{
    star_nodes, ten_node_fixture, ten_node_positions, uniform_cloud, TEN_NODE_CATEGORIES,
    TEN_NODE_EDGES,
};
pub use land::{CountingLand, ScriptedLand};
