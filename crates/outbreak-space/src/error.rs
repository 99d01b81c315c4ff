//! Error types for space construction.

use std::fmt;

/// Errors arising from grid, graph, land-oracle, or projection construction.
#[derive(Debug, Clone, PartialEq)]
pub enum SpaceError {
    /// The connection radius (grid cell size) is zero, negative, or not finite.
    InvalidRadius {
        /// The rejected value.
        value: f64,
    },
    /// A static edge references a node id outside `0..node_count`.
    EdgeOutOfRange {
        /// First endpoint.
        from: u32,
        /// Second endpoint.
        to: u32,
        /// Number of nodes in the graph.
        node_count: usize,
    },
    /// A static edge connects a node to itself.
    SelfLoop {
        /// The offending node.
        node: u32,
    },
    /// A land polygon has fewer than three vertices.
    DegeneratePolygon {
        /// Position of the polygon in the input list.
        index: usize,
        /// How many vertices it had.
        vertices: usize,
    },
    /// Raster mask length does not equal `width * height`.
    RasterDimensions {
        /// `width * height`.
        expected: usize,
        /// Actual mask length.
        actual: usize,
    },
    /// A raster or projection extent is empty, inverted, or not finite.
    InvalidExtent {
        /// What went wrong.
        reason: String,
    },
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRadius { value } => {
                write!(f, "connection radius must be finite and > 0, got {value}")
            }
            Self::EdgeOutOfRange {
                from,
                to,
                node_count,
            } => write!(
                f,
                "edge ({from}, {to}) references a node outside 0..{node_count}"
            ),
            Self::SelfLoop { node } => write!(f, "edge ({node}, {node}) is a self-loop"),
            Self::DegeneratePolygon { index, vertices } => write!(
                f,
                "polygon {index} has {vertices} vertices, at least 3 required"
            ),
            Self::RasterDimensions { expected, actual } => write!(
                f,
                "raster mask has {actual} cells, expected width * height = {expected}"
            ),
            Self::InvalidExtent { reason } => write!(f, "invalid extent: {reason}"),
        }
    }
}

impl std::error::Error for SpaceError {}
