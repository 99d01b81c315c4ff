//! World configuration, validation, and error types.
//!
//! [`WorldConfig`] is the input for constructing a world.
//! [`validate()`](WorldConfig::validate) checks every structural invariant
//! before any randomness is consumed, so a configuration mistake never
//! leaves a half-placed world behind.

use std::error::Error;
use std::fmt;

use outbreak_core::{
    Bounds, Category, CategoryDistribution, LandOracle, Position, RegionTable, TableError,
};
use outbreak_propagators::spread::DEFAULT_MAX_ATTEMPTS;
use outbreak_propagators::InfectionModel;
use outbreak_space::{NeighbourGraph, Projection, SpaceError};

/// Default connection radius, in plane units.
pub const DEFAULT_CONNECTION_RADIUS: f64 = 42.0;

/// Default number of jittered draws tried per scenario node before
/// falling back to its anchor.
pub const DEFAULT_SCENARIO_ATTEMPTS: usize = 8;

// ── Placement ──────────────────────────────────────────────────────

/// A pre-authored node whose position is jittered at placement time.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeSpec {
    /// Display label, kept for hover lookups.
    pub label: String,
    /// Fixed category (no categorical draw).
    pub category: Category,
    /// Centre of the jitter box, in sampling coordinates.
    pub anchor: Position,
    /// Half-width of the horizontal jitter box.
    pub jitter_x: f64,
    /// Half-height of the vertical jitter box.
    pub jitter_y: f64,
}

impl NodeSpec {
    /// Create a spec with a symmetric jitter box.
    pub fn new(label: impl Into<String>, category: Category, anchor: Position, jitter: f64) -> Self {
        Self {
            label: label.into(),
            category,
            anchor,
            jitter_x: jitter,
            jitter_y: jitter,
        }
    }
}

/// A pre-authored node placed exactly where it is declared.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedNode {
    /// Display label, kept for hover lookups.
    pub label: String,
    /// Position in plane coordinates (never projected).
    pub position: Position,
    /// Fixed category.
    pub category: Category,
}

impl FixedNode {
    /// Create a fixed node.
    pub fn new(label: impl Into<String>, position: Position, category: Category) -> Self {
        Self {
            label: label.into(),
            position,
            category,
        }
    }
}

/// How the initial node set is produced.
#[derive(Clone, Debug)]
pub enum Placement {
    /// Weighted-region sampling constrained to land.
    Regions {
        /// Number of nodes to place.
        node_count: usize,
        /// Weighted anchors with Gaussian spread.
        regions: RegionTable,
        /// Category shares for accepted nodes.
        distribution: CategoryDistribution,
        /// Clamp range for the rejection fallback, in sampling coordinates.
        bounds: Bounds,
    },
    /// Jittered pre-authored nodes. `node_count` must equal `specs.len()`.
    Scenario {
        /// Declared node count.
        node_count: usize,
        /// One spec per node, in id order.
        specs: Vec<NodeSpec>,
        /// Jittered draws tried per node before using the anchor.
        attempts: usize,
    },
    /// Exact pre-authored positions, no randomness.
    Fixed {
        /// One entry per node, in id order.
        nodes: Vec<FixedNode>,
    },
}

impl Placement {
    /// Number of nodes this placement will produce.
    pub fn node_count(&self) -> usize {
        match self {
            Self::Regions { node_count, .. } | Self::Scenario { node_count, .. } => *node_count,
            Self::Fixed { nodes } => nodes.len(),
        }
    }

    /// Short mode name for logs.
    pub fn mode(&self) -> &'static str {
        match self {
            Self::Regions { .. } => "regions",
            Self::Scenario { .. } => "scenario",
            Self::Fixed { .. } => "fixed",
        }
    }
}

// ── Topology ───────────────────────────────────────────────────────

/// How the neighbour graph is derived.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Topology {
    /// Every pair within the connection radius is adjacent.
    #[default]
    Radius,
    /// Adopt this undirected edge list instead of a radius query.
    Edges(Vec<(u32, u32)>),
}

impl Topology {
    /// Short mode name for logs.
    pub fn mode(&self) -> &'static str {
        match self {
            Self::Radius => "radius",
            Self::Edges(_) => "edges",
        }
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while validating or building a world.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A region or category table is invalid.
    Table(TableError),
    /// Radius, edge list, or land data is invalid.
    Space(SpaceError),
    /// A scenario declares a node count different from its spec count.
    ScenarioCountMismatch {
        /// Declared node count.
        expected: usize,
        /// Number of specs supplied.
        actual: usize,
    },
    /// Placement would produce no nodes.
    ZeroNodes,
    /// Node count does not fit in a `u32` id.
    NodeCountOverflow {
        /// The requested count.
        value: usize,
    },
    /// `max_attempts` is zero.
    InvalidMaxAttempts {
        /// The rejected value.
        value: usize,
    },
    /// The infection model rejected the configured parameters.
    InvalidModel {
        /// Description of the failure.
        reason: String,
    },
    /// Clamp bounds are empty or non-finite.
    InvalidBounds {
        /// The rejected bounds.
        bounds: Bounds,
    },
    /// A scenario or fixed node has a non-finite position or a negative
    /// jitter box.
    InvalidNode {
        /// Label of the offending node.
        label: String,
        /// Description of the failure.
        reason: String,
    },
    /// A node id is outside the world.
    NodeOutOfRange {
        /// The requested id.
        node: u32,
        /// Number of nodes in the world.
        node_count: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table(e) => write!(f, "table: {e}"),
            Self::Space(e) => write!(f, "space: {e}"),
            Self::ScenarioCountMismatch { expected, actual } => write!(
                f,
                "scenario declares {expected} nodes but supplies {actual} specs"
            ),
            Self::ZeroNodes => write!(f, "placement produces zero nodes"),
            Self::NodeCountOverflow { value } => {
                write!(f, "node count {value} exceeds u32::MAX")
            }
            Self::InvalidMaxAttempts { value } => {
                write!(f, "max_attempts must be at least 1, got {value}")
            }
            Self::InvalidModel { reason } => write!(f, "invalid infection model: {reason}"),
            Self::InvalidBounds { bounds } => write!(f, "invalid clamp bounds: {bounds:?}"),
            Self::InvalidNode { label, reason } => write!(f, "node '{label}': {reason}"),
            Self::NodeOutOfRange { node, node_count } => {
                write!(f, "node {node} out of range for {node_count} nodes")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Table(e) => Some(e),
            Self::Space(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TableError> for ConfigError {
    fn from(e: TableError) -> Self {
        Self::Table(e)
    }
}

impl From<SpaceError> for ConfigError {
    fn from(e: SpaceError) -> Self {
        Self::Space(e)
    }
}

// ── WorldConfig ────────────────────────────────────────────────────

/// Complete configuration for constructing a world.
///
/// Consumed by [`OutbreakWorld::new`](crate::OutbreakWorld::new).
pub struct WorldConfig {
    /// Seed for the single random stream.
    pub seed: u64,
    /// Adjacency radius, also the distance-decay horizon of the model.
    /// Default: 42.
    pub connection_radius: f64,
    /// Neighbours sampled per infected node per tick (K). Default: 4.
    pub max_attempts: usize,
    /// Transmission probability parameters. Its radius is overridden by
    /// `connection_radius`.
    pub model: InfectionModel,
    /// Initial node set.
    pub placement: Placement,
    /// Neighbour graph derivation.
    pub topology: Topology,
    /// Placement terrain test, consulted in sampling coordinates.
    pub land: Box<dyn LandOracle>,
    /// Geographic-to-plane mapping for sampled nodes. `None` = identity.
    pub projection: Option<Projection>,
}

impl WorldConfig {
    /// A configuration with default radius, K and model.
    pub fn new(seed: u64, placement: Placement, land: Box<dyn LandOracle>) -> Self {
        Self {
            seed,
            connection_radius: DEFAULT_CONNECTION_RADIUS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            model: InfectionModel::default(),
            placement,
            topology: Topology::Radius,
            land,
            projection: None,
        }
    }

    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. Radius.
        if !self.connection_radius.is_finite() || self.connection_radius <= 0.0 {
            return Err(SpaceError::InvalidRadius {
                value: self.connection_radius,
            }
            .into());
        }
        // 2. K.
        if self.max_attempts == 0 {
            return Err(ConfigError::InvalidMaxAttempts {
                value: self.max_attempts,
            });
        }
        // 3. Model, with the connection radius folded in.
        self.resolved_model()?;
        // 4. Placement.
        self.validate_placement()?;
        // 5. Projection, when present.
        if let Some(projection) = &self.projection {
            projection.validate()?;
        }
        // 6. Static edges. The graph is discarded; construction builds it again.
        if let Topology::Edges(edges) = &self.topology {
            NeighbourGraph::from_edges(self.placement.node_count(), edges)?;
        }
        Ok(())
    }

    /// The infection model with its radius set to `connection_radius`.
    pub fn resolved_model(&self) -> Result<InfectionModel, ConfigError> {
        self.model
            .to_builder()
            .radius(self.connection_radius)
            .build()
            .map_err(|reason| ConfigError::InvalidModel { reason })
    }

    fn validate_placement(&self) -> Result<(), ConfigError> {
        let count = self.placement.node_count();
        if count == 0 {
            return Err(ConfigError::ZeroNodes);
        }
        if u32::try_from(count).is_err() {
            return Err(ConfigError::NodeCountOverflow { value: count });
        }
        match &self.placement {
            Placement::Regions {
                regions,
                distribution,
                bounds,
                ..
            } => {
                regions.validate()?;
                distribution.validate()?;
                if !bounds.is_valid() {
                    return Err(ConfigError::InvalidBounds { bounds: *bounds });
                }
            }
            Placement::Scenario {
                node_count, specs, ..
            } => {
                if specs.len() != *node_count {
                    return Err(ConfigError::ScenarioCountMismatch {
                        expected: *node_count,
                        actual: specs.len(),
                    });
                }
                for spec in specs {
                    if !spec.anchor.is_finite() {
                        return Err(invalid_node(&spec.label, "anchor is not finite"));
                    }
                    let jitter_ok = |j: f64| j.is_finite() && j >= 0.0;
                    if !jitter_ok(spec.jitter_x) || !jitter_ok(spec.jitter_y) {
                        return Err(invalid_node(
                            &spec.label,
                            "jitter must be finite and non-negative",
                        ));
                    }
                }
            }
            Placement::Fixed { nodes } => {
                if let Some(bad) = nodes.iter().find(|n| !n.position.is_finite()) {
                    return Err(invalid_node(&bad.label, "position is not finite"));
                }
            }
        }
        Ok(())
    }
}

fn invalid_node(label: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidNode {
        label: label.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use outbreak_core::Region;
    use outbreak_space::OpenLand;

    fn regions_placement(node_count: usize) -> Placement {
        Placement::Regions {
            node_count,
            regions: RegionTable::new(vec![Region::new(
                "origin",
                Position::new(0.0, 0.0),
                1.0,
                5.0,
                5.0,
            )])
            .unwrap(),
            distribution: CategoryDistribution::single(Category::Phone),
            bounds: Bounds::new(-50.0, 50.0, -50.0, 50.0),
        }
    }

    fn scenario(node_count: usize, specs: usize) -> Placement {
        Placement::Scenario {
            node_count,
            specs: (0..specs)
                .map(|i| {
                    NodeSpec::new(
                        format!("n{i}"),
                        Category::Server,
                        Position::new(i as f64, 0.0),
                        1.0,
                    )
                })
                .collect(),
            attempts: DEFAULT_SCENARIO_ATTEMPTS,
        }
    }

    fn config(placement: Placement) -> WorldConfig {
        WorldConfig::new(7, placement, Box::new(OpenLand))
    }

    // ── Defaults ───────────────────────────────────────────────────

    #[test]
    fn defaults_match_reference_constants() {
        let cfg = config(regions_placement(10));
        assert_eq!(cfg.connection_radius, 42.0);
        assert_eq!(cfg.max_attempts, 4);
        assert_eq!(cfg.topology, Topology::Radius);
        assert!(cfg.projection.is_none());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn resolved_model_uses_connection_radius() {
        let mut cfg = config(regions_placement(10));
        cfg.connection_radius = 17.5;
        assert_eq!(cfg.resolved_model().unwrap().radius(), 17.5);
    }

    // ── Rejections ─────────────────────────────────────────────────

    #[test]
    fn scenario_count_mismatch_is_fatal() {
        let cfg = config(scenario(5, 4));
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::ScenarioCountMismatch {
                expected: 5,
                actual: 4
            })
        );
    }

    #[test]
    fn matching_scenario_is_valid() {
        assert!(config(scenario(3, 3)).validate().is_ok());
    }

    #[test]
    fn zero_nodes_rejected() {
        assert_eq!(
            config(regions_placement(0)).validate(),
            Err(ConfigError::ZeroNodes)
        );
        assert_eq!(
            config(Placement::Fixed { nodes: vec![] }).validate(),
            Err(ConfigError::ZeroNodes)
        );
    }

    #[test]
    fn bad_radius_rejected() {
        for r in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let mut cfg = config(regions_placement(3));
            cfg.connection_radius = r;
            assert!(
                matches!(
                    cfg.validate(),
                    Err(ConfigError::Space(SpaceError::InvalidRadius { .. }))
                ),
                "radius {r} should be rejected"
            );
        }
    }

    #[test]
    fn zero_max_attempts_rejected() {
        let mut cfg = config(regions_placement(3));
        cfg.max_attempts = 0;
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::InvalidMaxAttempts { value: 0 })
        );
    }

    #[test]
    fn empty_bounds_rejected() {
        let mut placement = regions_placement(3);
        if let Placement::Regions { bounds, .. } = &mut placement {
            *bounds = Bounds::new(10.0, -10.0, 0.0, 1.0);
        }
        assert!(matches!(
            config(placement).validate(),
            Err(ConfigError::InvalidBounds { .. })
        ));
    }

    #[test]
    fn negative_jitter_rejected() {
        let mut placement = scenario(1, 1);
        if let Placement::Scenario { specs, .. } = &mut placement {
            specs[0].jitter_y = -0.5;
        }
        assert!(matches!(
            config(placement).validate(),
            Err(ConfigError::InvalidNode { .. })
        ));
    }

    #[test]
    fn edge_out_of_range_rejected() {
        let mut cfg = config(scenario(3, 3));
        cfg.topology = Topology::Edges(vec![(0, 1), (1, 3)]);
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::Space(SpaceError::EdgeOutOfRange { .. }))
        ));
    }

    #[test]
    fn error_source_chains_to_layer() {
        let err = ConfigError::from(SpaceError::SelfLoop { node: 2 });
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("space: "));
        assert!(ConfigError::ZeroNodes.source().is_none());
    }
}
