//! Initial node placement.
//!
//! Three modes, selected by [`Placement`]:
//!
//! - **Regions**: pick a region by weight, jitter around its anchor, keep
//!   the candidate only if the land oracle accepts it. After more than
//!   `10 × node_count` consecutive rejections the next rejected candidate
//!   is clamped into the configured bounds and re-tested once; if it is
//!   still off land it is accepted anyway and counted as degraded.
//! - **Scenario**: up to `attempts` uniform jitters inside each node spec's
//!   box; the first on land wins, otherwise the bare anchor is used.
//! - **Fixed**: positions are taken verbatim.
//!
//! Regions and scenario candidates live in sampling coordinates (the land
//! oracle sees those); accepted candidates are then mapped through the
//! optional [`Projection`]. Ids are assigned densely in placement order.

use outbreak_core::{
    Bounds, Category, CategoryDistribution, LandOracle, Node, NodeId, Position, RandomStream,
    RegionTable,
};
use outbreak_space::Projection;
use tracing::warn;

use crate::config::{FixedNode, NodeSpec, Placement};

/// Consecutive rejections allowed per node, as a multiple of the target
/// count, before the clamp fallback kicks in.
pub const REJECTION_BUDGET_FACTOR: usize = 10;

/// Placement counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlacementReport {
    /// Nodes emitted.
    pub placed: usize,
    /// Candidates the land oracle turned down.
    pub rejected: usize,
    /// Candidates clamped into bounds after the rejection budget ran out.
    pub clamped: usize,
    /// Nodes accepted off land: clamped candidates that still failed, or
    /// scenario nodes that fell back to their anchor.
    pub degraded: usize,
}

/// Output of [`place`].
#[derive(Clone, Debug, Default)]
pub struct PlacedNodes {
    /// Secure nodes in id order, positions in plane coordinates.
    pub nodes: Vec<Node>,
    /// Label per node; `None` for region-sampled nodes.
    pub labels: Vec<Option<String>>,
    /// What happened along the way.
    pub report: PlacementReport,
}

impl PlacedNodes {
    fn with_capacity(n: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(n),
            labels: Vec::with_capacity(n),
            report: PlacementReport::default(),
        }
    }

    fn push(&mut self, position: Position, category: Category, label: Option<String>) {
        // Node count was checked to fit in u32 before placement.
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(id, position, category));
        self.labels.push(label);
        self.report.placed += 1;
    }
}

/// Produce the initial node set.
///
/// `placement` must already have passed
/// [`WorldConfig::validate`](crate::WorldConfig::validate).
pub fn place(
    placement: &Placement,
    land: &dyn LandOracle,
    projection: Option<&Projection>,
    rng: &mut RandomStream,
) -> PlacedNodes {
    let to_plane = |p: Position| projection.map_or(p, |proj| proj.project(p));
    match placement {
        Placement::Regions {
            node_count,
            regions,
            distribution,
            bounds,
        } => place_regions(
            *node_count,
            regions,
            distribution,
            *bounds,
            land,
            &to_plane,
            rng,
        ),
        Placement::Scenario { specs, attempts, .. } => {
            place_scenario(specs, *attempts, land, &to_plane, rng)
        }
        Placement::Fixed { nodes } => place_fixed(nodes),
    }
}

fn place_regions(
    node_count: usize,
    regions: &RegionTable,
    distribution: &CategoryDistribution,
    bounds: Bounds,
    land: &dyn LandOracle,
    to_plane: &dyn Fn(Position) -> Position,
    rng: &mut RandomStream,
) -> PlacedNodes {
    let mut out = PlacedNodes::with_capacity(node_count);
    let budget = node_count.saturating_mul(REJECTION_BUDGET_FACTOR);
    let mut consecutive = 0usize;

    while out.nodes.len() < node_count {
        let Some(region) = regions.pick(rng) else {
            break;
        };
        let mut candidate = region.jitter(rng);
        consecutive += 1;

        if !land.is_land(candidate.x, candidate.y) {
            out.report.rejected += 1;
            if consecutive <= budget {
                continue;
            }
            candidate = bounds.clamp(candidate);
            out.report.clamped += 1;
            let node = out.nodes.len();
            if land.is_land(candidate.x, candidate.y) {
                warn!(node, fallback = "clamped", consecutive, "placement budget exhausted");
            } else {
                out.report.degraded += 1;
                warn!(
                    node,
                    fallback = "clamped_off_land",
                    consecutive,
                    x = candidate.x,
                    y = candidate.y,
                    "placement budget exhausted, accepting off-land candidate"
                );
            }
        }

        let category = distribution.draw(rng);
        out.push(to_plane(candidate), category, None);
        consecutive = 0;
    }
    out
}

fn place_scenario(
    specs: &[NodeSpec],
    attempts: usize,
    land: &dyn LandOracle,
    to_plane: &dyn Fn(Position) -> Position,
    rng: &mut RandomStream,
) -> PlacedNodes {
    let mut out = PlacedNodes::with_capacity(specs.len());

    for spec in specs {
        let mut accepted = None;
        for _ in 0..attempts {
            let dx = rng.uniform_range(-spec.jitter_x, spec.jitter_x);
            let dy = rng.uniform_range(-spec.jitter_y, spec.jitter_y);
            let candidate = Position::new(spec.anchor.x + dx, spec.anchor.y + dy);
            if land.is_land(candidate.x, candidate.y) {
                accepted = Some(candidate);
                break;
            }
            out.report.rejected += 1;
        }

        let position = match accepted {
            Some(p) => p,
            // Zero attempts means jitter is disabled, not a failure.
            None if attempts == 0 => spec.anchor,
            None => {
                out.report.degraded += 1;
                warn!(
                    node = out.nodes.len(),
                    label = %spec.label,
                    fallback = "anchor",
                    attempts,
                    "no jittered candidate on land, using anchor"
                );
                spec.anchor
            }
        };
        out.push(to_plane(position), spec.category, Some(spec.label.clone()));
    }
    out
}

fn place_fixed(nodes: &[FixedNode]) -> PlacedNodes {
    let mut out = PlacedNodes::with_capacity(nodes.len());
    for fixed in nodes {
        out.push(fixed.position, fixed.category, Some(fixed.label.clone()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_SCENARIO_ATTEMPTS;
    use outbreak_core::Region;
    use outbreak_space::OpenLand;
    use outbreak_test_utils::{CountingLand, ScriptedLand};

    fn single_region(anchor: Position, spread: f64) -> RegionTable {
        RegionTable::new(vec![Region::new("r", anchor, 1.0, spread, spread)]).unwrap()
    }

    fn regions(node_count: usize, anchor: Position, spread: f64, bounds: Bounds) -> Placement {
        Placement::Regions {
            node_count,
            regions: single_region(anchor, spread),
            distribution: CategoryDistribution::new([
                (Category::Phone, 0.5),
                (Category::Server, 0.5),
            ])
            .unwrap(),
            bounds,
        }
    }

    fn wide() -> Bounds {
        Bounds::new(-100.0, 100.0, -100.0, 100.0)
    }

    fn specs(n: usize, jitter: f64) -> Vec<NodeSpec> {
        (0..n)
            .map(|i| {
                NodeSpec::new(
                    format!("site-{i}"),
                    Category::Computer,
                    Position::new(10.0 * i as f64, 5.0),
                    jitter,
                )
            })
            .collect()
    }

    // ── Regions ────────────────────────────────────────────────────

    #[test]
    fn regions_on_open_land_place_exactly_n() {
        let mut rng = RandomStream::new(1);
        let placed = place(
            &regions(50, Position::new(0.0, 0.0), 3.0, wide()),
            &OpenLand,
            None,
            &mut rng,
        );
        assert_eq!(placed.nodes.len(), 50);
        assert_eq!(placed.report.placed, 50);
        assert_eq!(placed.report.rejected, 0);
        for (i, n) in placed.nodes.iter().enumerate() {
            assert_eq!(n.id, NodeId(i as u32));
            assert!(n.is_secure());
        }
        assert!(placed.labels.iter().all(Option::is_none));
        // region roll + 2 gaussians + category roll
        assert_eq!(rng.draws(), 50 * 6);
    }

    #[test]
    fn rejected_candidates_skip_category_roll() {
        let land = ScriptedLand::new([false, false], true);
        let mut rng = RandomStream::new(2);
        let placed = place(
            &regions(3, Position::new(0.0, 0.0), 1.0, wide()),
            &land,
            None,
            &mut rng,
        );
        assert_eq!(placed.report.rejected, 2);
        assert_eq!(placed.report.clamped, 0);
        assert_eq!(rng.draws(), 2 * 5 + 3 * 6);
        assert_eq!(land.calls(), 5);
    }

    #[test]
    fn exhausted_budget_accepts_degraded_candidate() {
        let land = ScriptedLand::never();
        let mut rng = RandomStream::new(3);
        let bounds = Bounds::new(-1.0, 1.0, -1.0, 1.0);
        let placed = place(
            &regions(2, Position::new(50.0, 50.0), 1.0, bounds),
            &land,
            None,
            &mut rng,
        );
        let budget = 2 * REJECTION_BUDGET_FACTOR;
        assert_eq!(placed.nodes.len(), 2);
        assert_eq!(placed.report.rejected, 2 * (budget + 1));
        assert_eq!(placed.report.clamped, 2);
        assert_eq!(placed.report.degraded, 2);
        // Each node: budget + 1 tests, plus one re-test after clamping.
        assert_eq!(land.calls(), 2 * (budget + 2));
        assert!(placed.nodes.iter().all(|n| bounds.contains(n.position)));
    }

    #[test]
    fn clamp_can_rescue_a_candidate() {
        // Only the strip x <= 1 is land; the anchor is far to the right.
        let land = CountingLand::new(|x: f64, _y: f64| x <= 1.0);
        let mut rng = RandomStream::new(4);
        let bounds = Bounds::new(-1.0, 1.0, -1.0, 1.0);
        let placed = place(
            &regions(1, Position::new(80.0, 0.0), 0.01, bounds),
            &land,
            None,
            &mut rng,
        );
        assert_eq!(placed.report.clamped, 1);
        assert_eq!(placed.report.degraded, 0);
        assert_eq!(placed.nodes[0].position.x, 1.0);
    }

    #[test]
    fn projection_applies_after_land_test() {
        // Land only near the geographic origin; the projected plane
        // position (around x = 180) would fail this test.
        let land = |x: f64, _y: f64| x.abs() < 10.0;
        let projection = Projection::new(360.0, 180.0).unwrap();
        let mut rng = RandomStream::new(5);
        let placed = place(
            &regions(20, Position::new(0.0, 0.0), 0.5, wide()),
            &land,
            Some(&projection),
            &mut rng,
        );
        assert_eq!(placed.report.rejected, 0);
        for n in &placed.nodes {
            assert!((n.position.x - 180.0).abs() < 10.0);
            assert!((n.position.y - 90.0).abs() < 10.0);
        }
    }

    #[test]
    fn regions_are_reproducible() {
        let p = regions(100, Position::new(0.0, 0.0), 4.0, wide());
        let a = place(&p, &OpenLand, None, &mut RandomStream::new(9));
        let b = place(&p, &OpenLand, None, &mut RandomStream::new(9));
        assert_eq!(a.nodes, b.nodes);
    }

    // ── Scenario ───────────────────────────────────────────────────

    #[test]
    fn scenario_jitter_stays_in_box() {
        let specs = specs(6, 2.0);
        let placement = Placement::Scenario {
            node_count: 6,
            specs: specs.clone(),
            attempts: DEFAULT_SCENARIO_ATTEMPTS,
        };
        let mut rng = RandomStream::new(6);
        let placed = place(&placement, &OpenLand, None, &mut rng);
        assert_eq!(rng.draws(), 6 * 2);
        for (node, spec) in placed.nodes.iter().zip(&specs) {
            assert!((node.position.x - spec.anchor.x).abs() <= 2.0);
            assert!((node.position.y - spec.anchor.y).abs() <= 2.0);
            assert_eq!(node.category, Category::Computer);
        }
        assert_eq!(placed.labels[4].as_deref(), Some("site-4"));
    }

    #[test]
    fn scenario_falls_back_to_anchor() {
        let specs = specs(3, 2.0);
        let placement = Placement::Scenario {
            node_count: 3,
            specs: specs.clone(),
            attempts: 5,
        };
        let mut rng = RandomStream::new(7);
        let placed = place(&placement, &ScriptedLand::never(), None, &mut rng);
        assert_eq!(placed.report.degraded, 3);
        assert_eq!(placed.report.rejected, 15);
        assert_eq!(rng.draws(), 3 * 5 * 2);
        for (node, spec) in placed.nodes.iter().zip(&specs) {
            assert_eq!(node.position, spec.anchor);
        }
    }

    #[test]
    fn scenario_with_zero_attempts_uses_anchors_silently() {
        let placement = Placement::Scenario {
            node_count: 2,
            specs: specs(2, 1.0),
            attempts: 0,
        };
        let mut rng = RandomStream::new(8);
        let placed = place(&placement, &OpenLand, None, &mut rng);
        assert_eq!(placed.report.degraded, 0);
        assert_eq!(rng.draws(), 0);
    }

    // ── Fixed ──────────────────────────────────────────────────────

    #[test]
    fn fixed_placement_consumes_no_randomness() {
        let nodes = vec![
            FixedNode::new("a", Position::new(1.0, 2.0), Category::Iot),
            FixedNode::new("b", Position::new(3.0, 4.0), Category::Server),
        ];
        let projection = Projection::new(360.0, 180.0).unwrap();
        let mut rng = RandomStream::new(9);
        let placed = place(
            &Placement::Fixed {
                nodes: nodes.clone(),
            },
            &ScriptedLand::never(),
            Some(&projection),
            &mut rng,
        );
        assert_eq!(rng.draws(), 0);
        assert_eq!(placed.nodes[1].position, Position::new(3.0, 4.0));
        assert_eq!(placed.nodes[1].category, Category::Server);
        assert_eq!(placed.labels[0].as_deref(), Some("a"));
    }
}
