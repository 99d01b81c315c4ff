//! Benchmark profiles for the Outbreak propagation engine.
//!
//! - [`reference_profile`]: the 3000-node world scenario on open land
//! - [`stress_profile`]: 30K nodes at fixed uniform positions
//! - [`cloud_positions`]: deterministic positions via seed

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use outbreak_core::{Bounds, Category, Position, RandomStream};
use outbreak_engine::scenario::{world_config, world_projection};
use outbreak_engine::{ConfigError, FixedNode, Placement, WorldConfig};
use outbreak_space::OpenLand;

/// Extent of the stress cloud. At R = 42 the mean degree is about 18.
pub const STRESS_EXTENT: Bounds = Bounds::new(0.0, 4000.0, 0.0, 2250.0);

/// The world scenario with every candidate accepted, projected onto a
/// 1280x720 viewport.
pub fn reference_profile(seed: u64) -> Result<WorldConfig, ConfigError> {
    let projection = world_projection(2000.0, 1000.0)?;
    world_config(seed, Box::new(OpenLand), Some(projection))
}

/// 30K fixed nodes spread uniformly over [`STRESS_EXTENT`].
pub fn stress_profile(seed: u64) -> WorldConfig {
    let nodes = cloud_positions(seed, 30_000, STRESS_EXTENT)
        .into_iter()
        .enumerate()
        .map(|(i, p)| {
            FixedNode::new(format!("s{i}"), p, Category::ALL[i % Category::ALL.len()])
        })
        .collect();
    WorldConfig::new(seed, Placement::Fixed { nodes }, Box::new(OpenLand))
}

/// `n` uniform positions inside `extent`, reproducible from `seed`.
pub fn cloud_positions(seed: u64, n: usize, extent: Bounds) -> Vec<Position> {
    let mut rng = RandomStream::new(seed);
    (0..n)
        .map(|_| {
            let x = rng.uniform_range(extent.min_x, extent.max_x);
            let y = rng.uniform_range(extent.min_y, extent.max_y);
            Position::new(x, y)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_validate() {
        assert!(reference_profile(42).unwrap().validate().is_ok());
        assert!(stress_profile(42).validate().is_ok());
    }

    #[test]
    fn cloud_is_deterministic() {
        let a = cloud_positions(3, 100, STRESS_EXTENT);
        let b = cloud_positions(3, 100, STRESS_EXTENT);
        assert_eq!(a, b);
        assert!(a.iter().all(|p| STRESS_EXTENT.contains(*p)));
    }
}
