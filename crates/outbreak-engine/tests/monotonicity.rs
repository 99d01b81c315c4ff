//! Integration test: infection is monotonic and only ever crosses graph
//! edges from nodes that were infected at tick start.

use std::collections::BTreeSet;

use outbreak_core::{Bounds, Category, NodeId};
use outbreak_engine::{FixedNode, OutbreakWorld, Placement, WorldConfig};
use outbreak_space::OpenLand;
use outbreak_test_utils::uniform_cloud;
use proptest::prelude::*;

fn cloud_world(seed: u64, n: usize) -> OutbreakWorld {
    let extent = Bounds::new(0.0, 400.0, 0.0, 300.0);
    let categories = Category::ALL;
    let nodes = uniform_cloud(seed, n, extent)
        .into_iter()
        .enumerate()
        .map(|(i, p)| FixedNode::new(format!("c{i}"), p, categories[i % categories.len()]))
        .collect();
    let config = WorldConfig::new(seed, Placement::Fixed { nodes }, Box::new(OpenLand));
    OutbreakWorld::new(config).unwrap()
}

fn infected_set(world: &OutbreakWorld) -> BTreeSet<NodeId> {
    world.snapshot().infected().collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn infected_never_reverts(seed in any::<u64>(), n in 20usize..200, ticks in 1usize..30) {
        let mut world = cloud_world(seed, n);
        world.seed_patient_zero().unwrap();
        let mut before = infected_set(&world);
        for _ in 0..ticks {
            world.step_sync();
            let after = infected_set(&world);
            prop_assert!(before.is_subset(&after));
            before = after;
        }
    }

    #[test]
    fn new_infections_are_neighbours_of_tick_start_sources(
        seed in any::<u64>(),
        n in 20usize..200,
        ticks in 1usize..20,
    ) {
        let mut world = cloud_world(seed, n);
        world.seed_patient_zero().unwrap();
        for _ in 0..ticks {
            let sources = infected_set(&world);
            let step = world.step_sync();
            let graph = step.snapshot.graph();
            for id in &step.newly_infected {
                prop_assert!(!sources.contains(id));
                prop_assert!(
                    graph.neighbours(*id).iter().any(|nb| sources.contains(nb)),
                    "node {} infected without an infected neighbour", id
                );
            }
        }
    }
}
