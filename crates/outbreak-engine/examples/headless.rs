//! Headless outbreak: the world scenario without a renderer.
//!
//! Demonstrates:
//!   1. Building a land oracle from coarse continent outlines
//!   2. Fitting the map projection into a viewport
//!   3. Building the world scenario and seeding patient zero
//!   4. Stepping until the outbreak stalls, printing a HUD line per tick
//!
//! Run with:
//!   cargo run --example headless
//!
//! Set `RUST_LOG=outbreak_engine=debug` to see per-tick counters.

use outbreak_core::Position;
use outbreak_engine::scenario::{world_config, world_projection, WORLD_SEED};
use outbreak_engine::OutbreakWorld;
use outbreak_space::PolygonLand;
use tracing_subscriber::EnvFilter;

const MAX_TICKS: usize = 400;
/// Stop after this many consecutive ticks without a new infection.
const STALL_TICKS: usize = 25;

// ─── Land ───────────────────────────────────────────────────────

fn outline(points: &[(f64, f64)]) -> Vec<Position> {
    points.iter().map(|&(lon, lat)| Position::new(lon, lat)).collect()
}

/// Very rough continent outlines in (lon, lat) degrees.
fn coarse_continents() -> Vec<Vec<Position>> {
    vec![
        // North and Central America
        outline(&[
            (-168.0, 65.0),
            (-140.0, 70.0),
            (-95.0, 72.0),
            (-60.0, 60.0),
            (-52.0, 47.0),
            (-80.0, 25.0),
            (-97.0, 16.0),
            (-78.0, 7.0),
            (-92.0, 14.0),
            (-118.0, 32.0),
            (-125.0, 48.0),
            (-150.0, 58.0),
        ]),
        // South America
        outline(&[
            (-80.0, 10.0),
            (-60.0, 11.0),
            (-34.0, -6.0),
            (-40.0, -22.0),
            (-58.0, -38.0),
            (-68.0, -55.0),
            (-75.0, -45.0),
            (-71.0, -18.0),
            (-81.0, -5.0),
        ]),
        // Europe, Africa and Asia as one mass
        outline(&[
            (-10.0, 36.0),
            (-18.0, 15.0),
            (-10.0, 4.0),
            (10.0, 3.0),
            (13.0, -17.0),
            (20.0, -35.0),
            (35.0, -25.0),
            (41.0, -12.0),
            (52.0, 12.0),
            (60.0, 22.0),
            (73.0, 18.0),
            (80.0, 6.0),
            (92.0, 20.0),
            (100.0, 2.0),
            (109.0, 10.0),
            (122.0, 30.0),
            (142.0, 46.0),
            (180.0, 68.0),
            (100.0, 78.0),
            (30.0, 71.0),
            (5.0, 62.0),
            (-10.0, 51.0),
        ]),
        // Japan
        outline(&[(130.0, 31.0), (142.0, 35.0), (146.0, 44.0), (140.0, 41.0)]),
        // Maritime Southeast Asia and New Guinea
        outline(&[
            (95.0, 5.0),
            (126.0, 10.0),
            (150.0, -6.0),
            (141.0, -9.0),
            (105.0, -8.0),
        ]),
        // Australia
        outline(&[
            (114.0, -22.0),
            (130.0, -11.0),
            (145.0, -12.0),
            (153.0, -28.0),
            (145.0, -39.0),
            (115.0, -34.0),
        ]),
        // New Zealand
        outline(&[(166.0, -46.0), (173.0, -34.0), (179.0, -38.0), (170.0, -47.0)]),
    ]
}

// ─── Main ───────────────────────────────────────────────────────

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,outbreak_engine=info")),
        )
        .init();

    let land = PolygonLand::new(coarse_continents())?;
    let projection = world_projection(2000.0, 1000.0)?;
    let config = world_config(WORLD_SEED, Box::new(land), Some(projection))?;
    let mut world = OutbreakWorld::new(config)?;

    let report = world.placement_report();
    println!(
        "placed {} nodes ({} rejected candidates, {} degraded), {} edges",
        report.placed,
        report.rejected,
        report.degraded,
        world.graph().edge_count()
    );

    if let Some(id) = world.seed_patient_zero() {
        println!("patient zero: node {id} at {:?}", world.nodes()[id.index()].position);
    }

    let mut stalled = 0;
    for _ in 0..MAX_TICKS {
        let step = world.step_sync();
        let counts = step.snapshot.counts();
        println!(
            "tick {:>4}  Secure: {:>5}  Infected: {:>5}  (+{})",
            step.snapshot.tick().0,
            counts.secure,
            counts.infected,
            step.newly_infected.len()
        );
        if counts.secure == 0 {
            break;
        }
        stalled = if step.newly_infected.is_empty() { stalled + 1 } else { 0 };
        if stalled >= STALL_TICKS {
            println!("no new infections for {STALL_TICKS} ticks, stopping");
            break;
        }
    }

    println!("final state hash: {:016x}", world.state_hash());
    Ok(())
}
