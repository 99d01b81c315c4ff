//! Built-in world scenario: weighted global population hubs.
//!
//! Regions are anchored at `(longitude, latitude)` in degrees, so the
//! land oracle paired with [`world_config`] must answer in geographic
//! coordinates. Pass a [`Projection`] to map accepted nodes onto a
//! screen-sized plane.

use outbreak_core::{
    Bounds, Category, CategoryDistribution, LandOracle, Position, Region, RegionTable, TableError,
};
use outbreak_space::{Projection, SpaceError};

use crate::config::{ConfigError, Placement, WorldConfig};

/// Node count of the world scenario.
pub const WORLD_NODE_COUNT: usize = 3000;

/// Seed used by the reference run.
pub const WORLD_SEED: u64 = 42;

/// Clamp range for the rejection fallback: longitude, then latitude.
pub const WORLD_CLAMP: Bounds = Bounds::new(-179.0, 179.0, -85.0, 85.0);

/// Viewport the reference run fits its map into.
pub const VIEWPORT: (f64, f64) = (1280.0, 720.0);

// (name, latitude, longitude, weight, latitude spread, longitude spread)
#[rustfmt::skip]
const POPULATION_CENTERS: [(&str, f64, f64, f64, f64, f64); 57] = [
    ("US East Coast", 40.0, -74.0, 0.055, 3.5, 4.5),
    ("US West Coast", 37.5, -122.0, 0.032, 3.0, 4.0),
    ("US Midwest", 41.5, -88.0, 0.028, 3.0, 4.0),
    ("US South", 33.0, -84.0, 0.025, 3.0, 4.0),
    ("Canada East", 46.5, -71.0, 0.018, 3.0, 6.0),
    ("Canada West", 53.0, -113.0, 0.014, 4.0, 5.0),
    ("Mexico City", 19.4, -99.1, 0.022, 2.5, 3.5),
    ("Central America", 14.3, -90.5, 0.012, 2.0, 3.0),
    ("Brazil Southeast", -23.5, -46.6, 0.04, 3.0, 4.0),
    ("Brazil Northeast", -8.0, -34.9, 0.018, 3.0, 4.0),
    ("Argentina", -34.6, -58.4, 0.017, 3.0, 4.0),
    ("Peru", -12.0, -77.0, 0.015, 2.5, 3.5),
    ("Colombia", 4.6, -74.1, 0.015, 2.5, 3.5),
    ("UK", 53.0, -1.5, 0.028, 3.0, 3.0),
    ("France / Benelux", 49.5, 2.0, 0.034, 3.0, 3.0),
    ("Central Europe", 48.0, 16.0, 0.034, 3.0, 3.0),
    ("Iberia", 40.0, -3.0, 0.022, 3.0, 3.0),
    ("Italy", 42.5, 12.5, 0.022, 2.5, 2.5),
    ("Eastern Europe", 52.0, 20.0, 0.03, 3.0, 3.0),
    ("Scandinavia", 59.5, 18.0, 0.015, 4.0, 4.0),
    ("European Russia", 56.0, 38.0, 0.032, 3.5, 6.0),
    ("North Africa", 31.0, 31.0, 0.032, 3.0, 4.0),
    ("West Africa", 6.0, -1.5, 0.028, 3.0, 4.0),
    ("Nigeria", 9.0, 7.4, 0.026, 3.0, 4.0),
    ("East Africa", 1.0, 37.0, 0.027, 3.5, 4.0),
    ("Ethiopia", 9.0, 39.0, 0.016, 2.5, 3.0),
    ("Southern Africa", -26.0, 28.0, 0.026, 3.5, 4.5),
    ("Turkey", 39.0, 35.0, 0.019, 2.5, 3.0),
    ("Persian Gulf", 25.0, 55.0, 0.015, 2.5, 3.5),
    ("Iran", 35.7, 52.3, 0.02, 3.0, 3.5),
    ("Pakistan", 31.5, 74.3, 0.028, 3.0, 3.0),
    ("North India", 27.0, 77.0, 0.065, 3.0, 3.0),
    ("West India", 19.0, 73.0, 0.055, 2.5, 3.0),
    ("South India", 13.0, 80.0, 0.04, 2.5, 3.0),
    ("Bangladesh", 23.7, 90.3, 0.026, 2.0, 2.5),
    ("Sri Lanka", 7.3, 80.7, 0.006, 1.2, 1.2),
    ("Nepal", 27.7, 85.3, 0.01, 1.8, 2.0),
    ("Myanmar", 18.0, 96.0, 0.018, 3.0, 3.5),
    ("Central China", 34.0, 113.0, 0.08, 3.5, 4.5),
    ("Northern China", 40.5, 116.5, 0.06, 3.0, 3.5),
    ("Southern China", 23.5, 113.0, 0.07, 3.0, 3.5),
    ("Sichuan Basin", 30.5, 104.0, 0.045, 3.0, 3.0),
    ("Northeast China", 44.0, 125.0, 0.03, 3.0, 3.5),
    ("Korean Peninsula", 37.5, 127.0, 0.028, 2.5, 2.5),
    ("Japan", 35.5, 138.5, 0.032, 3.0, 3.0),
    ("Taiwan", 24.0, 121.0, 0.01, 1.8, 2.0),
    ("Hong Kong / Pearl River", 22.8, 114.2, 0.018, 1.8, 2.2),
    ("Vietnam", 16.0, 107.0, 0.022, 3.0, 3.0),
    ("Thailand", 13.5, 101.0, 0.018, 2.5, 2.5),
    ("Malaysia / Singapore", 3.0, 101.5, 0.016, 2.0, 2.5),
    ("Indonesia West", -5.0, 106.0, 0.028, 3.0, 4.0),
    ("Indonesia East", -3.0, 121.0, 0.02, 3.0, 4.0),
    ("Philippines", 14.5, 121.0, 0.022, 2.5, 3.0),
    ("New Guinea", -4.5, 144.0, 0.012, 3.0, 3.5),
    ("Australia East", -27.0, 134.0, 0.02, 4.0, 5.0),
    ("Australia West", -31.5, 118.0, 0.01, 4.0, 5.0),
    ("New Zealand", -41.0, 174.0, 0.006, 2.5, 3.0),
];

/// The population hubs as regions, in table order.
///
/// Table order matters: the cumulative region roll walks it front to back.
pub fn world_population_centers() -> Vec<Region> {
    POPULATION_CENTERS
        .iter()
        .map(|&(name, lat, lon, weight, lat_spread, lon_spread)| {
            Region::new(name, Position::new(lon, lat), weight, lon_spread, lat_spread)
        })
        .collect()
}

/// Device mix: phone 0.35, computer 0.30, iot 0.20, server 0.15.
pub fn default_category_distribution() -> Result<CategoryDistribution, TableError> {
    CategoryDistribution::new([
        (Category::Phone, 0.35),
        (Category::Computer, 0.3),
        (Category::Iot, 0.2),
        (Category::Server, 0.15),
    ])
}

/// Fit a `map_width x map_height` map into [`VIEWPORT`].
pub fn world_projection(map_width: f64, map_height: f64) -> Result<Projection, SpaceError> {
    Projection::fit(map_width, map_height, VIEWPORT.0, VIEWPORT.1)
}

/// The world scenario: 3000 region-sampled nodes, R = 42, K = 4.
pub fn world_config(
    seed: u64,
    land: Box<dyn LandOracle>,
    projection: Option<Projection>,
) -> Result<WorldConfig, ConfigError> {
    let placement = Placement::Regions {
        node_count: WORLD_NODE_COUNT,
        regions: RegionTable::new(world_population_centers())?,
        distribution: default_category_distribution()?,
        bounds: WORLD_CLAMP,
    };
    let mut config = WorldConfig::new(seed, placement, land);
    config.projection = projection;
    Ok(config)
}
