//! Static, read-only configuration tables.
//!
//! [`RegionTable`] biases random placement toward weighted anchors;
//! [`CategoryDistribution`] assigns device categories. Both select
//! entries with the same cumulative-roll algorithm
//! ([`RandomStream::pick_cumulative`]).

use indexmap::IndexMap;

use crate::error::TableError;
use crate::geometry::Position;
use crate::node::Category;
use crate::rng::RandomStream;

/// Tolerance when checking that category shares sum to one.
const SHARE_SUM_TOLERANCE: f64 = 1e-6;

/// A weighted anchor point with positional spread.
#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    /// Display name.
    pub name: String,
    /// Centre of the Gaussian jitter, in sampling coordinates.
    pub anchor: Position,
    /// Relative selection weight.
    pub weight: f64,
    /// Standard deviation of the horizontal jitter.
    pub spread_x: f64,
    /// Standard deviation of the vertical jitter.
    pub spread_y: f64,
}

impl Region {
    /// Create a region.
    pub fn new(
        name: impl Into<String>,
        anchor: Position,
        weight: f64,
        spread_x: f64,
        spread_y: f64,
    ) -> Self {
        Self {
            name: name.into(),
            anchor,
            weight,
            spread_x,
            spread_y,
        }
    }

    /// Draw a jittered candidate around the anchor.
    ///
    /// Draw order: vertical Gaussian, then horizontal Gaussian.
    pub fn jitter(&self, rng: &mut RandomStream) -> Position {
        let y = rng.gaussian(self.anchor.y, self.spread_y);
        let x = rng.gaussian(self.anchor.x, self.spread_x);
        Position::new(x, y)
    }
}

/// Ordered list of weighted regions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegionTable {
    regions: Vec<Region>,
}

impl RegionTable {
    /// Build a table, validating every entry.
    pub fn new(regions: Vec<Region>) -> Result<Self, TableError> {
        let table = Self { regions };
        table.validate()?;
        Ok(table)
    }

    /// Check weights, spreads, and anchors.
    pub fn validate(&self) -> Result<(), TableError> {
        if self.regions.is_empty() {
            return Err(TableError::Empty { table: "region" });
        }
        for r in &self.regions {
            if !r.weight.is_finite() || r.weight < 0.0 {
                return Err(TableError::InvalidWeight {
                    entry: r.name.clone(),
                    value: r.weight,
                });
            }
            if !(r.spread_x.is_finite() && r.spread_y.is_finite())
                || r.spread_x < 0.0
                || r.spread_y < 0.0
            {
                return Err(TableError::InvalidSpread {
                    region: r.name.clone(),
                });
            }
            if !r.anchor.is_finite() {
                return Err(TableError::InvalidAnchor {
                    region: r.name.clone(),
                });
            }
        }
        if self.total_weight() <= 0.0 {
            return Err(TableError::ZeroTotalWeight);
        }
        Ok(())
    }

    /// The regions, in table order.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Number of regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// `true` if the table has no regions.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Sum of all region weights.
    pub fn total_weight(&self) -> f64 {
        self.regions.iter().map(|r| r.weight).sum()
    }

    /// Select a region by weight. Consumes one draw.
    ///
    /// Returns `None` only for an empty table.
    pub fn pick(&self, rng: &mut RandomStream) -> Option<&Region> {
        let weights: Vec<f64> = self.regions.iter().map(|r| r.weight).collect();
        rng.pick_cumulative(&weights).map(|i| &self.regions[i])
    }
}

/// Closed categorical distribution over [`Category`].
///
/// Insertion order is part of the determinism contract: the cumulative
/// roll walks entries in the order they were added.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryDistribution {
    shares: IndexMap<Category, f64>,
}

impl CategoryDistribution {
    /// Build a distribution from `(category, share)` pairs.
    ///
    /// Later duplicates overwrite earlier shares but keep the first
    /// position.
    pub fn new(shares: impl IntoIterator<Item = (Category, f64)>) -> Result<Self, TableError> {
        let dist = Self {
            shares: shares.into_iter().collect(),
        };
        dist.validate()?;
        Ok(dist)
    }

    /// A distribution that always yields `category`.
    pub fn single(category: Category) -> Self {
        let mut shares = IndexMap::new();
        shares.insert(category, 1.0);
        Self { shares }
    }

    /// Check shares are finite, non-negative, and sum to one.
    pub fn validate(&self) -> Result<(), TableError> {
        if self.shares.is_empty() {
            return Err(TableError::Empty { table: "category" });
        }
        for (category, share) in &self.shares {
            if !share.is_finite() || *share < 0.0 {
                return Err(TableError::InvalidWeight {
                    entry: category.name().to_string(),
                    value: *share,
                });
            }
        }
        let sum: f64 = self.shares.values().sum();
        if (sum - 1.0).abs() > SHARE_SUM_TOLERANCE {
            return Err(TableError::DistributionSum { sum });
        }
        Ok(())
    }

    /// Share assigned to `category` (zero if absent).
    pub fn share(&self, category: Category) -> f64 {
        self.shares.get(&category).copied().unwrap_or(0.0)
    }

    /// Iterate `(category, share)` in roll order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        self.shares.iter().map(|(c, s)| (*c, *s))
    }

    /// Draw a category. Consumes one draw.
    pub fn draw(&self, rng: &mut RandomStream) -> Category {
        let weights: Vec<f64> = self.shares.values().copied().collect();
        // Constructors guarantee at least one entry.
        let i = rng.pick_cumulative(&weights).unwrap_or(0);
        self.shares.get_index(i).map_or(Category::Phone, |(c, _)| *c)
    }
}
