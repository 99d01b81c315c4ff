//! Land oracle implementations.
//!
//! All three implement [`LandOracle`] and are interchangeable; the world
//! holds whichever was chosen at startup as `Box<dyn LandOracle>`.

use outbreak_core::{Bounds, LandOracle, Position};

use crate::error::SpaceError;

/// Every coordinate is land.
#[derive(Clone, Copy, Debug, Default)]
pub struct OpenLand;

impl LandOracle for OpenLand {
    fn is_land(&self, _x: f64, _y: f64) -> bool {
        true
    }
}

/// Even-odd ray-casting containment test.
///
/// Edges with zero vertical extent never toggle; a point exactly on a
/// vertex or edge may fall on either side.
pub fn point_in_polygon(x: f64, y: f64, polygon: &[Position]) -> bool {
    let mut inside = false;
    let n = polygon.len();
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        if (a.y > y) == (b.y > y) {
            continue;
        }
        let dy = b.y - a.y;
        if dy == 0.0 {
            continue;
        }
        let crossing_x = (b.x - a.x) / dy * (y - a.y) + a.x;
        if x < crossing_x {
            inside = !inside;
        }
    }
    inside
}

/// Land is the union of a set of polygon outlines.
#[derive(Clone, Debug)]
pub struct PolygonLand {
    polygons: Vec<Vec<Position>>,
    bounds: Vec<Bounds>,
}

impl PolygonLand {
    /// Build from closed outlines (the last vertex connects back to the first).
    ///
    /// # Errors
    ///
    /// Returns [`SpaceError::DegeneratePolygon`] for an outline with fewer
    /// than three vertices.
    pub fn new(polygons: Vec<Vec<Position>>) -> Result<Self, SpaceError> {
        let mut bounds = Vec::with_capacity(polygons.len());
        for (index, poly) in polygons.iter().enumerate() {
            if poly.len() < 3 {
                return Err(SpaceError::DegeneratePolygon {
                    index,
                    vertices: poly.len(),
                });
            }
            bounds.push(bounding_box(poly));
        }
        Ok(Self { polygons, bounds })
    }

    /// Number of outlines.
    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    /// `true` if there are no outlines (nothing is land).
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }
}

fn bounding_box(poly: &[Position]) -> Bounds {
    poly.iter().fold(
        Bounds::new(f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY),
        |b, p| Bounds::new(b.min_x.min(p.x), b.max_x.max(p.x), b.min_y.min(p.y), b.max_y.max(p.y)),
    )
}

impl LandOracle for PolygonLand {
    fn is_land(&self, x: f64, y: f64) -> bool {
        let p = Position::new(x, y);
        self.polygons
            .iter()
            .zip(&self.bounds)
            .any(|(poly, b)| b.contains(p) && point_in_polygon(x, y, poly))
    }
}

/// Land sampled from a row-major boolean mask stretched over `extent`.
///
/// Row 0 is the top of the image, i.e. `extent.max_y`. Coordinates
/// outside the extent are water.
#[derive(Clone, Debug)]
pub struct RasterLand {
    width: usize,
    height: usize,
    mask: Vec<bool>,
    extent: Bounds,
}

impl RasterLand {
    /// Build from an explicit mask of `width * height` cells.
    ///
    /// # Errors
    ///
    /// [`SpaceError::RasterDimensions`] on a size mismatch,
    /// [`SpaceError::InvalidExtent`] for an empty image, a `width * height`
    /// that overflows `usize`, or an extent with zero or non-finite area.
    pub fn new(
        width: usize,
        height: usize,
        mask: Vec<bool>,
        extent: Bounds,
    ) -> Result<Self, SpaceError> {
        let Some(expected) = width.checked_mul(height) else {
            return Err(SpaceError::InvalidExtent {
                reason: format!("raster {width}x{height} overflows usize"),
            });
        };
        if mask.len() != expected {
            return Err(SpaceError::RasterDimensions {
                expected,
                actual: mask.len(),
            });
        }
        if expected == 0 {
            return Err(SpaceError::InvalidExtent {
                reason: "raster has zero cells".to_string(),
            });
        }
        if !extent.is_valid() || extent.width() <= 0.0 || extent.height() <= 0.0 {
            return Err(SpaceError::InvalidExtent {
                reason: format!("raster extent {extent:?} has no area"),
            });
        }
        Ok(Self {
            width,
            height,
            mask,
            extent,
        })
    }

    /// Build from 8-bit intensity samples; a pixel is land when its value
    /// is at least `threshold`.
    pub fn from_luma(
        width: usize,
        height: usize,
        pixels: &[u8],
        threshold: u8,
        extent: Bounds,
    ) -> Result<Self, SpaceError> {
        let mask = pixels.iter().map(|&v| v >= threshold).collect();
        Self::new(width, height, mask, extent)
    }

    /// Mask width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Mask height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Fraction of pixels marked as land.
    pub fn land_fraction(&self) -> f64 {
        self.mask.iter().filter(|&&m| m).count() as f64 / self.mask.len() as f64
    }

    fn pixel(&self, x: f64, y: f64) -> Option<usize> {
        if !self.extent.contains(Position::new(x, y)) {
            return None;
        }
        let u = (x - self.extent.min_x) / self.extent.width();
        let v = (self.extent.max_y - y) / self.extent.height();
        let col = ((u * self.width as f64) as usize).min(self.width - 1);
        let row = ((v * self.height as f64) as usize).min(self.height - 1);
        Some(row * self.width + col)
    }
}

impl LandOracle for RasterLand {
    fn is_land(&self, x: f64, y: f64) -> bool {
        self.pixel(x, y).is_some_and(|i| self.mask[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x0: f64, y0: f64, side: f64) -> Vec<Position> {
        vec![
            Position::new(x0, y0),
            Position::new(x0 + side, y0),
            Position::new(x0 + side, y0 + side),
            Position::new(x0, y0 + side),
        ]
    }

    #[test]
    fn open_land_accepts_everything() {
        assert!(OpenLand.is_land(1e9, -1e9));
    }

    #[test]
    fn point_in_square() {
        let sq = square(0.0, 0.0, 10.0);
        assert!(point_in_polygon(5.0, 5.0, &sq));
        assert!(!point_in_polygon(15.0, 5.0, &sq));
        assert!(!point_in_polygon(5.0, -1.0, &sq));
    }

    #[test]
    fn concave_polygon_notch_is_water() {
        // U shape: notch between x in (3, 7) above y = 4.
        let u = vec![
            Position::new(0.0, 0.0),
            Position::new(10.0, 0.0),
            Position::new(10.0, 10.0),
            Position::new(7.0, 10.0),
            Position::new(7.0, 4.0),
            Position::new(3.0, 4.0),
            Position::new(3.0, 10.0),
            Position::new(0.0, 10.0),
        ];
        assert!(point_in_polygon(1.5, 8.0, &u));
        assert!(!point_in_polygon(5.0, 8.0, &u));
        assert!(point_in_polygon(5.0, 2.0, &u));
    }

    #[test]
    fn polygon_land_is_union() {
        let land =
            PolygonLand::new(vec![square(0.0, 0.0, 1.0), square(10.0, 10.0, 1.0)]).unwrap();
        assert_eq!(land.len(), 2);
        assert!(land.is_land(0.5, 0.5));
        assert!(land.is_land(10.5, 10.5));
        assert!(!land.is_land(5.0, 5.0));
    }

    #[test]
    fn polygon_land_rejects_degenerate_outline() {
        let err = PolygonLand::new(vec![square(0.0, 0.0, 1.0), vec![Position::new(0.0, 0.0)]])
            .unwrap_err();
        assert_eq!(
            err,
            SpaceError::DegeneratePolygon {
                index: 1,
                vertices: 1
            }
        );
    }

    #[test]
    fn raster_rows_run_top_down() {
        // 2x2 mask: only the top-left pixel is land.
        let extent = Bounds::new(0.0, 2.0, 0.0, 2.0);
        let land = RasterLand::new(2, 2, vec![true, false, false, false], extent).unwrap();
        assert!(land.is_land(0.5, 1.5));
        assert!(!land.is_land(0.5, 0.5));
        assert!(!land.is_land(1.5, 1.5));
        assert!((land.land_fraction() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn raster_outside_extent_is_water() {
        let land = RasterLand::new(1, 1, vec![true], Bounds::new(0.0, 1.0, 0.0, 1.0)).unwrap();
        assert!(land.is_land(1.0, 1.0));
        assert!(!land.is_land(1.01, 0.5));
        assert!(!land.is_land(0.5, -0.01));
    }

    #[test]
    fn raster_from_luma_thresholds() {
        let extent = Bounds::new(-180.0, 180.0, -90.0, 90.0);
        let land = RasterLand::from_luma(2, 1, &[10, 200], 128, extent).unwrap();
        assert!(!land.is_land(-90.0, 0.0));
        assert!(land.is_land(90.0, 0.0));
    }

    #[test]
    fn raster_dimension_mismatch() {
        let extent = Bounds::new(0.0, 1.0, 0.0, 1.0);
        assert_eq!(
            RasterLand::new(2, 2, vec![true; 3], extent).unwrap_err(),
            SpaceError::RasterDimensions {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn raster_dimension_overflow_is_an_error() {
        let extent = Bounds::new(0.0, 1.0, 0.0, 1.0);
        assert!(matches!(
            RasterLand::new(usize::MAX, 2, vec![true; 4], extent),
            Err(SpaceError::InvalidExtent { .. })
        ));
        assert!(RasterLand::from_luma(usize::MAX / 2 + 1, 2, &[], 0, extent).is_err());
    }

    #[test]
    fn raster_rejects_flat_extent() {
        let extent = Bounds::new(0.0, 0.0, 0.0, 1.0);
        assert!(matches!(
            RasterLand::new(1, 1, vec![true], extent),
            Err(SpaceError::InvalidExtent { .. })
        ));
    }

    #[test]
    fn oracles_are_interchangeable_behind_dyn() {
        let extent = Bounds::new(0.0, 10.0, 0.0, 10.0);
        let oracles: Vec<Box<dyn LandOracle>> = vec![
            Box::new(OpenLand),
            Box::new(PolygonLand::new(vec![square(0.0, 0.0, 10.0)]).unwrap()),
            Box::new(RasterLand::new(1, 1, vec![true], extent).unwrap()),
        ];
        assert!(oracles.iter().all(|o| o.is_land(5.0, 5.0)));
    }
}
