//! Equirectangular projection from geographic coordinates to the plane.

use outbreak_core::Position;

use crate::error::SpaceError;

/// Maps `(lon, lat)` degrees onto a scaled, offset map image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    /// Native map width in plane units.
    pub map_width: f64,
    /// Native map height in plane units.
    pub map_height: f64,
    /// Uniform scale applied to the map.
    pub scale: f64,
    /// Horizontal offset of the scaled map.
    pub offset_x: f64,
    /// Vertical offset of the scaled map.
    pub offset_y: f64,
}

impl Projection {
    /// Identity-scaled projection with no offset.
    pub fn new(map_width: f64, map_height: f64) -> Result<Self, SpaceError> {
        let p = Self {
            map_width,
            map_height,
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        };
        p.validate()?;
        Ok(p)
    }

    /// Fit a `map_width x map_height` map inside a `view_width x
    /// view_height` viewport, preserving aspect ratio and centring it.
    ///
    /// Offsets are rounded to whole units.
    pub fn fit(
        map_width: f64,
        map_height: f64,
        view_width: f64,
        view_height: f64,
    ) -> Result<Self, SpaceError> {
        if !(view_width.is_finite() && view_height.is_finite())
            || view_width <= 0.0
            || view_height <= 0.0
        {
            return Err(SpaceError::InvalidExtent {
                reason: format!("viewport {view_width}x{view_height} has no area"),
            });
        }
        let mut p = Self::new(map_width, map_height)?;
        p.scale = (view_width / map_width).min(view_height / map_height);
        let scaled_w = (map_width * p.scale).trunc();
        let scaled_h = (map_height * p.scale).trunc();
        p.offset_x = ((view_width - scaled_w) / 2.0).round();
        p.offset_y = ((view_height - scaled_h) / 2.0).round();
        Ok(p)
    }

    /// Check that the map has area and the scale is finite and positive.
    pub fn validate(&self) -> Result<(), SpaceError> {
        let dims_ok = self.map_width.is_finite()
            && self.map_height.is_finite()
            && self.map_width > 0.0
            && self.map_height > 0.0;
        if !dims_ok {
            return Err(SpaceError::InvalidExtent {
                reason: format!("map {}x{} has no area", self.map_width, self.map_height),
            });
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(SpaceError::InvalidExtent {
                reason: format!("scale {} must be finite and > 0", self.scale),
            });
        }
        Ok(())
    }

    /// Project `(lon, lat)` into the plane.
    pub fn to_plane(&self, lon: f64, lat: f64) -> Position {
        let x = (lon + 180.0) / 360.0 * self.map_width * self.scale + self.offset_x;
        let y = (1.0 - (lat + 90.0) / 180.0) * self.map_height * self.scale + self.offset_y;
        Position::new(x, y)
    }

    /// Project a position whose `x` is longitude and `y` latitude.
    pub fn project(&self, geo: Position) -> Position {
        self.to_plane(geo.x, geo.y)
    }

    /// Inverse of [`project`](Self::project): plane back to `(lon, lat)`.
    pub fn unproject(&self, plane: Position) -> Position {
        let lon = (plane.x - self.offset_x) / (self.map_width * self.scale) * 360.0 - 180.0;
        let lat = (1.0 - (plane.y - self.offset_y) / (self.map_height * self.scale)) * 180.0 - 90.0;
        Position::new(lon, lat)
    }
}
