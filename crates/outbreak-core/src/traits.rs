//! Capability traits consumed by the engine.

/// Boundary predicate deciding whether a coordinate is valid terrain.
///
/// Placement only ever needs the boolean answer. Implementations may test
/// polygon containment, sample a raster mask, or accept everything; the
/// engine selects one at startup and holds it as `Box<dyn LandOracle>`.
///
/// Any `Fn(f64, f64) -> bool` closure is a land oracle:
///
/// ```
/// use outbreak_core::LandOracle;
///
/// let upper_half = |_x: f64, y: f64| y >= 0.0;
/// assert!(upper_half.is_land(3.0, 1.0));
/// assert!(!upper_half.is_land(3.0, -1.0));
/// ```
pub trait LandOracle: Send + Sync {
    /// `true` if `(x, y)` is on land.
    fn is_land(&self, x: f64, y: f64) -> bool;
}

impl<F> LandOracle for F
where
    F: Fn(f64, f64) -> bool + Send + Sync,
{
    fn is_land(&self, x: f64, y: f64) -> bool {
        self(x, y)
    }
}
