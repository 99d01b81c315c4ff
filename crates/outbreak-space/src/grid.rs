//! Uniform-grid spatial index.
//!
//! Cell size equals the connection radius `R`. Two points within `R` of
//! each other sit at most one cell apart in exact arithmetic, but rounding
//! in `x / R` can push a pair sitting exactly on a boundary one cell
//! further, so queries scan the 5x5 block around a node's own cell. Queries
//! return a candidate superset; exact distance filtering is the caller's job.
//!
//! The block bound holds only while `|x / R|` and `|y / R|` stay below
//! [`EXACT_CELL_LIMIT`]; see [`SpatialGrid::is_exact`].

use indexmap::IndexMap;
use outbreak_core::{NodeId, Position};
use smallvec::SmallVec;

use crate::error::SpaceError;

/// Integer cell coordinates `(floor(x / R), floor(y / R))`.
pub type CellKey = (i64, i64);

/// Cells scanned on each side of the query cell.
pub const CELL_REACH: i64 = 2;

/// Largest `|coordinate / cell_size|` for which the [`CELL_REACH`] block is
/// guaranteed to hold every point within one cell size. Below `2^51` the
/// quotient rounds by at most 1/8 of a cell.
pub const EXACT_CELL_LIMIT: f64 = (1u64 << 51) as f64;

/// Per-cell bucket. Small buckets stay inline.
type Bucket = SmallVec<[NodeId; 8]>;

/// Buckets node ids into fixed-size square cells.
#[derive(Clone, Debug)]
pub struct SpatialGrid {
    cell_size: f64,
    cells: IndexMap<CellKey, Bucket>,
    len: usize,
}

impl SpatialGrid {
    /// Create an empty grid.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceError::InvalidRadius`] if `cell_size` is not a
    /// finite positive number.
    pub fn new(cell_size: f64) -> Result<Self, SpaceError> {
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(SpaceError::InvalidRadius { value: cell_size });
        }
        Ok(Self {
            cell_size,
            cells: IndexMap::new(),
            len: 0,
        })
    }

    /// Build a grid holding `positions[i]` under `NodeId(i)`.
    pub fn build(positions: &[Position], cell_size: f64) -> Result<Self, SpaceError> {
        let mut grid = Self::new(cell_size)?;
        for (i, p) in positions.iter().enumerate() {
            grid.insert(NodeId(i as u32), *p);
        }
        Ok(grid)
    }

    /// The cell edge length.
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Number of inserted nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` if nothing has been inserted.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of non-empty cells.
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    /// Cell containing `p`.
    ///
    /// Indices saturate at the `i64` range; NaN maps to cell 0.
    #[inline]
    pub fn cell_of(&self, p: Position) -> CellKey {
        (
            (p.x / self.cell_size).floor() as i64,
            (p.y / self.cell_size).floor() as i64,
        )
    }

    /// `true` if the candidate block around `p` is guaranteed to hold every
    /// point within one cell size of it.
    #[inline]
    pub fn is_exact(&self, p: Position) -> bool {
        (p.x / self.cell_size).abs() < EXACT_CELL_LIMIT
            && (p.y / self.cell_size).abs() < EXACT_CELL_LIMIT
    }

    /// Append `id` to the bucket of the cell containing `p`.
    ///
    /// Buckets preserve insertion order.
    pub fn insert(&mut self, id: NodeId, p: Position) {
        let key = self.cell_of(p);
        self.cells.entry(key).or_default().push(id);
        self.len += 1;
    }

    /// Ids bucketed in `key`, in insertion order.
    pub fn bucket(&self, key: CellKey) -> &[NodeId] {
        self.cells.get(&key).map(|b| b.as_slice()).unwrap_or(&[])
    }

    /// All ids in the 5x5 block around `p`'s cell, excluding `id` itself.
    ///
    /// Visits columns `dx = -2..=2` and, within each, rows `dy = -2..=2`.
    /// Cells whose index would leave the `i64` range are skipped. The
    /// result may contain nodes farther than one cell size away.
    pub fn candidates(&self, id: NodeId, p: Position) -> SmallVec<[NodeId; 32]> {
        let (cx, cy) = self.cell_of(p);
        let mut out = SmallVec::new();
        for dx in -CELL_REACH..=CELL_REACH {
            let Some(x) = cx.checked_add(dx) else {
                continue;
            };
            for dy in -CELL_REACH..=CELL_REACH {
                let Some(y) = cy.checked_add(dy) else {
                    continue;
                };
                out.extend(
                    self.bucket((x, y))
                        .iter()
                        .copied()
                        .filter(|&other| other != id),
                );
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_cell_size() {
        for v in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                SpatialGrid::new(v),
                Err(SpaceError::InvalidRadius { .. })
            ));
        }
    }

    #[test]
    fn cell_of_floors_negative_coordinates() {
        let g = SpatialGrid::new(10.0).unwrap();
        assert_eq!(g.cell_of(Position::new(0.0, 0.0)), (0, 0));
        assert_eq!(g.cell_of(Position::new(9.99, 10.0)), (0, 1));
        assert_eq!(g.cell_of(Position::new(-0.01, -10.0)), (-1, -1));
    }

    #[test]
    fn buckets_preserve_insertion_order() {
        let positions = [
            Position::new(1.0, 1.0),
            Position::new(50.0, 50.0),
            Position::new(2.0, 2.0),
            Position::new(3.0, 3.0),
        ];
        let g = SpatialGrid::build(&positions, 10.0).unwrap();
        assert_eq!(g.len(), 4);
        assert_eq!(g.occupied_cells(), 2);
        assert_eq!(g.bucket((0, 0)), &[NodeId(0), NodeId(2), NodeId(3)]);
        assert_eq!(g.bucket((5, 5)), &[NodeId(1)]);
        assert!(g.bucket((9, 9)).is_empty());
    }

    #[test]
    fn candidates_cover_adjacent_cells_and_skip_self() {
        let positions = [
            Position::new(5.0, 5.0),   // (0,0)
            Position::new(-5.0, 15.0), // (-1,1)
            Position::new(35.0, 5.0),  // (3,0): out of block
            Position::new(14.0, -3.0), // (1,-1)
            Position::new(25.0, -15.0), // (2,-2): block corner
        ];
        let g = SpatialGrid::build(&positions, 10.0).unwrap();
        let mut c = g.candidates(NodeId(0), positions[0]).into_vec();
        c.sort();
        assert_eq!(c, vec![NodeId(1), NodeId(3), NodeId(4)]);
    }

    #[test]
    fn saturated_cells_do_not_overflow() {
        let positions = [
            Position::new(1e300, -1e300),
            Position::new(f64::MAX, 0.0),
            Position::new(-f64::MAX, f64::MAX),
        ];
        let g = SpatialGrid::build(&positions, 1.0).unwrap();
        assert_eq!(g.cell_of(positions[0]), (i64::MAX, i64::MIN));
        for (i, p) in positions.iter().enumerate() {
            // Must not panic at the edge of the key range.
            let _ = g.candidates(NodeId(i as u32), *p);
        }
        assert_eq!(
            g.candidates(NodeId(0), positions[0]).into_vec(),
            Vec::<NodeId>::new()
        );
    }

    #[test]
    fn exactness_limit() {
        let g = SpatialGrid::new(2.0).unwrap();
        assert!(g.is_exact(Position::new(-1e6, 1e6)));
        assert!(g.is_exact(Position::new(EXACT_CELL_LIMIT, 0.0)));
        assert!(!g.is_exact(Position::new(2.0 * EXACT_CELL_LIMIT, 0.0)));
        assert!(!g.is_exact(Position::new(0.0, f64::NAN)));
    }
}
