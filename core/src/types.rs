use ndarray::Array2;

/// Single coordinate axis used for grid width, height, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(col, row)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Whether `coords` lies inside a grid of `size`.
pub const fn in_bounds(coords: Coord2, size: Coord2) -> bool {
    coords.0 < size.0 && coords.1 < size.1
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        let (cols, rows) = self.dim();
        // dimensions always come from a `Coord2`, so they fit
        let size = (cols as Coord, rows as Coord);
        NeighborIter::new(index, size)
    }
}

const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let (col, row) = coords;
    let (dc, dr) = delta;

    let next_col = col.checked_add_signed(dc)?;
    let next_row = row.checked_add_signed(dr)?;

    in_bounds((next_col, next_row), bounds).then_some((next_col, next_row))
}

/// In-bounds 8-neighborhood of a cell, in row-major displacement order.
///
/// A center outside the grid has no neighbors.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        let index = if in_bounds(center, bounds) {
            0
        } else {
            DISPLACEMENTS.len() as u8
        };
        Self {
            center,
            bounds,
            index,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let delta = *DISPLACEMENTS.get(usize::from(self.index))?;
            self.index += 1;

            if let Some(next_item) = apply_delta(self.center, delta, self.bounds) {
                return Some(next_item);
            }
        }
    }
}
