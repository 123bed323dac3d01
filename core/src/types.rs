use smallvec::SmallVec;

/// Single coordinate axis used for grid width, height, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`, `x` being the column and `y` the row.
pub type Coord2 = (Coord, Coord);

/// Unbounded coordinates as decoded from a cell name, before any bounds check.
pub type RawCoord = (i64, i64);

/// Up to 8 neighbors of a cell, kept inline.
pub type Neighbors = SmallVec<[Coord2; 8]>;

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

/// Every in-bounds coordinate around `coords` on a `width` x `height` grid.
pub fn get_neighbors(coords: Coord2, width: Coord, height: Coord) -> Neighbors {
    NeighborIter::new(coords, (width, height)).collect()
}

/// Offsets to the surrounding cells, row by row.
const OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Coordinates around a center cell that fall inside `bounds`.
#[derive(Debug, Clone)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    offsets: core::slice::Iter<'static, (i8, i8)>,
}

impl NeighborIter {
    pub(crate) fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            offsets: OFFSETS.iter(),
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        let (x, y) = self.center;
        let (width, height) = self.bounds;

        self.offsets.find_map(|&(dx, dy)| {
            let nx = x.checked_add_signed(dx).filter(|&nx| nx < width)?;
            let ny = y.checked_add_signed(dy).filter(|&ny| ny < height)?;
            Some((nx, ny))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut neighbors: Neighbors) -> Vec<Coord2> {
        neighbors.sort_unstable();
        neighbors.into_vec()
    }

    #[test]
    fn corners_have_three_neighbors() {
        assert_eq!(sorted(get_neighbors((0, 0), 5, 5)), [(0, 1), (1, 0), (1, 1)]);
        assert_eq!(sorted(get_neighbors((4, 0), 5, 5)), [(3, 0), (3, 1), (4, 1)]);
        assert_eq!(sorted(get_neighbors((0, 4), 5, 5)), [(0, 3), (1, 3), (1, 4)]);
        assert_eq!(sorted(get_neighbors((4, 4), 5, 5)), [(3, 3), (3, 4), (4, 3)]);
    }

    #[test]
    fn left_edge_has_five_neighbors() {
        assert_eq!(
            sorted(get_neighbors((0, 2), 5, 5)),
            [(0, 1), (0, 3), (1, 1), (1, 2), (1, 3)]
        );
    }

    #[test]
    fn interior_has_eight_neighbors() {
        assert_eq!(
            sorted(get_neighbors((2, 2), 5, 5)),
            [
                (1, 1),
                (1, 2),
                (1, 3),
                (2, 1),
                (2, 3),
                (3, 1),
                (3, 2),
                (3, 3)
            ]
        );
    }

    #[test]
    fn neighbor_counts_hold_across_a_grid() {
        let (width, height) = (6, 4);
        for x in 0..width {
            for y in 0..height {
                let neighbors = get_neighbors((x, y), width, height);
                let on_x_edge = x == 0 || x == width - 1;
                let on_y_edge = y == 0 || y == height - 1;
                let expected = match (on_x_edge, on_y_edge) {
                    (true, true) => 3,
                    (true, false) | (false, true) => 5,
                    (false, false) => 8,
                };
                assert_eq!(neighbors.len(), expected, "at ({x}, {y})");
                assert!(!neighbors.contains(&(x, y)));
                assert!(neighbors.iter().all(|&(nx, ny)| nx < width && ny < height));
            }
        }
    }

    #[test]
    fn smallest_grid_is_fully_connected() {
        assert_eq!(sorted(get_neighbors((1, 1), 2, 2)), [(0, 0), (0, 1), (1, 0)]);
    }
}
