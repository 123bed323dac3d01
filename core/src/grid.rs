use core::ops::Index;
use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::*;

/// Rectangular minefield owned by a game, addressed by `(x, y)`.
///
/// Cells can only be changed from inside the crate, so outside code observes
/// a grid that evolves through applied events alone.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<Cell>,
}

impl Grid {
    pub(crate) fn empty((width, height): Coord2) -> Self {
        Self {
            cells: Array2::default((width, height).to_nd_index()),
        }
    }

    /// Lays out a grid with mines at exactly the given coordinates.
    ///
    /// Repeated coordinates count once.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut grid = Self::empty(size);

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            grid.place_mine(coords);
        }

        Ok(grid)
    }

    /// Marks `coords` mined and bumps the count of each neighbor.
    pub(crate) fn place_mine(&mut self, coords: Coord2) {
        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.is_mined {
            return;
        }
        cell.is_mined = true;

        for pos in self.iter_neighbors(coords) {
            self.cells[pos.to_nd_index()].adjacent_mines += 1;
        }
    }

    pub fn size(&self) -> Coord2 {
        (self.width(), self.height())
    }

    /// Saturates for deserialized grids wider than a `Coord`, see [`Grid::config`].
    pub fn width(&self) -> Coord {
        Coord::try_from(self.cells.dim().0).unwrap_or(Coord::MAX)
    }

    pub fn height(&self) -> Coord {
        Coord::try_from(self.cells.dim().1).unwrap_or(Coord::MAX)
    }

    /// The configuration this grid satisfies, checked against the real
    /// dimensions of the cell buffer.
    pub fn config(&self) -> Result<GameConfig> {
        let (width, height) = self.cells.dim();
        let (Ok(w), Ok(h)) = (Coord::try_from(width), Coord::try_from(height)) else {
            return Err(GameError::OversizedGrid { width, height });
        };
        GameConfig::new(w, h, self.mine_count())
    }

    pub fn cell_count(&self) -> CellCount {
        mult(self.width(), self.height())
    }

    pub fn mine_count(&self) -> CellCount {
        self.count_cells(|cell| cell.is_mined)
    }

    pub fn revealed_count(&self) -> CellCount {
        self.count_cells(|cell| cell.is_revealed)
    }

    pub fn revealed_or_flagged_count(&self) -> CellCount {
        self.count_cells(|cell| cell.is_revealed_or_flagged())
    }

    fn count_cells(&self, predicate: impl Fn(&Cell) -> bool) -> CellCount {
        let count = self.cells.iter().filter(|cell| predicate(cell)).count();
        // never more than 40x40 cells
        count as CellCount
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<Cell> {
        self.cells.get(coords.to_nd_index()).copied()
    }

    /// Narrows decoded coordinates to ones inside this grid.
    pub fn checked_coords(&self, (x, y): RawCoord) -> Option<Coord2> {
        let x = Coord::try_from(x).ok()?;
        let y = Coord::try_from(y).ok()?;
        (x < self.width() && y < self.height()).then_some((x, y))
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    /// All cells with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((x, y), &cell)| ((x as Coord, y as Coord), cell))
    }

    /// Cells of row `y`, left to right.
    pub fn row(&self, y: Coord) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.index_axis(Axis(1), y.into()).into_iter()
    }

    pub(crate) fn cell_mut(&mut self, coords: Coord2) -> &mut Cell {
        &mut self.cells[coords.to_nd_index()]
    }

    pub(crate) fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> + '_ {
        self.cells.iter_mut()
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}
