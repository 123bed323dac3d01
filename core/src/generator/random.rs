use hashbrown::HashSet;

use super::*;

/// Uniform placement without replacement: draw a cell, draw again if it was
/// already taken.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomGridGenerator {
    seed: u64,
}

impl RandomGridGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }
}

impl GridGenerator for RandomGridGenerator {
    fn generate(self, config: GameConfig) -> Grid {
        use rand::prelude::*;

        let size = config.size();
        let total_cells = config.total_cells();
        let mut grid = Grid::empty(size);

        // optimize for full boards
        if config.mines >= total_cells {
            for x in 0..config.width {
                for y in 0..config.height {
                    grid.place_mine((x, y));
                }
            }
            return grid;
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut placed: HashSet<Coord2> = HashSet::with_capacity(config.mines.into());
        let mut collisions = 0usize;
        while placed.len() < usize::from(config.mines) {
            let coords = (
                rng.random_range(0..config.width),
                rng.random_range(0..config.height),
            );
            if placed.insert(coords) {
                grid.place_mine(coords);
            } else {
                collisions += 1;
            }
        }
        log::trace!(
            "Placed {} mines on {}x{} with {} collisions",
            config.mines,
            config.width,
            config.height,
            collisions
        );

        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(width: Coord, height: Coord, mines: CellCount) -> GameConfig {
        GameConfig::new(width, height, mines).unwrap()
    }

    #[test]
    fn places_exactly_the_requested_mines() {
        let grid = RandomGridGenerator::new(7).generate(config(10, 10, 10));

        assert_eq!(grid.size(), (10, 10));
        assert_eq!(grid.mine_count(), 10);
        assert_eq!(grid.revealed_count(), 0);
    }

    #[test]
    fn same_seed_gives_same_layout() {
        let a = RandomGridGenerator::new(42).generate(config(16, 16, 40));
        let b = RandomGridGenerator::new(42).generate(config(16, 16, 40));

        assert_eq!(a, b);
    }

    #[test]
    fn full_board_is_all_mines() {
        let grid = RandomGridGenerator::new(1).generate(config(3, 2, 6));

        assert!(grid.iter().all(|(_, cell)| cell.is_mined));
    }

    #[test]
    fn dense_board_still_places_every_mine() {
        let grid = RandomGridGenerator::new(3).generate(config(40, 40, 1599));

        assert_eq!(grid.mine_count(), 1599);
    }

    #[test]
    fn non_square_layouts_use_both_axes() {
        let grid = RandomGridGenerator::new(11).generate(config(40, 2, 60));

        assert_eq!(grid.size(), (40, 2));
        assert_eq!(grid.mine_count(), 60);
    }

    #[test]
    fn generate_grid_validates_first() {
        assert_eq!(
            generate_grid(1, 5, 1),
            Err(GameError::TooSmall {
                width: 1,
                height: 5
            })
        );
        assert_eq!(generate_grid(5, 5, 3).map(|grid| grid.mine_count()), Ok(3));
    }
}
