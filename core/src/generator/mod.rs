use crate::*;
pub use random::*;

mod random;

pub trait GridGenerator {
    fn generate(self, config: GameConfig) -> Grid;
}

/// Validates the dimensions and lays out a randomly mined grid.
pub fn generate_grid(width: Coord, height: Coord, mines: CellCount) -> Result<Grid> {
    let config = GameConfig::new(width, height, mines)?;
    Ok(RandomGridGenerator::from_entropy().generate(config))
}
