use serde::{Deserialize, Serialize};

pub use catalog::*;
pub use cell::*;
pub use cell_name::*;
pub use error::*;
pub use event::*;
pub use eventsource::*;
pub use game::*;
pub use generator::*;
pub use grid::*;
pub use types::*;

mod catalog;
mod cell;
mod cell_name;
mod error;
mod event;
mod eventsource;
mod game;
mod generator;
mod grid;
mod types;

/// Smallest accepted grid side.
pub const MIN_SIDE: Coord = 2;

/// Largest accepted grid side.
pub const MAX_SIDE: Coord = 40;

/// Validated dimensions and mine count of a new game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub width: Coord,
    pub height: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(width: Coord, height: Coord, mines: CellCount) -> Self {
        Self {
            width,
            height,
            mines,
        }
    }

    /// Checks, in order: sides too small, sides too large, too few mines, more
    /// mines than cells.
    pub fn new(width: Coord, height: Coord, mines: CellCount) -> Result<Self> {
        Self::new_unchecked(width, height, mines).validate()
    }

    pub const fn beginner() -> Self {
        Self::new_unchecked(9, 9, 10)
    }

    pub const fn intermediate() -> Self {
        Self::new_unchecked(16, 16, 40)
    }

    pub const fn expert() -> Self {
        Self::new_unchecked(30, 16, 99)
    }

    /// Reads a configuration such as `{"width": 9, "height": 9, "mines": 10}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|err| GameError::MalformedConfig(err.to_string()))?;
        config.validate()
    }

    pub fn validate(self) -> Result<Self> {
        let Self {
            width,
            height,
            mines,
        } = self;

        if width < MIN_SIDE || height < MIN_SIDE {
            return Err(GameError::TooSmall { width, height });
        }
        if width > MAX_SIDE || height > MAX_SIDE {
            return Err(GameError::TooLarge { width, height });
        }
        if mines < 1 {
            return Err(GameError::TooFewMines(mines));
        }
        let cells = self.total_cells();
        if mines > cells {
            return Err(GameError::TooManyMines { mines, cells });
        }

        Ok(self)
    }

    pub const fn size(&self) -> Coord2 {
        (self.width, self.height)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.width, self.height)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::beginner()
    }
}

/// What a single reveal led to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn ends_game(self) -> bool {
        match self {
            Self::Revealed => false,
            Self::HitMine => true,
            Self::Won => true,
        }
    }
}
