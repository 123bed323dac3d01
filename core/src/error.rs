use thiserror::Error;

use crate::{AggregateId, CellCount, Coord, RawCoord, Version};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid dimensions {width}x{height}, must be at least 2x2")]
    TooSmall { width: Coord, height: Coord },
    #[error("Invalid dimensions {width}x{height}, must be at most 40x40")]
    TooLarge { width: Coord, height: Coord },
    #[error("Grid of {width}x{height} cells does not fit any game")]
    OversizedGrid { width: usize, height: usize },
    #[error("Too few mines ({0}), place at least 1")]
    TooFewMines(CellCount),
    #[error("Too many mines ({mines}), the grid only has {cells} cells")]
    TooManyMines { mines: CellCount, cells: CellCount },
    #[error("Malformed game configuration: {0}")]
    MalformedConfig(String),
    #[error("Invalid cell name '{0}', must be letters followed by a number, e.g. B6")]
    InvalidCellName(String),
    #[error("Cell {name} ({},{}) is outside the grid", .coords.0, .coords.1)]
    OutOfBounds { name: String, coords: RawCoord },
    #[error("Cell {0} already revealed")]
    AlreadyRevealed(String),
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("Unable to generate a game identifier: {0}")]
    IdUnavailable(String),
    #[error("Event history is empty")]
    EmptyHistory,
    #[error("Event history must begin with a game start")]
    MissingStart,
    #[error("Event {0} does not fit the game history")]
    UnexpectedEvent(Version),
    #[error("Event version {found} out of sequence, expected {expected}")]
    OutOfSequence { expected: Version, found: Version },
    #[error("Event for aggregate {found} does not belong to {expected}")]
    ForeignEvent {
        expected: AggregateId,
        found: AggregateId,
    },
}

pub type Result<T> = core::result::Result<T, GameError>;
