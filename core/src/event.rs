use serde::{Deserialize, Serialize};

use crate::*;

/// Everything that can happen to a game.
///
/// Flagging has no event until it has defined semantics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// First event of every game, carrying the complete initial layout.
    GameStarted { grid: Grid },
    /// One cell turned face up. `cell_name` is the player's input that caused
    /// it, which differs from `coords` for cells opened by a cascade.
    CellRevealed { cell_name: CellName, coords: Coord2 },
    GameWon,
    GameLost,
}

/// A [`GameEvent`] with its envelope.
pub type GameEnvelope = Envelope<GameEvent>;

impl GameEvent {
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::GameWon | Self::GameLost)
    }
}
