use serde::{Deserialize, Serialize};

/// State of a single grid position.
///
/// `adjacent_mines` is computed once when the grid is laid out and is only
/// meaningful on cells that are not mined.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub is_mined: bool,
    pub is_revealed: bool,
    pub is_flagged: bool,
    pub adjacent_mines: u8,
}

impl Cell {
    pub const fn is_revealed_or_flagged(self) -> bool {
        self.is_revealed || self.is_flagged
    }
}
