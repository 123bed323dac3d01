//! Lookup of previously saved games. Only metadata lives here, how games are
//! stored is up to the implementor.

use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameInfo {
    pub id: AggregateId,
    pub name: String,
}

pub trait GameCatalog {
    fn list_saved_games(&self) -> Vec<GameInfo>;
}

/// Catalog kept in memory for the lifetime of the process.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InMemoryCatalog {
    entries: Vec<GameInfo>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a game, renaming it if the id is already known.
    pub fn record(&mut self, id: AggregateId, name: impl Into<String>) {
        let name = name.into();
        match self.entries.iter_mut().find(|entry| entry.id == id) {
            Some(entry) => entry.name = name,
            None => self.entries.push(GameInfo { id, name }),
        }
    }
}

impl GameCatalog for InMemoryCatalog {
    fn list_saved_games(&self) -> Vec<GameInfo> {
        self.entries.clone()
    }
}
