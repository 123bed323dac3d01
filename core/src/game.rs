use std::collections::VecDeque;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::*;

/// Where a game stands. `Won` and `Lost` are final.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl Outcome {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Game state as derived from its events.
///
/// The default value is the empty aggregate that a `GameStarted` event is
/// applied to; nothing else ever changes a `GameState`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    id: Option<AggregateId>,
    version: Version,
    grid: Grid,
    cell_count: CellCount,
    revealed_or_flagged_count: CellCount,
    outcome: Outcome,
}

impl GameState {
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn cell_count(&self) -> CellCount {
        self.cell_count
    }

    pub fn revealed_or_flagged_count(&self) -> CellCount {
        self.revealed_or_flagged_count
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_ended(&self) -> bool {
        self.outcome.is_finished()
    }

    fn on_game_started(&mut self, grid: &Grid) {
        self.grid = grid.clone();
        self.cell_count = grid.cell_count();
        self.revealed_or_flagged_count = grid.revealed_or_flagged_count();
        self.outcome = Outcome::InProgress;
    }

    fn on_cell_revealed(&mut self, coords: Coord2) {
        self.grid.cell_mut(coords).is_revealed = true;
        self.revealed_or_flagged_count += 1;
    }

    fn on_game_won(&mut self) {
        self.outcome = Outcome::Won;
    }

    fn on_game_lost(&mut self) {
        self.outcome = Outcome::Lost;

        // everything is shown once the game is lost
        for cell in self.grid.cells_mut() {
            if !cell.is_revealed_or_flagged() {
                self.revealed_or_flagged_count += 1;
            }
            cell.is_revealed = true;
        }
    }
}

impl Aggregate for GameState {
    type Event = GameEvent;

    fn aggregate_id(&self) -> Option<&AggregateId> {
        self.id.as_ref()
    }

    fn version(&self) -> Version {
        self.version
    }

    fn apply(&mut self, event: &GameEnvelope) {
        use GameEvent::*;

        match &event.payload {
            GameStarted { grid } => {
                self.id = Some(event.aggregate_id.clone());
                self.on_game_started(grid);
            }
            CellRevealed { coords, .. } => self.on_cell_revealed(*coords),
            GameWon => self.on_game_won(),
            GameLost => self.on_game_lost(),
        }
        self.version = event.version;
    }
}

/// A game from start to finish: the derived state plus the append-only log
/// it was derived from.
#[derive(Clone, Debug)]
pub struct Game<E = SystemEnvironment> {
    id: AggregateId,
    state: GameState,
    events: Vec<GameEnvelope>,
    env: E,
}

impl Game {
    /// Starts a game on a randomly mined grid.
    pub fn new(width: Coord, height: Coord, mines: CellCount) -> Result<Self> {
        let config = GameConfig::new(width, height, mines)?;
        Self::from_config(config, RandomGridGenerator::from_entropy(), SystemEnvironment)
    }
}

impl<E: Environment> Game<E> {
    pub fn from_config(config: GameConfig, generator: impl GridGenerator, env: E) -> Result<Self> {
        let config = config.validate()?;
        Self::start(generator.generate(config), env)
    }

    /// Starts a game on a prepared grid, which must satisfy the same limits as
    /// a generated one.
    pub fn start(grid: Grid, env: E) -> Result<Self> {
        grid.config()?;
        let id = env.new_id()?;

        let started = Envelope {
            aggregate_id: id.clone(),
            version: 1,
            at: env.now(),
            payload: GameEvent::GameStarted { grid },
        };
        let mut state = GameState::default();
        state.apply(&started);
        log::debug!(
            "Game {} started on {:?} with {} mines",
            id,
            state.grid.size(),
            state.grid.mine_count()
        );

        Ok(Self {
            id,
            state,
            events: vec![started],
            env,
        })
    }

    /// Rebuilds a game from a previously recorded log.
    pub fn replay(events: Vec<GameEnvelope>, env: E) -> Result<Self> {
        if let Err(err) = check_history(&events) {
            log::warn!("Rejected game history: {}", err);
            return Err(err);
        }
        let state: GameState = crate::eventsource::replay(&events).inspect_err(|err| {
            log::warn!("Rejected game history: {}", err);
        })?;
        let id = state.id.clone().ok_or(GameError::MissingStart)?;

        Ok(Self {
            id,
            state,
            events,
            env,
        })
    }

    pub fn id(&self) -> &AggregateId {
        &self.id
    }

    pub fn version(&self) -> Version {
        self.state.version
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn grid(&self) -> &Grid {
        &self.state.grid
    }

    pub fn cell_count(&self) -> CellCount {
        self.state.cell_count
    }

    pub fn revealed_or_flagged_count(&self) -> CellCount {
        self.state.revealed_or_flagged_count
    }

    pub fn outcome(&self) -> Outcome {
        self.state.outcome
    }

    pub fn is_ended(&self) -> bool {
        self.state.is_ended()
    }

    /// Whether the game reached a final state, won or lost.
    pub fn is_complete(&self) -> bool {
        self.state.outcome.is_finished()
    }

    pub fn events(&self) -> &[GameEnvelope] {
        &self.events
    }

    pub fn into_events(self) -> Vec<GameEnvelope> {
        self.events
    }

    /// Looks up a cell by its name, e.g. `B6`.
    pub fn cell_at(&self, name: &str) -> Result<Cell> {
        let (_, coords) = self.resolve(name.into())?;
        Ok(self.state.grid[coords])
    }

    /// Turns a cell face up. Stepping on a mine loses the game, an empty cell
    /// opens its whole region.
    ///
    /// A rejected move leaves the game untouched.
    pub fn reveal_cell(&mut self, name: impl Into<CellName>) -> Result<RevealOutcome> {
        let (cell_name, coords) = self.resolve(name.into())?;

        if self.state.grid[coords].is_revealed {
            return Err(GameError::AlreadyRevealed(cell_name.to_string()));
        }
        if self.state.is_ended() {
            return Err(GameError::AlreadyEnded);
        }

        log::debug!("Reveal {} at {:?} in game {}", cell_name, coords, self.id);
        self.record(GameEvent::CellRevealed {
            cell_name: cell_name.clone(),
            coords,
        });

        if self.lose_game_if_mined(coords) {
            return Ok(RevealOutcome::HitMine);
        }
        self.reveal_neighbors_if_no_adjacent_mines(coords, &cell_name);
        if self.win_game_if_last_cell() {
            return Ok(RevealOutcome::Won);
        }

        Ok(RevealOutcome::Revealed)
    }

    /// Reserved, flagging has no effect yet.
    pub fn flag_cell(&mut self) {}

    /// Reserved, moves cannot be taken back yet.
    pub fn undo_move(&mut self) {}

    fn resolve(&self, cell_name: CellName) -> Result<(CellName, Coord2)> {
        let raw = cell_name.to_coordinate()?;
        match self.state.grid.checked_coords(raw) {
            Some(coords) => Ok((cell_name, coords)),
            None => Err(GameError::OutOfBounds {
                name: cell_name.to_string(),
                coords: raw,
            }),
        }
    }

    /// Stamps, applies and appends the next event.
    fn record(&mut self, payload: GameEvent) {
        let event = Envelope {
            aggregate_id: self.id.clone(),
            version: self.state.version + 1,
            at: self.env.now(),
            payload,
        };
        self.state.apply(&event);
        self.events.push(event);
    }

    fn lose_game_if_mined(&mut self, coords: Coord2) -> bool {
        let target = self.state.grid[coords];
        if !target.is_mined || !target.is_revealed {
            return false;
        }

        self.record(GameEvent::GameLost);
        log::info!("Game {} lost on {:?}", self.id, coords);
        true
    }

    /// Breadth-first flood fill from an empty cell. Each cell is checked when
    /// it leaves the queue, so reaching it twice is harmless.
    fn reveal_neighbors_if_no_adjacent_mines(&mut self, coords: Coord2, cell_name: &CellName) {
        if self.state.grid[coords].adjacent_mines > 0 {
            return;
        }

        let mut to_visit: VecDeque<Coord2> = self.unrevealed_neighbors(coords).collect();
        log::trace!(
            "Starting flood-fill from {:?}, initial neighbors: {:?}",
            coords,
            to_visit
        );

        while let Some(visit_coords) = to_visit.pop_front() {
            let cell = self.state.grid[visit_coords];
            if cell.is_revealed || cell.is_mined {
                continue;
            }

            self.record(GameEvent::CellRevealed {
                cell_name: cell_name.clone(),
                coords: visit_coords,
            });
            log::trace!(
                "Flood revealed {} at {:?}, adjacent mines: {}",
                coordinate_to_cell_name(visit_coords),
                visit_coords,
                cell.adjacent_mines
            );

            if cell.adjacent_mines == 0 {
                to_visit.extend(self.unrevealed_neighbors(visit_coords));
            }
        }
    }

    fn unrevealed_neighbors(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + '_ {
        self.state
            .grid
            .iter_neighbors(coords)
            .filter(|&pos| !self.state.grid[pos].is_revealed)
    }

    fn win_game_if_last_cell(&mut self) -> bool {
        if self.state.revealed_or_flagged_count != self.state.cell_count {
            return false;
        }

        self.record(GameEvent::GameWon);
        log::info!("Game {} won", self.id);
        true
    }
}

/// Checks what the generic replay cannot: the log has to open with a start,
/// reveal each cell of the grid at most once and stop at the final event.
fn check_history(events: &[GameEnvelope]) -> Result<()> {
    use GameEvent::*;

    let Some(first) = events.first() else {
        return Err(GameError::EmptyHistory);
    };
    let GameStarted { grid } = &first.payload else {
        return Err(GameError::MissingStart);
    };
    grid.config()?;

    let mut revealed: HashSet<Coord2> = grid
        .iter()
        .filter(|(_, cell)| cell.is_revealed)
        .map(|(coords, _)| coords)
        .collect();
    let mut ended = false;
    for event in &events[1..] {
        let fits = match &event.payload {
            _ if ended => false,
            GameStarted { .. } => false,
            CellRevealed { coords, .. } => {
                grid.cell_at(*coords).is_some() && revealed.insert(*coords)
            }
            GameWon | GameLost => true,
        };
        if !fits {
            return Err(GameError::UnexpectedEvent(event.version));
        }
        ended = event.payload.is_terminal();
    }

    Ok(())
}
