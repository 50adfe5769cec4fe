//! Turn controller: ship placement quotas, attack turns and the targeting
//! engine's replies for one session.

use alloc::vec::Vec;

use log::{debug, info};
use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::{
    ai::{Difficulty, TargetingEngine},
    board::Board,
    common::{AttackResult, CellState, ConfigError, Coord, GameError, PlacementError},
    config::{GameConfig, GameMode},
};

/// One of the two sides of a game. In single-attacker mode `One` is the manual
/// side and `Two` is driven by the targeting engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    One,
    Two,
}

impl Side {
    /// Get the opponent of this side.
    pub fn opponent(self) -> Self {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }

    fn index(self) -> usize {
        match self {
            Side::One => 0,
            Side::Two => 1,
        }
    }
}

/// Current phase of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// The given side is placing its fleet.
    PlacingShips(Side),
    /// The given side is to attack.
    Attacking(Side),
    /// The given side won.
    GameOver(Side),
}

/// Result of a placement request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementOutcome {
    Placed,
    Rejected(GameError),
}

/// Result of an attack request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackOutcome {
    /// Hit a ship without sinking it.
    Hit,
    /// Hit the last intact cell of a ship; the opponent still has ships.
    Sunk,
    Miss,
    /// Cell was already resolved; nothing changed and the turn is kept.
    AlreadyAttacked,
    /// The game ended; carries the winner.
    GameOver(Side),
}

/// A resolved attack: where it landed, what it struck and whether it sank a
/// ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shot {
    pub coord: Coord,
    pub result: AttackResult,
    pub sunk: bool,
}

/// Orchestrates placement, turns and the engine's replies for one session.
pub struct GameController<R: Rng = SmallRng> {
    config: GameConfig,
    boards: [Board; 2],
    /// Ship lengths each side still has to place.
    pending: [Vec<usize>; 2],
    engine: TargetingEngine,
    rng: R,
    phase: Phase,
    last_attack: Option<Shot>,
    last_engine_move: Option<Shot>,
}

impl GameController<SmallRng> {
    /// Controller with a reproducible random source.
    pub fn seeded(config: GameConfig, seed: u64) -> Result<Self, GameError> {
        Self::new(config, SmallRng::seed_from_u64(seed))
    }

    /// Controller seeded once from the thread RNG.
    #[cfg(feature = "std")]
    pub fn from_entropy(config: GameConfig) -> Result<Self, GameError> {
        let mut seed_rng = rand::rng();
        Self::new(config, SmallRng::from_rng(&mut seed_rng))
    }
}

impl<R: Rng> GameController<R> {
    /// Validate `config` and start a fresh session in the placement phase.
    pub fn new(config: GameConfig, rng: R) -> Result<Self, GameError> {
        config.validate()?;
        let mut controller = Self {
            boards: [Board::new(config.grid_size), Board::new(config.grid_size)],
            pending: [config.fleet.clone(), config.fleet.clone()],
            engine: TargetingEngine::new(config.difficulty),
            config,
            rng,
            phase: Phase::PlacingShips(Side::One),
            last_attack: None,
            last_engine_move: None,
        };
        controller.reset()?;
        Ok(controller)
    }

    /// Recreate both boards and the engine and return to ship placement. In
    /// single-attacker mode the engine's fleet is placed at random. On error
    /// the current session is left untouched.
    pub fn reset(&mut self) -> Result<(), GameError> {
        let size = self.config.grid_size;
        let mut boards = [Board::new(size), Board::new(size)];
        let mut pending = [self.config.fleet.clone(), self.config.fleet.clone()];
        if self.config.mode == GameMode::SingleAttacker {
            boards[Side::Two.index()]
                .place_fleet_randomly(&mut self.rng, &self.config.fleet)
                .map_err(|e| match e {
                    GameError::InvalidPlacement(PlacementError::UnableToPlace) => {
                        GameError::Configuration(ConfigError::FleetUnplaceable)
                    }
                    e => e,
                })?;
            pending[Side::Two.index()].clear();
        }
        self.boards = boards;
        self.pending = pending;
        self.engine = TargetingEngine::new(self.config.difficulty);
        self.last_attack = None;
        self.last_engine_move = None;
        self.phase = Phase::PlacingShips(Side::One);
        info!(
            "new {:?} game on {}x{} grid, fleet {:?}, difficulty {:?}",
            self.config.mode, size, size, self.config.fleet, self.config.difficulty
        );
        Ok(())
    }

    /// Change the engine policy. Always starts a new game; if that fails the
    /// previous policy and session are kept.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Result<(), GameError> {
        let previous = self.config.difficulty;
        self.config.difficulty = difficulty;
        if let Err(e) = self.reset() {
            self.config.difficulty = previous;
            return Err(e);
        }
        Ok(())
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Side whose turn it is, or `None` once the game is over.
    pub fn current_turn(&self) -> Option<Side> {
        match self.phase {
            Phase::PlacingShips(side) | Phase::Attacking(side) => Some(side),
            Phase::GameOver(_) => None,
        }
    }

    pub fn winner(&self) -> Option<Side> {
        match self.phase {
            Phase::GameOver(side) => Some(side),
            _ => None,
        }
    }

    pub fn board(&self, side: Side) -> &Board {
        &self.boards[side.index()]
    }

    pub fn engine(&self) -> &TargetingEngine {
        &self.engine
    }

    /// State of a cell on `side`'s board, for rendering.
    pub fn cell_state(&self, side: Side, row: usize, col: usize) -> Option<CellState> {
        self.board(side).cell_state(row, col)
    }

    /// Ship lengths `side` still has to place.
    pub fn pending_lengths(&self, side: Side) -> &[usize] {
        &self.pending[side.index()]
    }

    /// The most recent manual attack that resolved a cell, by either side.
    pub fn last_attack(&self) -> Option<Shot> {
        self.last_attack
    }

    /// The engine's reply to the most recent manual attack, if any.
    pub fn last_engine_move(&self) -> Option<Shot> {
        self.last_engine_move
    }

    /// Place one ship of `side`'s fleet.
    pub fn request_placement(
        &mut self,
        side: Side,
        row: usize,
        col: usize,
        vertical: bool,
        length: usize,
    ) -> PlacementOutcome {
        if self.phase != Phase::PlacingShips(side) {
            return PlacementOutcome::Rejected(GameError::OutOfTurn);
        }
        let pending = &self.pending[side.index()];
        let slot = match pending.iter().position(|&l| l == length) {
            Some(slot) => slot,
            None if pending.is_empty() => {
                return PlacementOutcome::Rejected(PlacementError::FleetComplete.into())
            }
            None => return PlacementOutcome::Rejected(PlacementError::UnexpectedLength.into()),
        };
        if let Err(e) = self.boards[side.index()].place_ship(row, col, vertical, length) {
            debug!("{:?} placement at ({}, {}) rejected: {}", side, row, col, e);
            return PlacementOutcome::Rejected(e);
        }
        self.pending[side.index()].remove(slot);
        if self.pending[side.index()].is_empty() {
            self.finish_placement(side);
        }
        PlacementOutcome::Placed
    }

    fn finish_placement(&mut self, side: Side) {
        let next = match (self.config.mode, side) {
            (GameMode::TwoAttackers, Side::One) => Phase::PlacingShips(Side::Two),
            _ => {
                for board in self.boards.iter_mut() {
                    board.freeze();
                }
                Phase::Attacking(Side::One)
            }
        };
        info!("{:?} fleet placed, entering {:?}", side, next);
        self.phase = next;
    }

    /// Attack the opponent of `side` at (row, col). In single-attacker mode the
    /// engine's counter-move is applied before returning.
    pub fn request_attack(
        &mut self,
        side: Side,
        row: usize,
        col: usize,
    ) -> Result<AttackOutcome, GameError> {
        if self.phase != Phase::Attacking(side) {
            return Err(GameError::OutOfTurn);
        }
        let target = &mut self.boards[side.opponent().index()];
        let result = target.attack(row, col)?;
        if result == AttackResult::AlreadyAttacked {
            return Ok(AttackOutcome::AlreadyAttacked);
        }
        let sunk = target.is_sunk_at(row, col);
        let fleet_destroyed = !target.has_ships_remaining();
        self.last_attack = Some(Shot {
            coord: (row, col),
            result,
            sunk,
        });
        if fleet_destroyed {
            return Ok(self.end_game(side));
        }
        let outcome = match (result, sunk) {
            (AttackResult::Hit, true) => AttackOutcome::Sunk,
            (AttackResult::Hit, false) => AttackOutcome::Hit,
            _ => AttackOutcome::Miss,
        };

        match self.config.mode {
            GameMode::TwoAttackers => {
                self.phase = Phase::Attacking(side.opponent());
                Ok(outcome)
            }
            GameMode::SingleAttacker => Ok(self.engine_reply()?.unwrap_or(outcome)),
        }
    }

    /// Let the engine attack side one's board. Returns the final outcome when
    /// the reply ends the game.
    fn engine_reply(&mut self) -> Result<Option<AttackOutcome>, GameError> {
        let board = &mut self.boards[Side::One.index()];
        // Side one still has an intact ship cell, so an open cell exists.
        let Some(coord) = self.engine.next_target(&*board, &mut self.rng) else {
            return Ok(None);
        };
        let result = board.attack(coord.0, coord.1)?;
        debug_assert_ne!(result, AttackResult::AlreadyAttacked);
        let sunk = board.is_sunk_at(coord.0, coord.1);
        self.engine.record(&*board, coord, result, sunk);
        self.last_engine_move = Some(Shot {
            coord,
            result,
            sunk,
        });
        if board.has_ships_remaining() {
            Ok(None)
        } else {
            Ok(Some(self.end_game(Side::Two)))
        }
    }

    fn end_game(&mut self, winner: Side) -> AttackOutcome {
        info!("{:?} wins", winner);
        self.phase = Phase::GameOver(winner);
        AttackOutcome::GameOver(winner)
    }
}
