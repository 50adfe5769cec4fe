//! Session configuration: grid size, fleet, difficulty and game mode.

use alloc::vec::Vec;

use crate::ai::Difficulty;
use crate::common::ConfigError;

pub const DEFAULT_GRID_SIZE: usize = 7;
pub const MIN_SHIP_LENGTH: usize = 3;
pub const MAX_SHIP_LENGTH: usize = 5;
pub const MAX_SHIPS: usize = 5;
pub const DEFAULT_FLEET: [usize; 3] = [3, 4, 5];

/// Whether one or both sides attack manually.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GameMode {
    /// One manual side against the targeting engine.
    SingleAttacker,
    /// Two manual sides taking alternate turns.
    TwoAttackers,
}

/// Session configuration, fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub grid_size: usize,
    /// Ship lengths making up each side's fleet.
    pub fleet: Vec<usize>,
    pub difficulty: Difficulty,
    pub mode: GameMode,
}

impl GameConfig {
    /// Check that the grid can hold the fleet.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        if self.fleet.is_empty() {
            return Err(ConfigError::EmptyFleet);
        }
        if self.fleet.len() > MAX_SHIPS {
            return Err(ConfigError::TooManyShips {
                count: self.fleet.len(),
                max: MAX_SHIPS,
            });
        }
        for &length in &self.fleet {
            if !(MIN_SHIP_LENGTH..=MAX_SHIP_LENGTH).contains(&length) {
                return Err(ConfigError::InvalidShipLength { length });
            }
            if length > self.grid_size {
                return Err(ConfigError::ShipExceedsGrid {
                    length,
                    grid_size: self.grid_size,
                });
            }
        }
        let cells: usize = self.fleet.iter().sum();
        let capacity = self.grid_size * self.grid_size;
        if cells > capacity {
            return Err(ConfigError::FleetExceedsGrid { cells, capacity });
        }
        Ok(())
    }

    /// Total number of ship cells in one fleet.
    pub fn fleet_cells(&self) -> usize {
        self.fleet.iter().sum()
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            fleet: DEFAULT_FLEET.to_vec(),
            difficulty: Difficulty::Easy,
            mode: GameMode::SingleAttacker,
        }
    }
}
