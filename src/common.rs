//! Common types for the board model: cell states, attack results and errors.

use core::fmt;

/// Grid position as `(row, col)`.
pub type Coord = (usize, usize);

/// State of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    /// Untouched, no ship.
    Water,
    /// Untouched, occupied by a ship.
    ShipPresent,
    /// Attacked, was a ship.
    Hit,
    /// Attacked, was water.
    Miss,
}

impl CellState {
    /// Returns `true` once the cell has been attacked.
    pub fn is_resolved(self) -> bool {
        matches!(self, CellState::Hit | CellState::Miss)
    }

    /// Symbol used when rendering a board.
    pub fn symbol(self) -> char {
        match self {
            CellState::Water => '~',
            CellState::ShipPresent => 'S',
            CellState::Hit => 'X',
            CellState::Miss => 'O',
        }
    }
}

/// Result of a single attack on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackResult {
    /// Attack struck a ship segment.
    Hit,
    /// Attack landed in open water.
    Miss,
    /// The cell was already resolved; nothing changed.
    AlreadyAttacked,
}

/// Reason a ship placement was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    /// Some requested cell lies outside the grid.
    OutOfBounds,
    /// Some requested cell is already occupied by another ship.
    Overlaps,
    /// Ship length is outside the allowed range.
    InvalidLength,
    /// Attacking has begun; the fleet can no longer change.
    BoardFrozen,
    /// The requested length is not pending in the side's fleet.
    UnexpectedLength,
    /// The side has already placed its whole fleet.
    FleetComplete,
    /// Random placement ran out of attempts.
    UnableToPlace,
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::OutOfBounds => write!(f, "ship would extend past the grid"),
            PlacementError::Overlaps => write!(f, "ship would overlap another ship"),
            PlacementError::InvalidLength => {
                write!(f, "ship length is outside the allowed range")
            }
            PlacementError::BoardFrozen => write!(f, "board is frozen once attacking begins"),
            PlacementError::UnexpectedLength => {
                write!(f, "ship length is not pending in this fleet")
            }
            PlacementError::FleetComplete => write!(f, "fleet is already complete"),
            PlacementError::UnableToPlace => write!(f, "unable to find a free position"),
        }
    }
}

/// Reason a game configuration was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Grid side length is zero.
    EmptyGrid,
    /// Fleet has no ships.
    EmptyFleet,
    /// Fleet has more ships than allowed.
    TooManyShips { count: usize, max: usize },
    /// A ship length is outside the allowed range.
    InvalidShipLength { length: usize },
    /// A ship is longer than the grid side.
    ShipExceedsGrid { length: usize, grid_size: usize },
    /// The fleet needs more cells than the grid has.
    FleetExceedsGrid { cells: usize, capacity: usize },
    /// No arrangement of the fleet was found on the grid.
    FleetUnplaceable,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyGrid => write!(f, "grid size must be nonzero"),
            ConfigError::EmptyFleet => write!(f, "fleet must contain at least one ship"),
            ConfigError::TooManyShips { count, max } => {
                write!(f, "fleet has {} ships, at most {} allowed", count, max)
            }
            ConfigError::InvalidShipLength { length } => {
                write!(f, "ship length {} is outside the allowed range", length)
            }
            ConfigError::ShipExceedsGrid { length, grid_size } => write!(
                f,
                "ship length {} does not fit a {}x{} grid",
                length, grid_size, grid_size
            ),
            ConfigError::FleetExceedsGrid { cells, capacity } => write!(
                f,
                "fleet needs {} cells but the grid has {}",
                cells, capacity
            ),
            ConfigError::FleetUnplaceable => {
                write!(f, "unable to arrange the fleet on the grid")
            }
        }
    }
}

/// Errors returned by board and game operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// Ship placement refused.
    InvalidPlacement(PlacementError),
    /// Coordinate outside the grid.
    OutOfBounds { row: usize, col: usize },
    /// Action requested by the wrong side or in the wrong phase.
    OutOfTurn,
    /// Configuration cannot produce a playable session.
    Configuration(ConfigError),
}

impl From<PlacementError> for GameError {
    fn from(err: PlacementError) -> Self {
        GameError::InvalidPlacement(err)
    }
}

impl From<ConfigError> for GameError {
    fn from(err: ConfigError) -> Self {
        GameError::Configuration(err)
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidPlacement(e) => write!(f, "Invalid placement: {}", e),
            GameError::OutOfBounds { row, col } => {
                write!(f, "Coordinate ({}, {}) is out of bounds", row, col)
            }
            GameError::OutOfTurn => write!(f, "Action requested out of turn"),
            GameError::Configuration(e) => write!(f, "Configuration error: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GameError {}
