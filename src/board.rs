//! Game board state: a square grid of cell states plus the fleet placed on it.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use log::{debug, trace};
use rand::Rng;

use crate::common::{AttackResult, CellState, Coord, GameError, PlacementError};
use crate::config::{MAX_SHIP_LENGTH, MIN_SHIP_LENGTH};
use crate::ship::{Orientation, Ship};

/// Attempts made by [`Board::random_placement`] before giving up.
const RANDOM_PLACEMENT_ATTEMPTS: usize = 1000;

/// Times [`Board::place_fleet_randomly`] restarts the whole fleet from an empty
/// board after a ship finds no free position.
const FLEET_PLACEMENT_RETRIES: usize = 100;

/// What an attacker is allowed to know about a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellView {
    /// Not yet attacked.
    Unknown,
    Hit,
    Miss,
}

/// Read-only, fog-of-war view of an opponent board.
pub trait TargetView {
    /// Side length of the square grid.
    fn size(&self) -> usize;

    /// Revealed state of (row, col), or `None` when out of bounds.
    fn view(&self, row: usize, col: usize) -> Option<CellView>;

    /// Returns `true` if (row, col) lies on the grid and has not been attacked.
    fn is_open(&self, row: usize, col: usize) -> bool {
        self.view(row, col) == Some(CellView::Unknown)
    }
}

/// One side's board.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<CellState>,
    ships: Vec<Ship>,
    frozen: bool,
}

impl Board {
    /// Create an empty `size`×`size` board (all water, no ships).
    pub fn new(size: usize) -> Self {
        Board {
            size,
            cells: vec![CellState::Water; size * size],
            ships: Vec::new(),
            frozen: false,
        }
    }

    /// Side length of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Ships placed so far, in placement order.
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    /// Returns `true` once attacking has begun.
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Stop accepting placements.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.size && col < self.size {
            Some(row * self.size + col)
        } else {
            None
        }
    }

    /// State of the cell at (row, col), or `None` when out of bounds.
    pub fn cell_state(&self, row: usize, col: usize) -> Option<CellState> {
        self.index(row, col).map(|i| self.cells[i])
    }

    fn check_placement(
        &self,
        row: usize,
        col: usize,
        orientation: Orientation,
        length: usize,
    ) -> Result<(), PlacementError> {
        if self.frozen {
            return Err(PlacementError::BoardFrozen);
        }
        if !(MIN_SHIP_LENGTH..=MAX_SHIP_LENGTH).contains(&length) {
            return Err(PlacementError::InvalidLength);
        }
        for i in 0..length {
            let (r, c) = orientation.step(row, col, i);
            match self.cell_state(r, c) {
                None => return Err(PlacementError::OutOfBounds),
                Some(CellState::Water) => {}
                Some(_) => return Err(PlacementError::Overlaps),
            }
        }
        Ok(())
    }

    /// Returns `true` if a ship of `length` fits at (row, col) without leaving
    /// the grid or touching a non-water cell, and `length` is an allowed ship
    /// length.
    pub fn is_valid_placement(&self, row: usize, col: usize, vertical: bool, length: usize) -> bool {
        self.check_placement(row, col, Orientation::from_vertical(vertical), length)
            .is_ok()
    }

    /// Place a ship of `length` at (row, col). Returns the ship's index in
    /// [`Board::ships`].
    pub fn place_ship(
        &mut self,
        row: usize,
        col: usize,
        vertical: bool,
        length: usize,
    ) -> Result<usize, GameError> {
        let orientation = Orientation::from_vertical(vertical);
        self.check_placement(row, col, orientation, length)?;
        let ship = Ship::new(row, col, orientation, length);
        for &(r, c) in ship.cells() {
            let i = r * self.size + c;
            self.cells[i] = CellState::ShipPresent;
        }
        trace!("placed {:?} ship of length {} at ({}, {})", orientation, length, row, col);
        self.ships.push(ship);
        Ok(self.ships.len() - 1)
    }

    /// Returns a random valid `(row, col, vertical)` for a ship of `length`.
    pub fn random_placement<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        length: usize,
    ) -> Result<(usize, usize, bool), GameError> {
        if self.frozen {
            return Err(PlacementError::BoardFrozen.into());
        }
        if !(MIN_SHIP_LENGTH..=MAX_SHIP_LENGTH).contains(&length) {
            return Err(PlacementError::InvalidLength.into());
        }
        if length > self.size {
            return Err(PlacementError::OutOfBounds.into());
        }
        for _ in 0..RANDOM_PLACEMENT_ATTEMPTS {
            let vertical: bool = rng.random();
            let (max_r, max_c) = if vertical {
                (self.size - length, self.size - 1)
            } else {
                (self.size - 1, self.size - length)
            };
            let r = rng.random_range(0..=max_r);
            let c = rng.random_range(0..=max_c);
            if self.is_valid_placement(r, c, vertical, length) {
                return Ok((r, c, vertical));
            }
        }
        Err(PlacementError::UnableToPlace.into())
    }

    /// Randomly place every ship in `lengths`. A ship that finds no free
    /// position discards the partial fleet and starts over. When every restart
    /// fails the board is left unchanged and `UnableToPlace` is returned.
    pub fn place_fleet_randomly<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        lengths: &[usize],
    ) -> Result<(), GameError> {
        for attempt in 0..FLEET_PLACEMENT_RETRIES {
            let mut board = self.clone();
            match board.place_lengths(rng, lengths) {
                Ok(()) => {
                    *self = board;
                    return Ok(());
                }
                Err(GameError::InvalidPlacement(PlacementError::UnableToPlace)) => {
                    trace!("fleet placement attempt {} stuck, restarting", attempt + 1);
                }
                Err(e) => return Err(e),
            }
        }
        debug!("gave up placing fleet {:?} on {}x{} grid", lengths, self.size, self.size);
        Err(PlacementError::UnableToPlace.into())
    }

    fn place_lengths<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        lengths: &[usize],
    ) -> Result<(), GameError> {
        for &length in lengths {
            let (r, c, vertical) = self.random_placement(rng, length)?;
            self.place_ship(r, c, vertical, length)?;
        }
        Ok(())
    }

    /// Resolve an attack at (row, col). The first attack freezes the fleet.
    pub fn attack(&mut self, row: usize, col: usize) -> Result<AttackResult, GameError> {
        let i = self
            .index(row, col)
            .ok_or(GameError::OutOfBounds { row, col })?;
        self.frozen = true;
        let result = match self.cells[i] {
            CellState::Hit | CellState::Miss => AttackResult::AlreadyAttacked,
            CellState::ShipPresent => {
                self.cells[i] = CellState::Hit;
                AttackResult::Hit
            }
            CellState::Water => {
                self.cells[i] = CellState::Miss;
                AttackResult::Miss
            }
        };
        debug!("attack at ({}, {}): {:?}", row, col, result);
        Ok(result)
    }

    /// Returns `true` while any cell is still `ShipPresent`.
    pub fn has_ships_remaining(&self) -> bool {
        self.cells.contains(&CellState::ShipPresent)
    }

    /// Number of ship cells not yet hit.
    pub fn remaining_ship_cells(&self) -> usize {
        self.cells
            .iter()
            .filter(|&&c| c == CellState::ShipPresent)
            .count()
    }

    /// The ship occupying (row, col), if any.
    pub fn ship_at(&self, row: usize, col: usize) -> Option<&Ship> {
        self.ships.iter().find(|s| s.contains(row, col))
    }

    /// Returns `true` if every cell of `ship` has been hit.
    pub fn is_ship_sunk(&self, ship: &Ship) -> bool {
        ship.is_sunk(|(r, c)| self.cell_state(r, c) == Some(CellState::Hit))
    }

    /// Returns `true` if (row, col) belongs to a ship that is now sunk.
    pub fn is_sunk_at(&self, row: usize, col: usize) -> bool {
        self.ship_at(row, col)
            .map_or(false, |ship| self.is_ship_sunk(ship))
    }

    /// Number of ships not yet sunk.
    pub fn ships_afloat(&self) -> usize {
        self.ships.iter().filter(|s| !self.is_ship_sunk(s)).count()
    }

    /// Coordinates of every cell in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let size = self.size;
        (0..size).flat_map(move |r| (0..size).map(move |c| (r, c)))
    }
}

impl TargetView for Board {
    fn size(&self) -> usize {
        self.size
    }

    fn view(&self, row: usize, col: usize) -> Option<CellView> {
        self.cell_state(row, col).map(|state| match state {
            CellState::Water | CellState::ShipPresent => CellView::Unknown,
            CellState::Hit => CellView::Hit,
            CellState::Miss => CellView::Miss,
        })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size.max(1)) {
            for (i, cell) in row.iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", cell.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{\n  size: {},\n  frozen: {},\n  ships: {:?}\n}}",
            self.size, self.frozen, self.ships
        )?;
        write!(f, "{}", self)
    }
}
