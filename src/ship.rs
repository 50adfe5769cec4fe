//! Ship descriptors.

use alloc::vec::Vec;

use crate::common::Coord;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Orientation for the `vertical` flag used by placement requests.
    pub fn from_vertical(vertical: bool) -> Self {
        if vertical {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        }
    }

    pub fn is_vertical(self) -> bool {
        self == Orientation::Vertical
    }

    /// Cell at offset `i` along this orientation from `(row, col)`.
    pub fn step(self, row: usize, col: usize, i: usize) -> Coord {
        match self {
            Orientation::Horizontal => (row, col + i),
            Orientation::Vertical => (row + i, col),
        }
    }
}

/// A ship placed on a board. Immutable once placed; sunk status is derived from
/// the owning board's cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ship {
    cells: Vec<Coord>,
    orientation: Orientation,
}

impl Ship {
    /// Build the cell span of a ship starting at (`row`, `col`). Bounds are the
    /// board's concern.
    pub(crate) fn new(row: usize, col: usize, orientation: Orientation, length: usize) -> Self {
        let cells = (0..length).map(|i| orientation.step(row, col, i)).collect();
        Ship { cells, orientation }
    }

    /// Cells occupied by the ship, in order from its origin.
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Origin of the ship (row, col).
    pub fn origin(&self) -> Coord {
        self.cells[0]
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.cells.contains(&(row, col))
    }

    /// Check if the ship is sunk given a predicate reporting hit cells.
    pub fn is_sunk<F: Fn(Coord) -> bool>(&self, is_hit: F) -> bool {
        self.cells.iter().all(|&c| is_hit(c))
    }
}
