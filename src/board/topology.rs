//! Static board layout.
//!
//! Coordinates are `(row, col)` cells on a 15×15 grid. The ring starts on
//! RED's entry cell and runs clockwise.

use serde::{Deserialize, Serialize};

use crate::core::{Color, TokenState};

/// Side length of the square board grid.
pub const BOARD_SIZE: u8 = 15;

/// Cells on the shared ring.
pub const RING_LENGTH: usize = 52;

/// Cells on each color's private home stretch.
pub const HOME_STRETCH_LENGTH: usize = 6;

/// Ring indices immune to capture. No transition consults these yet.
pub const SAFE_SPOTS: [usize; 8] = [0, 8, 13, 21, 26, 34, 39, 47];

/// A grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: u8,
    pub col: u8,
}

const fn c(row: u8, col: u8) -> Cell {
    Cell { row, col }
}

/// The shared ring, in travel order.
pub const RING: [Cell; RING_LENGTH] = [
    c(6, 1), c(6, 2), c(6, 3), c(6, 4), c(6, 5),
    c(5, 6), c(4, 6), c(3, 6), c(2, 6), c(1, 6), c(0, 6),
    c(0, 7),
    c(0, 8), c(1, 8), c(2, 8), c(3, 8), c(4, 8), c(5, 8),
    c(6, 9), c(6, 10), c(6, 11), c(6, 12), c(6, 13), c(6, 14),
    c(7, 14),
    c(8, 14), c(8, 13), c(8, 12), c(8, 11), c(8, 10), c(8, 9),
    c(9, 8), c(10, 8), c(11, 8), c(12, 8), c(13, 8), c(14, 8),
    c(14, 7),
    c(14, 6), c(13, 6), c(12, 6), c(11, 6), c(10, 6), c(9, 6),
    c(8, 5), c(8, 4), c(8, 3), c(8, 2), c(8, 1), c(8, 0),
    c(7, 0),
    c(6, 0),
];

const RED_HOME: [Cell; HOME_STRETCH_LENGTH] = [c(7, 1), c(7, 2), c(7, 3), c(7, 4), c(7, 5), c(7, 6)];
const GREEN_HOME: [Cell; HOME_STRETCH_LENGTH] = [c(1, 7), c(2, 7), c(3, 7), c(4, 7), c(5, 7), c(6, 7)];
const YELLOW_HOME: [Cell; HOME_STRETCH_LENGTH] =
    [c(13, 7), c(12, 7), c(11, 7), c(10, 7), c(9, 7), c(8, 7)];
const BLUE_HOME: [Cell; HOME_STRETCH_LENGTH] =
    [c(7, 13), c(7, 12), c(7, 11), c(7, 10), c(7, 9), c(7, 8)];

/// Ring index where a color's tokens enter play. Entries are 13 apart.
#[must_use]
pub const fn start_offset(color: Color) -> usize {
    color.index() * (RING_LENGTH / 4)
}

/// A color's private home stretch, offset 0 first.
#[must_use]
pub const fn home_stretch(color: Color) -> &'static [Cell; HOME_STRETCH_LENGTH] {
    match color {
        Color::Red => &RED_HOME,
        Color::Green => &GREEN_HOME,
        Color::Yellow => &YELLOW_HOME,
        Color::Blue => &BLUE_HOME,
    }
}

/// Whether a ring index is flagged capture-immune.
#[must_use]
pub fn is_safe_spot(index: usize) -> bool {
    SAFE_SPOTS.contains(&index)
}

/// Grid cell a token occupies.
///
/// `None` while the token sits in base, and for coordinates off the board.
#[must_use]
pub fn cell_for(color: Color, state: &TokenState) -> Option<Cell> {
    match *state {
        TokenState::Base => None,
        TokenState::OnRing { index } => RING.get(index as usize).copied(),
        TokenState::OnHomeStretch { offset } => home_stretch(color).get(offset as usize).copied(),
    }
}

/// Handle to the process-wide board layout.
///
/// Zero-sized; collaborators that want to hold "the topology" as a value
/// use this instead of the free functions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BoardTopology;

impl BoardTopology {
    /// Length of the shared ring (52).
    #[must_use]
    pub const fn ring_length(self) -> usize {
        RING_LENGTH
    }

    /// Length of each home stretch (6).
    #[must_use]
    pub const fn home_stretch_length(self) -> usize {
        HOME_STRETCH_LENGTH
    }

    /// Ring entry index for a color.
    #[must_use]
    pub const fn start_offset(self, color: Color) -> usize {
        start_offset(color)
    }

    /// The ring cells in travel order.
    #[must_use]
    pub const fn ring(self) -> &'static [Cell; RING_LENGTH] {
        &RING
    }

    /// A color's home stretch cells.
    #[must_use]
    pub const fn home_stretch(self, color: Color) -> &'static [Cell; HOME_STRETCH_LENGTH] {
        home_stretch(color)
    }

    /// Capture-immune ring indices.
    #[must_use]
    pub const fn safe_spots(self) -> &'static [usize] {
        &SAFE_SPOTS
    }

    /// Grid cell for a token of `color` in `state`.
    #[must_use]
    pub fn cell_for(self, color: Color, state: &TokenState) -> Option<Cell> {
        cell_for(color, state)
    }
}
