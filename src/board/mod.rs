//! Board topology: the 52-cell shared ring, per-color entry offsets, and
//! the 6-cell home stretches.
//!
//! Pure data and lookups. The rules only need [`start_offset`] and the
//! lengths; the cell coordinates exist for renderers.
//!
//! ```
//! use ludo_engine::board::{cell_for, start_offset, Cell};
//! use ludo_engine::core::{Color, TokenState};
//!
//! let entry = start_offset(Color::Green) as u8;
//! let cell = cell_for(Color::Green, &TokenState::OnRing { index: entry });
//! assert_eq!(cell, Some(Cell { row: 1, col: 8 }));
//! ```

mod topology;

pub use topology::{
    cell_for, home_stretch, is_safe_spot, start_offset, BoardTopology, Cell, BOARD_SIZE,
    HOME_STRETCH_LENGTH, RING, RING_LENGTH, SAFE_SPOTS,
};
