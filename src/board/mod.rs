//! Board representation and geometry.
//!
//! Contains the cell and turn types, coordinates, the game-state snapshot,
//! and the side-agnostic geometry primitives the evaluators build on.

pub mod cell;
pub mod geometry;
pub mod position;
pub mod state;

pub use cell::{Cell, Side, Turn};
pub use position::{Position, BOARD_SIZE, CENTER, LAST_INDEX};
pub use state::{BoardError, BoardState};
