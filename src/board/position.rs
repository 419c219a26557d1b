//! Board coordinates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Width and height of the board.
pub const BOARD_SIZE: usize = 9;

/// Index of the last row and column.
pub const LAST_INDEX: usize = BOARD_SIZE - 1;

/// The throne sits at the exact centre.
pub const CENTER: Position = Position::new(4, 4);

/// Orthogonal step offsets: up, down, left, right.
pub const ORTHOGONAL: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// A (row, column) cell coordinate, both in `0..BOARD_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// Returns the position if both indices lie on the board.
    pub const fn checked(row: usize, col: usize) -> Option<Self> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Position { row, col })
        } else {
            None
        }
    }

    /// Steps by the given offset, or `None` when that leaves the board.
    pub fn offset(self, dr: isize, dc: isize) -> Option<Self> {
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        Position::checked(row, col)
    }

    /// Orthogonal neighbours that exist on the board, in up/down/left/right order.
    pub fn neighbors(self) -> impl Iterator<Item = Position> {
        ORTHOGONAL
            .into_iter()
            .filter_map(move |(dr, dc)| self.offset(dr, dc))
    }

    /// True when the position lies on the outermost ring.
    #[inline]
    pub const fn is_on_edge(self) -> bool {
        self.row == 0 || self.row == LAST_INDEX || self.col == 0 || self.col == LAST_INDEX
    }

    /// Human-readable cell name: column letter then 1-based row (`e5` is the throne).
    pub fn box_name(self) -> String {
        let letter = (b'a' + self.col as u8) as char;
        format!("{}{}", letter, self.row + 1)
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Position::new(row, col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.box_name())
    }
}
