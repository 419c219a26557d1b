//! Game state representation.
//!
//! Holds a snapshot of a Tablut game at one ply: the 9x9 grid of cells and
//! the turn indicator. Evaluators only read it; search drivers clone it to
//! explore hypothetical moves.

use std::fmt;

use super::cell::{Cell, Turn};
use super::position::{Position, BOARD_SIZE, CENTER};

/// Errors reported when a board violates its structural invariants.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("no king on the board")]
    KingMissing,

    #[error("more than one king on the board ({0} found)")]
    DuplicateKing(usize),

    #[error("board must have {expected} rows, got {found}")]
    WrongRowCount { expected: usize, found: usize },

    #[error("row {row} must have {expected} cells, got {found}")]
    WrongColumnCount {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Ashton Tablut starting layout, row-major, in linear-notation codes.
const INITIAL_ROWS: [&str; BOARD_SIZE] = [
    "OOOBBBOOO",
    "OOOOBOOOO",
    "OOOOWOOOO",
    "BOOOWOOOB",
    "BBWWKWWBB",
    "BOOOWOOOB",
    "OOOOWOOOO",
    "OOOOBOOOO",
    "OOOBBBOOO",
];

/// Complete board state at a point in time.
///
/// A fixed-size array keeps the state allocation-free, so cloning a state
/// for a hypothetical move is a plain copy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoardState {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
    turn: Turn,
}

impl BoardState {
    /// Creates a board with every cell empty.
    pub fn empty(turn: Turn) -> Self {
        BoardState {
            cells: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
            turn,
        }
    }

    /// Creates the standard opening position with white to move.
    pub fn initial() -> Self {
        let mut state = BoardState::empty(Turn::DefenderTurn);
        for (r, line) in INITIAL_ROWS.iter().enumerate() {
            for (c, ch) in line.chars().enumerate() {
                state.cells[r][c] = Cell::from_code(ch).unwrap_or(Cell::Empty);
            }
        }
        state
    }

    /// Builds a state from nested rows, checking the 9x9 shape.
    pub fn from_rows(rows: &[Vec<Cell>], turn: Turn) -> Result<Self, BoardError> {
        if rows.len() != BOARD_SIZE {
            return Err(BoardError::WrongRowCount {
                expected: BOARD_SIZE,
                found: rows.len(),
            });
        }
        let mut state = BoardState::empty(turn);
        for (r, row) in rows.iter().enumerate() {
            if row.len() != BOARD_SIZE {
                return Err(BoardError::WrongColumnCount {
                    row: r,
                    expected: BOARD_SIZE,
                    found: row.len(),
                });
            }
            state.cells[r].copy_from_slice(row);
        }
        Ok(state)
    }

    /// Returns the cell at a position.
    #[inline]
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.row][pos.col]
    }

    /// Overwrites the cell at a position.
    #[inline]
    pub fn set(&mut self, pos: Position, cell: Cell) {
        self.cells[pos.row][pos.col] = cell;
    }

    /// Clears a cell. The centre cell reverts to the throne marker.
    pub fn remove(&mut self, pos: Position) {
        let cell = if pos == CENTER { Cell::Throne } else { Cell::Empty };
        self.set(pos, cell);
    }

    /// Counts cells holding the given content.
    pub fn count(&self, cell: Cell) -> usize {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&c| c == cell)
            .count()
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    pub fn set_turn(&mut self, turn: Turn) {
        self.turn = turn;
    }

    /// Rows of the grid, top to bottom.
    pub fn rows(&self) -> &[[Cell; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    /// Iterates every (position, cell) pair in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.cells.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .map(move |(c, &cell)| (Position::new(r, c), cell))
        })
    }

    /// Checks that exactly one king is present.
    pub fn validate(&self) -> Result<(), BoardError> {
        match self.count(Cell::King) {
            0 => Err(BoardError::KingMissing),
            1 => Ok(()),
            n => Err(BoardError::DuplicateKing(n)),
        }
    }

    /// The grid alone, one line per row.
    pub fn board_string(&self) -> String {
        let mut out = String::with_capacity(BOARD_SIZE * (BOARD_SIZE + 1));
        for (r, row) in self.cells.iter().enumerate() {
            if r > 0 {
                out.push('\n');
            }
            out.extend(row.iter().map(|c| c.code()));
        }
        out
    }
}

impl Default for BoardState {
    fn default() -> Self {
        BoardState::initial()
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n-\n{}", self.board_string(), self.turn.code())
    }
}
