//! Linear board notation.
//!
//! A whole position on one line: the 81 cell codes in row-major order
//! followed by the turn code.
//!
//! Cells: `O` empty, `B` black, `W` white, `T` throne, `K` king.
//! Turns: `W`, `B`, `WW` (white won), `BW` (black won), `D` (draw).

use crate::board::{BoardState, Cell, Position, Turn, BOARD_SIZE};

const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// Errors that can occur while parsing linear notation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LinearError {
    #[error("expected {expected} cell codes followed by a turn, got {found} characters")]
    TooShort { expected: usize, found: usize },

    #[error("invalid cell code '{code}' at index {index}")]
    InvalidCell { index: usize, code: char },

    #[error("invalid turn code: '{0}'")]
    InvalidTurn(String),
}

/// Encodes a state as a single line.
pub fn encode_linear(state: &BoardState) -> String {
    let mut out = String::with_capacity(CELL_COUNT + 2);
    for row in state.rows() {
        out.extend(row.iter().map(|c| c.code()));
    }
    out.push_str(state.turn().code());
    out
}

/// Parses a single line into a state. Surrounding whitespace is ignored.
pub fn parse_linear(s: &str) -> Result<BoardState, LinearError> {
    let chars: Vec<char> = s.trim().chars().collect();
    if chars.len() <= CELL_COUNT {
        return Err(LinearError::TooShort {
            expected: CELL_COUNT,
            found: chars.len(),
        });
    }

    let turn_code: String = chars[CELL_COUNT..].iter().collect();
    let turn = Turn::from_code(&turn_code).ok_or(LinearError::InvalidTurn(turn_code))?;

    let mut state = BoardState::empty(turn);
    for (index, &code) in chars[..CELL_COUNT].iter().enumerate() {
        let cell = Cell::from_code(code).ok_or(LinearError::InvalidCell { index, code })?;
        state.set(Position::new(index / BOARD_SIZE, index % BOARD_SIZE), cell);
    }
    Ok(state)
}
