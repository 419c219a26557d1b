//! JSON messages exchanged with the game server.
//!
//! Moves go out as `{"from": {"row": r, "col": c}, "to": {...}}`; states
//! come back as `{"board": [[cell; 9]; 9], "turn": turn}` with upper-case
//! cell and turn names (`EMPTY`, `WHITE`, `BLACK`, `THRONE`, `KING`;
//! `WHITE`, `BLACK`, `WHITEWIN`, `BLACKWIN`, `DRAW`).

use serde::{Deserialize, Serialize};

use crate::board::{BoardError, BoardState, Cell, Position, Turn};

/// A move from one cell to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Position,
    pub to: Position,
}

impl Move {
    pub fn new(from: impl Into<Position>, to: impl Into<Position>) -> Self {
        Move {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// A game state as sent by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateMessage {
    pub board: Vec<Vec<Cell>>,
    pub turn: Turn,
}

impl From<&BoardState> for StateMessage {
    fn from(state: &BoardState) -> Self {
        StateMessage {
            board: state.rows().iter().map(|row| row.to_vec()).collect(),
            turn: state.turn(),
        }
    }
}

impl TryFrom<StateMessage> for BoardState {
    type Error = BoardError;

    fn try_from(msg: StateMessage) -> Result<Self, Self::Error> {
        BoardState::from_rows(&msg.board, msg.turn)
    }
}
