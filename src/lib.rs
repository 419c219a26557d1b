//! Tablut evaluation library.
//!
//! Exposes the board representation, geometry primitives, the attacker and
//! defender evaluators, and the game-server protocol for use by search
//! drivers, integration tests, and the binary entry point.

pub mod board;
pub mod config;
pub mod eval;
pub mod protocol;

pub use board::{BoardState, Cell, Position, Side, Turn};
pub use eval::{attacker_evaluate, defender_evaluate, evaluate, evaluate_batch, EvalError};
