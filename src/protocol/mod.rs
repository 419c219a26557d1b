//! Game-server protocol handling.
//!
//! This module implements the compact linear board notation, the JSON move
//! and state messages, and the blocking TCP client that exchanges them with
//! the server.

pub mod client;
pub mod linear;
pub mod message;

pub use client::{ClientError, TablutClient};
pub use linear::{encode_linear, parse_linear, LinearError};
pub use message::{Move, StateMessage};
