//! Cell contents and turn indicator.
//!
//! Both enums carry two spellings: the compact code used by the linear
//! notation and the upper-case name the game server puts in its JSON.

use serde::{Deserialize, Serialize};

/// The side a player controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Black: tries to capture the king.
    #[serde(alias = "black")]
    Attacker,
    /// White: tries to walk the king to the edge.
    #[serde(alias = "white")]
    Defender,
}

impl Side {
    /// Returns the colour name used by the game server.
    pub const fn color_name(self) -> &'static str {
        match self {
            Side::Attacker => "black",
            Side::Defender => "white",
        }
    }

    /// Parses a side from a colour or role name, case-insensitively.
    pub fn from_name(s: &str) -> Option<Side> {
        match s.to_ascii_lowercase().as_str() {
            "black" | "b" | "attacker" => Some(Side::Attacker),
            "white" | "w" | "defender" => Some(Side::Defender),
            _ => None,
        }
    }

    pub const fn opponent(self) -> Side {
        match self {
            Side::Attacker => Side::Defender,
            Side::Defender => Side::Attacker,
        }
    }
}

/// Contents of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[serde(rename = "EMPTY")]
    Empty,
    #[serde(rename = "BLACK")]
    Attacker,
    #[serde(rename = "WHITE")]
    Defender,
    #[serde(rename = "THRONE")]
    Throne,
    #[serde(rename = "KING")]
    King,
}

impl Cell {
    /// Returns the single-character linear-notation code.
    pub const fn code(self) -> char {
        match self {
            Cell::Empty => 'O',
            Cell::Attacker => 'B',
            Cell::Defender => 'W',
            Cell::Throne => 'T',
            Cell::King => 'K',
        }
    }

    /// Parses a cell from its linear-notation code.
    pub fn from_code(c: char) -> Option<Cell> {
        match c {
            'O' => Some(Cell::Empty),
            'B' => Some(Cell::Attacker),
            'W' => Some(Cell::Defender),
            'T' => Some(Cell::Throne),
            'K' => Some(Cell::King),
            _ => None,
        }
    }

    /// True for any cell that blocks a straight path.
    #[inline]
    pub const fn is_occupied(self) -> bool {
        !matches!(self, Cell::Empty)
    }
}

/// Whose move it is, or how the game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Turn {
    #[serde(rename = "WHITE")]
    DefenderTurn,
    #[serde(rename = "BLACK")]
    AttackerTurn,
    #[serde(rename = "WHITEWIN")]
    DefenderWin,
    #[serde(rename = "BLACKWIN")]
    AttackerWin,
    #[serde(rename = "DRAW")]
    Draw,
}

impl Turn {
    /// Returns the linear-notation code (one or two characters).
    pub const fn code(self) -> &'static str {
        match self {
            Turn::DefenderTurn => "W",
            Turn::AttackerTurn => "B",
            Turn::DefenderWin => "WW",
            Turn::AttackerWin => "BW",
            Turn::Draw => "D",
        }
    }

    /// Parses a turn from its linear-notation code.
    pub fn from_code(s: &str) -> Option<Turn> {
        match s {
            "W" => Some(Turn::DefenderTurn),
            "B" => Some(Turn::AttackerTurn),
            "WW" => Some(Turn::DefenderWin),
            "BW" => Some(Turn::AttackerWin),
            "D" => Some(Turn::Draw),
            _ => None,
        }
    }

    pub const fn is_game_over(self) -> bool {
        matches!(self, Turn::DefenderWin | Turn::AttackerWin | Turn::Draw)
    }

    /// The side to move, or `None` once the game has ended.
    pub const fn side_to_move(self) -> Option<Side> {
        match self {
            Turn::DefenderTurn => Some(Side::Defender),
            Turn::AttackerTurn => Some(Side::Attacker),
            _ => None,
        }
    }

    /// The winning side, if the game ended with a win.
    pub const fn winner(self) -> Option<Side> {
        match self {
            Turn::DefenderWin => Some(Side::Defender),
            Turn::AttackerWin => Some(Side::Attacker),
            _ => None,
        }
    }
}
