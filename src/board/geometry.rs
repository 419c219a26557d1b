//! Side-agnostic board geometry.
//!
//! Free functions over a `BoardState`: king localisation, orthogonal
//! adjacency, free straight paths to the edge, escape routes and the
//! throne/citadel proximity tests the evaluators are built from.
//!
//! Neighbour lookups are bounds-checked: a neighbour that would fall off
//! the board never matches a target.

use super::cell::Cell;
use super::position::{Position, BOARD_SIZE, CENTER};
use super::state::BoardState;

/// Cells orthogonally adjacent to the throne.
pub const THRONE_NEIGHBORS: [Position; 4] = [
    Position::new(3, 4),
    Position::new(4, 3),
    Position::new(5, 4),
    Position::new(4, 5),
];

/// The inner ring around the throne where a capture needs fewer helpers.
pub const NEAR_CITADEL_OR_THRONE: [Position; 8] = [
    Position::new(4, 2),
    Position::new(4, 6),
    Position::new(2, 4),
    Position::new(6, 4),
    Position::new(3, 4),
    Position::new(5, 4),
    Position::new(4, 3),
    Position::new(4, 5),
];

/// Cells from which attackers block the king's diagonal approach to the edges.
pub const BLOCKED_ESCAPES: [Position; 12] = [
    Position::new(1, 1),
    Position::new(1, 2),
    Position::new(1, 6),
    Position::new(1, 7),
    Position::new(2, 1),
    Position::new(2, 7),
    Position::new(6, 1),
    Position::new(6, 7),
    Position::new(7, 1),
    Position::new(7, 2),
    Position::new(7, 6),
    Position::new(7, 7),
];

/// Locates the king with a row-major scan.
pub fn king_position(state: &BoardState) -> Option<Position> {
    state
        .iter()
        .find(|&(_, cell)| cell == Cell::King)
        .map(|(pos, _)| pos)
}

/// True when the king stands on the throne.
pub fn king_on_throne(state: &BoardState) -> bool {
    state.get(CENTER) == Cell::King
}

/// Counts orthogonal neighbours of `pos` holding `target`.
pub fn count_adjacent(state: &BoardState, pos: Position, target: Cell) -> usize {
    pos.neighbors().filter(|&n| state.get(n) == target).count()
}

/// Orthogonal neighbours of `pos` holding `target`, in up/down/left/right order.
pub fn positions_adjacent(state: &BoardState, pos: Position, target: Cell) -> Vec<Position> {
    let mut found = Vec::with_capacity(4);
    for n in pos.neighbors() {
        if state.get(n) == target {
            found.push(n);
        }
    }
    found
}

/// True when `pos` touches the king orthogonally.
pub fn is_near_king(state: &BoardState, pos: Position) -> bool {
    count_adjacent(state, pos, Cell::King) > 0
}

/// Number of horizontal directions (0..=2) with no occupied cell between
/// `pos` and the board edge.
pub fn count_free_path_along_row(state: &BoardState, pos: Position) -> usize {
    let open = |c: usize| !state.get(Position::new(pos.row, c)).is_occupied();
    let right_free = (pos.col + 1..BOARD_SIZE).all(open);
    let left_free = (0..pos.col).all(open);
    right_free as usize + left_free as usize
}

/// Number of vertical directions (0..=2) with no occupied cell between
/// `pos` and the board edge.
pub fn count_free_path_along_column(state: &BoardState, pos: Position) -> usize {
    let open = |r: usize| !state.get(Position::new(r, pos.col)).is_occupied();
    let down_free = (pos.row + 1..BOARD_SIZE).all(open);
    let up_free = (0..pos.row).all(open);
    down_free as usize + up_free as usize
}

/// True inside the central 3x3 block where the king cannot threaten an escape.
#[inline]
pub fn king_in_safe_zone(king: Position) -> bool {
    (3..=5).contains(&king.row) && (3..=5).contains(&king.col)
}

#[inline]
fn index_near_edge(i: usize) -> bool {
    i <= 2 || i >= 6
}

/// Free straight routes (0..=4) from the king to the edge.
///
/// Column paths only count when the king's column is within two of an
/// edge, row paths only when its row is. Inside the safe zone, or with no
/// king on the board, there are none.
pub fn count_king_escape_routes(state: &BoardState) -> usize {
    let Some(king) = king_position(state) else {
        return 0;
    };
    if king_in_safe_zone(king) {
        return 0;
    }
    let mut routes = 0;
    if index_near_edge(king.col) {
        routes += count_free_path_along_column(state, king);
    }
    if index_near_edge(king.row) {
        routes += count_free_path_along_row(state, king);
    }
    routes
}

/// True when the king has at least one open route to the edge.
pub fn king_is_mobile_toward_win(state: &BoardState) -> bool {
    count_king_escape_routes(state) > 0
}

/// Attackers needed around the king for a capture at `king`:
/// 4 on the throne, 3 next to it, 2 anywhere else.
pub fn eaten_adjacent_positions_at(king: Position) -> usize {
    if king == CENTER {
        4
    } else if THRONE_NEIGHBORS.contains(&king) {
        3
    } else {
        2
    }
}

/// Attackers needed to capture the king where it currently stands.
/// A board without a king reports the open-board value of 2.
pub fn count_eaten_adjacent_positions(state: &BoardState) -> usize {
    king_position(state).map_or(2, eaten_adjacent_positions_at)
}

/// True for the eight cells of the ring around the throne.
pub fn is_near_citadel_or_throne(pos: Position) -> bool {
    NEAR_CITADEL_OR_THRONE.contains(&pos)
}

/// True once the king stands on the outer ring.
pub fn has_defender_won(state: &BoardState) -> bool {
    king_position(state).is_some_and(Position::is_on_edge)
}

/// Attackers currently sitting on the escape-blocking cells.
pub fn count_blocked_escapes(state: &BoardState) -> usize {
    BLOCKED_ESCAPES
        .iter()
        .filter(|&&p| state.get(p) == Cell::Attacker)
        .count()
}

/// The cell across the king from an adjacent enemy, on the axis they share.
///
/// Returns `None` when that cell would lie off the board.
pub fn calculate_target_position(king: Position, enemy: Position) -> Option<Position> {
    if enemy.row == king.row {
        let dc = if enemy.col < king.col { 1 } else { -1 };
        king.offset(0, dc)
    } else {
        let dr = if enemy.row < king.row { 1 } else { -1 };
        king.offset(dr, 0)
    }
}
