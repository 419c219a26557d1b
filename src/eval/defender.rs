//! Defender (white) evaluation.
//!
//! Six normalised features: defenders on the key diagonal cells, defenders
//! alive, attackers captured, room left around the king before a capture,
//! open escape routes, and the king-protection score for the case where a
//! single attacker already touches the king.

use std::sync::Arc;

use super::trace::EvalTrace;
use super::weights::{Feature, FeatureValues, WeightTable};
use super::{EvalError, ATTACKER_COUNT, DEFENDER_COUNT};
use crate::board::geometry::{
    calculate_target_position, count_adjacent, count_king_escape_routes,
    eaten_adjacent_positions_at, is_near_citadel_or_throne, king_position, positions_adjacent,
};
use crate::board::{BoardState, Cell, Position, Side};

/// Cells defenders want to hold while most of them survive.
pub const BEST_POSITIONS: [Position; 4] = [
    Position::new(2, 3),
    Position::new(3, 5),
    Position::new(5, 3),
    Position::new(6, 5),
];

/// Defenders that may be lost before the best-positions feature switches off.
pub const BEST_POSITIONS_MARGIN: usize = 2;

/// Protection credited when a defender already holds the target cell.
const PROTECTION_NEAR: f64 = 0.6;
const PROTECTION_FULL: f64 = 1.0;

/// Features scored for the defending side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefenderFeature {
    BestPositions,
    BlackEaten,
    WhiteAlive,
    WinEscapesKing,
    BlackSurroundKing,
    ProtectionKing,
}

impl Feature for DefenderFeature {
    const ALL: &'static [Self] = &[
        DefenderFeature::BestPositions,
        DefenderFeature::BlackEaten,
        DefenderFeature::WhiteAlive,
        DefenderFeature::WinEscapesKing,
        DefenderFeature::BlackSurroundKing,
        DefenderFeature::ProtectionKing,
    ];

    fn name(self) -> &'static str {
        match self {
            DefenderFeature::BestPositions => "best_positions",
            DefenderFeature::BlackEaten => "black_eaten",
            DefenderFeature::WhiteAlive => "white_alive",
            DefenderFeature::WinEscapesKing => "win_escapes_king",
            DefenderFeature::BlackSurroundKing => "black_surround_king",
            DefenderFeature::ProtectionKing => "protection_king",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

pub type DefenderWeights = WeightTable<DefenderFeature, 6>;
pub type DefenderValues = FeatureValues<DefenderFeature, 6>;

/// Default defender weights.
pub const DEFENDER_WEIGHTS: DefenderWeights = WeightTable::new([2.0, 20.0, 35.0, 18.0, 7.0, 18.0]);

/// Fraction of best-position cells held by defenders, or 0 once too many
/// defenders have been lost.
pub fn best_positions_fraction(state: &BoardState) -> f64 {
    if state.count(Cell::Defender) < DEFENDER_COUNT - BEST_POSITIONS_MARGIN {
        return 0.0;
    }
    let held = BEST_POSITIONS
        .iter()
        .filter(|&&p| state.get(p) == Cell::Defender)
        .count();
    held as f64 / BEST_POSITIONS.len() as f64
}

/// Escape routes as a fraction of four; a single route scores nothing.
pub fn win_escape_fraction(state: &BoardState) -> f64 {
    let routes = count_king_escape_routes(state);
    if routes > 1 {
        routes as f64 / 4.0
    } else {
        0.0
    }
}

/// How well the king is covered against a capture that needs one more attacker.
///
/// Only scored when exactly one attacker touches the king and the king
/// stands where two attackers suffice. The cell across the king from that
/// attacker is the one the capture must use:
/// - a defender already there earns 0.6;
/// - on the outer ring the result is 1.0 if it is empty and 0.0 otherwise;
/// - elsewhere each defender next to it adds 0.4/2 near the throne, 0.4/3
///   away from it.
///
/// A target off the board means the king stands on the edge with the
/// attacker inside; there is nothing to flank against, so that counts as
/// fully protected.
pub fn protection_king(state: &BoardState, king: Position) -> f64 {
    let near_enemy = positions_adjacent(state, king, Cell::Attacker);
    if near_enemy.len() != 1 || eaten_adjacent_positions_at(king) != 2 {
        return 0.0;
    }

    let Some(target) = calculate_target_position(king, near_enemy[0]) else {
        return PROTECTION_FULL;
    };
    let occupant = state.get(target);

    let mut result = 0.0;
    if occupant == Cell::Defender {
        result += PROTECTION_NEAR;
    }

    if target.is_on_edge() {
        result = if occupant == Cell::Empty { PROTECTION_FULL } else { 0.0 };
    } else {
        let divisor = if is_near_citadel_or_throne(target) { 2.0 } else { 3.0 };
        let per_defender = (PROTECTION_FULL - PROTECTION_NEAR) / divisor;
        result += per_defender * count_adjacent(state, target, Cell::Defender) as f64;
    }
    result
}

/// Scores a board from the defender's point of view.
#[derive(Clone)]
pub struct DefenderEvaluator {
    weights: DefenderWeights,
    trace: Option<Arc<dyn EvalTrace>>,
}

impl DefenderEvaluator {
    pub fn new() -> Self {
        DefenderEvaluator {
            weights: DEFENDER_WEIGHTS,
            trace: None,
        }
    }

    /// Replaces the weights. Build custom tables with
    /// [`WeightTable::try_new`] or [`WeightTable::with_weight`].
    pub fn with_weights(mut self, weights: DefenderWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Reports every weighted term of later evaluations to `trace`.
    pub fn with_trace(mut self, trace: Arc<dyn EvalTrace>) -> Self {
        self.trace = Some(trace);
        self
    }

    pub fn weights(&self) -> &DefenderWeights {
        &self.weights
    }

    /// Computes the normalised feature values without weighting them.
    pub fn features(&self, state: &BoardState) -> Result<DefenderValues, EvalError> {
        let king = king_position(state).ok_or(EvalError::KingMissing)?;
        let attackers = state.count(Cell::Attacker);
        let defenders = state.count(Cell::Defender);
        let needed = eaten_adjacent_positions_at(king) as f64;
        let pressing = count_adjacent(state, king, Cell::Attacker) as f64;

        let mut values = DefenderValues::new();
        values.set(DefenderFeature::BestPositions, best_positions_fraction(state));
        values.set(DefenderFeature::WhiteAlive, defenders as f64 / DEFENDER_COUNT as f64);
        values.set(
            DefenderFeature::BlackEaten,
            (ATTACKER_COUNT as f64 - attackers as f64) / ATTACKER_COUNT as f64,
        );
        values.set(DefenderFeature::BlackSurroundKing, (needed - pressing) / needed);
        values.set(DefenderFeature::ProtectionKing, protection_king(state, king));
        values.set(DefenderFeature::WinEscapesKing, win_escape_fraction(state));
        Ok(values)
    }

    /// Weighted sum of the defender features. Not clamped.
    pub fn evaluate(&self, state: &BoardState) -> Result<f64, EvalError> {
        let values = self.features(state)?;
        Ok(self.weights.score(Side::Defender, &values, self.trace.as_deref()))
    }
}

impl Default for DefenderEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Turn, CENTER};
    use crate::eval::trace::FeatureTerm;
    use std::sync::Mutex;

    fn board_with(pieces: &[(usize, usize, Cell)]) -> BoardState {
        let mut state = BoardState::empty(Turn::DefenderTurn);
        for &(r, c, cell) in pieces {
            state.set(Position::new(r, c), cell);
        }
        state
    }

    fn protection_of(state: &BoardState) -> f64 {
        let king = king_position(state).unwrap();
        protection_king(state, king)
    }

    #[test]
    fn initial_position_baseline() {
        let score = DefenderEvaluator::new().evaluate(&BoardState::initial()).unwrap();
        assert_eq!(score, 42.0);
    }

    #[test]
    fn initial_features() {
        let values = DefenderEvaluator::new().features(&BoardState::initial()).unwrap();
        assert_eq!(values.get(DefenderFeature::BestPositions), 0.0);
        assert_eq!(values.get(DefenderFeature::WhiteAlive), 1.0);
        assert_eq!(values.get(DefenderFeature::BlackEaten), 0.0);
        assert_eq!(values.get(DefenderFeature::BlackSurroundKing), 1.0);
        assert_eq!(values.get(DefenderFeature::WinEscapesKing), 0.0);
        assert_eq!(values.get(DefenderFeature::ProtectionKing), 0.0);
    }

    // --- protection_king ---

    #[test]
    fn protection_near_throne_with_two_helpers() {
        // Attacker above the king, target below it on the throne ring.
        let state = board_with(&[
            (1, 4, Cell::King),
            (0, 4, Cell::Attacker),
            (2, 4, Cell::Defender),
            (3, 4, Cell::Defender),
            (2, 3, Cell::Defender),
        ]);
        let p = protection_of(&state);
        assert!((p - (0.6 + 0.2 * 2.0)).abs() < 1e-12, "got {}", p);
        assert!((p - 1.0).abs() < 1e-12);
    }

    #[test]
    fn protection_away_from_throne_uses_thirds() {
        // Attacker left of the king; target (6, 3) is empty and off the ring.
        let state = board_with(&[
            (6, 2, Cell::King),
            (6, 1, Cell::Attacker),
            (5, 3, Cell::Defender),
            (7, 3, Cell::Defender),
        ]);
        let p = protection_of(&state);
        assert!((p - 0.4 / 3.0 * 2.0).abs() < 1e-12, "got {}", p);
    }

    #[test]
    fn protection_on_edge_target() {
        let empty_edge = board_with(&[(1, 5, Cell::King), (2, 5, Cell::Attacker)]);
        assert_eq!(protection_of(&empty_edge), 1.0);

        let mut held_by_defender = empty_edge.clone();
        held_by_defender.set(Position::new(0, 5), Cell::Defender);
        assert_eq!(protection_of(&held_by_defender), 0.0);

        let mut held_by_attacker = empty_edge.clone();
        held_by_attacker.set(Position::new(0, 5), Cell::Attacker);
        assert_eq!(protection_of(&held_by_attacker), 0.0);
    }

    #[test]
    fn protection_off_board_target() {
        let state = board_with(&[(0, 3, Cell::King), (1, 3, Cell::Attacker)]);
        assert_eq!(protection_of(&state), 1.0);
    }

    #[test]
    fn protection_zero_with_two_attackers() {
        let state = board_with(&[
            (2, 2, Cell::King),
            (1, 2, Cell::Attacker),
            (2, 1, Cell::Attacker),
            (3, 2, Cell::Defender),
        ]);
        assert_eq!(protection_of(&state), 0.0);
    }

    #[test]
    fn protection_zero_next_to_throne() {
        let state = board_with(&[(3, 4, Cell::King), (2, 4, Cell::Attacker), (4, 4, Cell::Throne)]);
        assert_eq!(protection_of(&state), 0.0);
    }

    #[test]
    fn protection_zero_without_threat() {
        let state = board_with(&[(2, 2, Cell::King), (2, 3, Cell::Defender)]);
        assert_eq!(protection_of(&state), 0.0);
    }

    // --- other features ---

    #[test]
    fn single_escape_route_scores_nothing() {
        // Row 2 blocked both ways, column 2 open upward only.
        let state = board_with(&[
            (2, 2, Cell::King),
            (2, 0, Cell::Attacker),
            (2, 8, Cell::Attacker),
            (8, 2, Cell::Attacker),
        ]);
        assert_eq!(count_king_escape_routes(&state), 1);
        assert_eq!(win_escape_fraction(&state), 0.0);

        let open = board_with(&[(2, 2, Cell::King), (8, 2, Cell::Attacker)]);
        assert_eq!(count_king_escape_routes(&open), 3);
        assert_eq!(win_escape_fraction(&open), 0.75);
    }

    #[test]
    fn best_positions_need_enough_defenders() {
        let mut state = BoardState::initial();
        state.set(Position::new(2, 3), Cell::Defender);
        state.set(Position::new(3, 5), Cell::Defender);
        // Ten defenders now; two of four best cells held.
        assert_eq!(best_positions_fraction(&state), 0.5);

        for c in [2, 3, 5, 6] {
            state.set(Position::new(4, c), Cell::Empty);
        }
        state.set(Position::new(2, 4), Cell::Empty);
        // Five defenders remain: below the margin.
        assert_eq!(state.count(Cell::Defender), 5);
        assert_eq!(best_positions_fraction(&state), 0.0);
    }

    #[test]
    fn surround_is_inverted() {
        let eval = DefenderEvaluator::new();
        let state = board_with(&[(2, 2, Cell::King), (1, 2, Cell::Attacker)]);
        assert_eq!(eval.features(&state).unwrap().get(DefenderFeature::BlackSurroundKing), 0.5);
    }

    #[test]
    fn missing_king_is_an_error() {
        let mut state = BoardState::initial();
        state.set(CENTER, Cell::Throne);
        assert_eq!(DefenderEvaluator::new().evaluate(&state), Err(EvalError::KingMissing));
    }

    #[test]
    fn trace_hook_receives_six_terms() {
        let seen: Arc<Mutex<Vec<FeatureTerm>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let eval = DefenderEvaluator::new().with_trace(Arc::new(move |t: &FeatureTerm| {
            sink.lock().unwrap().push(*t);
        }));

        let score = eval.evaluate(&BoardState::initial()).unwrap();
        let terms = seen.lock().unwrap();
        assert_eq!(terms.len(), 6);
        assert_eq!(terms[0].feature, "best_positions");
        assert!(terms.iter().all(|t| t.side == Side::Defender));
        let total: f64 = terms.iter().map(|t| t.contribution).sum();
        assert_eq!(total, score);
    }

    #[test]
    fn custom_weights_must_be_valid() {
        assert!(DefenderWeights::try_new([2.0, 20.0, -35.0, 18.0, 7.0, 18.0]).is_err());
        assert!(DefenderWeights::try_new([2.0, 20.0, 35.0, 18.0, 7.0, f64::NAN]).is_err());

        let weights = DefenderWeights::try_new([0.0, 0.0, 1.0, 0.0, 0.0, 0.0]).unwrap();
        let eval = DefenderEvaluator::new().with_weights(weights);
        assert_eq!(eval.evaluate(&BoardState::initial()).unwrap(), 1.0);
    }

    #[test]
    fn evaluation_is_repeatable() {
        let eval = DefenderEvaluator::new();
        let state = board_with(&[
            (6, 2, Cell::King),
            (6, 1, Cell::Attacker),
            (5, 3, Cell::Defender),
        ]);
        let first = eval.evaluate(&state).unwrap();
        for _ in 0..10 {
            assert_eq!(eval.evaluate(&state).unwrap(), first);
        }
    }
}
