//! Position evaluation.
//!
//! Scores a board from the attacker's or the defender's point of view as a
//! weighted sum of normalised features. Evaluation is a pure function of
//! the board: no state is kept between calls, so independent boards can be
//! scored concurrently.

pub mod attacker;
pub mod defender;
pub mod trace;
pub mod weights;

use rayon::prelude::*;

use crate::board::{BoardState, Side};

pub use attacker::{AttackerEvaluator, AttackerFeature, ATTACKER_WEIGHTS};
pub use defender::{protection_king, DefenderEvaluator, DefenderFeature, DEFENDER_WEIGHTS};
pub use trace::{EvalTrace, FeatureTerm, LogTrace, NoTrace};
pub use weights::{Feature, FeatureValues, WeightError, WeightTable};

/// Attackers at the start of a game.
pub const ATTACKER_COUNT: usize = 16;

/// Defenders (excluding the king) at the start of a game.
pub const DEFENDER_COUNT: usize = 8;

/// Errors raised when a board cannot be scored.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EvalError {
    #[error("no king on the board")]
    KingMissing,
}

/// Scores a board for the attacker with the default weights.
pub fn attacker_evaluate(state: &BoardState) -> Result<f64, EvalError> {
    AttackerEvaluator::new().evaluate(state)
}

/// Scores a board for the defender with the default weights.
pub fn defender_evaluate(state: &BoardState) -> Result<f64, EvalError> {
    DefenderEvaluator::new().evaluate(state)
}

/// Scores a board for the given side with the default weights.
pub fn evaluate(side: Side, state: &BoardState) -> Result<f64, EvalError> {
    match side {
        Side::Attacker => attacker_evaluate(state),
        Side::Defender => defender_evaluate(state),
    }
}

/// Scores many independent boards for one side in parallel.
///
/// Results keep the order of `states`.
pub fn evaluate_batch(side: Side, states: &[BoardState]) -> Vec<Result<f64, EvalError>> {
    match side {
        Side::Attacker => {
            let eval = AttackerEvaluator::new();
            states.par_iter().map(|s| eval.evaluate(s)).collect()
        }
        Side::Defender => {
            let eval = DefenderEvaluator::new();
            states.par_iter().map(|s| eval.evaluate(s)).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Cell, Position, CENTER};

    #[test]
    fn entry_points_match_evaluators() {
        let state = BoardState::initial();
        assert_eq!(attacker_evaluate(&state), Ok(35.0));
        assert_eq!(defender_evaluate(&state), Ok(42.0));
        assert_eq!(evaluate(Side::Attacker, &state), attacker_evaluate(&state));
        assert_eq!(evaluate(Side::Defender, &state), defender_evaluate(&state));
    }

    #[test]
    fn evaluation_does_not_mutate_state() {
        let state = BoardState::initial();
        let before = state.clone();
        let _ = attacker_evaluate(&state);
        let _ = defender_evaluate(&state);
        assert_eq!(state, before);
    }

    #[test]
    fn batch_preserves_order_and_errors() {
        let start = BoardState::initial();
        let mut no_king = start.clone();
        no_king.set(CENTER, Cell::Throne);
        let mut fewer_attackers = start.clone();
        fewer_attackers.set(Position::new(0, 3), Cell::Empty);

        let states = vec![start.clone(), no_king, fewer_attackers.clone()];
        let results = evaluate_batch(Side::Defender, &states);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0], defender_evaluate(&start));
        assert_eq!(results[1], Err(EvalError::KingMissing));
        assert_eq!(results[2], defender_evaluate(&fewer_attackers));
    }

    #[test]
    fn batch_matches_sequential() {
        let mut states = Vec::new();
        let mut state = BoardState::initial();
        for c in [0, 1, 7, 8] {
            state.set(Position::new(4, c), Cell::Empty);
            states.push(state.clone());
        }
        let batch = evaluate_batch(Side::Attacker, &states);
        for (s, r) in states.iter().zip(batch) {
            assert_eq!(r, attacker_evaluate(s));
        }
    }
}
