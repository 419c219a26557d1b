//! Attacker (black) evaluation.
//!
//! Four normalised features: attackers still on the board, defenders
//! captured, attackers pressing on the king relative to how many a capture
//! needs, and control of the rhombus ring once enough attackers remain.

use std::sync::Arc;

use super::trace::EvalTrace;
use super::weights::{Feature, FeatureValues, WeightTable};
use super::{EvalError, ATTACKER_COUNT, DEFENDER_COUNT};
use crate::board::geometry::{count_adjacent, eaten_adjacent_positions_at, king_position};
use crate::board::{BoardState, Cell, Position, Side};

/// The outer-ring cells attackers want to hold.
pub const RHOMBUS: [Position; 8] = [
    Position::new(1, 2),
    Position::new(1, 6),
    Position::new(2, 1),
    Position::new(2, 7),
    Position::new(6, 1),
    Position::new(6, 7),
    Position::new(7, 2),
    Position::new(7, 6),
];

/// Minimum attackers on the board before the rhombus feature applies.
pub const RHOMBUS_THRESHOLD: usize = 10;

/// Features scored for the attacking side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackerFeature {
    Alive,
    Eaten,
    SurroundKing,
    Rhombus,
}

impl Feature for AttackerFeature {
    const ALL: &'static [Self] = &[
        AttackerFeature::Alive,
        AttackerFeature::Eaten,
        AttackerFeature::SurroundKing,
        AttackerFeature::Rhombus,
    ];

    fn name(self) -> &'static str {
        match self {
            AttackerFeature::Alive => "alive",
            AttackerFeature::Eaten => "eaten",
            AttackerFeature::SurroundKing => "surround_king",
            AttackerFeature::Rhombus => "rhombus",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

pub type AttackerWeights = WeightTable<AttackerFeature, 4>;
pub type AttackerValues = FeatureValues<AttackerFeature, 4>;

/// Default attacker weights.
pub const ATTACKER_WEIGHTS: AttackerWeights = WeightTable::new([35.0, 48.0, 15.0, 2.0]);

/// Fraction of rhombus cells held by attackers, or 0 below the threshold.
pub fn rhombus_fraction(state: &BoardState) -> f64 {
    if state.count(Cell::Attacker) < RHOMBUS_THRESHOLD {
        return 0.0;
    }
    let held = RHOMBUS.iter().filter(|&&p| state.get(p) == Cell::Attacker).count();
    held as f64 / RHOMBUS.len() as f64
}

/// Scores a board from the attacker's point of view.
#[derive(Clone)]
pub struct AttackerEvaluator {
    weights: AttackerWeights,
    trace: Option<Arc<dyn EvalTrace>>,
}

impl AttackerEvaluator {
    pub fn new() -> Self {
        AttackerEvaluator {
            weights: ATTACKER_WEIGHTS,
            trace: None,
        }
    }

    /// Replaces the weights. Build custom tables with
    /// [`WeightTable::try_new`] or [`WeightTable::with_weight`].
    pub fn with_weights(mut self, weights: AttackerWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Reports every weighted term of later evaluations to `trace`.
    pub fn with_trace(mut self, trace: Arc<dyn EvalTrace>) -> Self {
        self.trace = Some(trace);
        self
    }

    pub fn weights(&self) -> &AttackerWeights {
        &self.weights
    }

    /// Computes the normalised feature values without weighting them.
    pub fn features(&self, state: &BoardState) -> Result<AttackerValues, EvalError> {
        let king = king_position(state).ok_or(EvalError::KingMissing)?;
        let attackers = state.count(Cell::Attacker);
        let defenders = state.count(Cell::Defender);

        let mut values = AttackerValues::new();
        values.set(AttackerFeature::Alive, attackers as f64 / ATTACKER_COUNT as f64);
        values.set(
            AttackerFeature::Eaten,
            (DEFENDER_COUNT as f64 - defenders as f64) / DEFENDER_COUNT as f64,
        );
        let pressing = count_adjacent(state, king, Cell::Attacker) as f64;
        let needed = eaten_adjacent_positions_at(king) as f64;
        values.set(AttackerFeature::SurroundKing, pressing / needed);
        values.set(AttackerFeature::Rhombus, rhombus_fraction(state));
        Ok(values)
    }

    /// Weighted sum of the attacker features. Not clamped.
    pub fn evaluate(&self, state: &BoardState) -> Result<f64, EvalError> {
        let values = self.features(state)?;
        Ok(self.weights.score(Side::Attacker, &values, self.trace.as_deref()))
    }
}

impl Default for AttackerEvaluator {
    fn default() -> Self {
        Self::new()
    }
}
