//! Injectable evaluation trace hook.
//!
//! Evaluators report each weighted term to an optional hook instead of
//! printing. `LogTrace` forwards to `tracing`; any closure taking a
//! `&FeatureTerm` works as a custom sink.

use crate::board::Side;

/// One weighted term of an evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureTerm {
    pub side: Side,
    pub feature: &'static str,
    pub weight: f64,
    pub value: f64,
    pub contribution: f64,
}

/// Receives the terms of every evaluation the owning evaluator performs.
pub trait EvalTrace: Send + Sync {
    fn record(&self, term: &FeatureTerm);
}

/// Discards every term.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTrace;

impl EvalTrace for NoTrace {
    fn record(&self, _term: &FeatureTerm) {}
}

/// Emits each term as a `tracing` debug event.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTrace;

impl EvalTrace for LogTrace {
    fn record(&self, term: &FeatureTerm) {
        tracing::debug!(
            side = term.side.color_name(),
            feature = term.feature,
            weight = term.weight,
            value = term.value,
            contribution = term.contribution,
            "{}: {} * {} = {}",
            term.feature,
            term.weight,
            term.value,
            term.contribution
        );
    }
}

impl<F> EvalTrace for F
where
    F: Fn(&FeatureTerm) + Send + Sync,
{
    fn record(&self, term: &FeatureTerm) {
        self(term)
    }
}
