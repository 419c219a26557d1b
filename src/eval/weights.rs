//! Weighted feature folding shared by both evaluators.
//!
//! A side's features are a small enum indexable as `usize`; weights and
//! computed values live in parallel fixed-size arrays, so scoring is a dot
//! product with no allocation.

use std::fmt;
use std::marker::PhantomData;

use super::trace::{EvalTrace, FeatureTerm};
use crate::board::Side;

/// A named evaluation feature of one side.
pub trait Feature: Copy + fmt::Debug + PartialEq + Send + Sync + 'static {
    /// Every feature, in scoring order.
    const ALL: &'static [Self];

    /// Stable name used in traces.
    fn name(self) -> &'static str;

    /// Position of the feature in `ALL`.
    fn index(self) -> usize;
}

/// Rejected weight updates.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum WeightError {
    #[error("weight for '{feature}' must be a non-negative number, got {weight}")]
    Invalid { feature: &'static str, weight: f64 },
}

/// Fixed mapping from feature to non-negative weight.
#[derive(Clone, Copy, PartialEq)]
pub struct WeightTable<F: Feature, const N: usize> {
    weights: [f64; N],
    _feature: PhantomData<F>,
}

impl<F: Feature, const N: usize> WeightTable<F, N> {
    /// Builds a table from weights listed in `F::ALL` order without
    /// checking them. Only the built-in default tables use this.
    pub(crate) const fn new(weights: [f64; N]) -> Self {
        WeightTable {
            weights,
            _feature: PhantomData,
        }
    }

    /// Builds a table from weights listed in `F::ALL` order, rejecting any
    /// negative or non-finite entry.
    pub fn try_new(weights: [f64; N]) -> Result<Self, WeightError> {
        for &feature in F::ALL {
            check(feature, weights[feature.index()])?;
        }
        Ok(Self::new(weights))
    }

    #[inline]
    pub fn weight(&self, feature: F) -> f64 {
        self.weights[feature.index()]
    }

    /// Returns a copy with one weight replaced.
    pub fn with_weight(mut self, feature: F, weight: f64) -> Result<Self, WeightError> {
        check(feature, weight)?;
        self.weights[feature.index()] = weight;
        Ok(self)
    }

    /// Folds weights and values into a scalar, reporting each term to `trace`.
    pub fn score(
        &self,
        side: Side,
        values: &FeatureValues<F, N>,
        trace: Option<&dyn EvalTrace>,
    ) -> f64 {
        let mut total = 0.0;
        for &feature in F::ALL {
            let weight = self.weight(feature);
            let value = values.get(feature);
            let contribution = weight * value;
            total += contribution;
            if let Some(trace) = trace {
                trace.record(&FeatureTerm {
                    side,
                    feature: feature.name(),
                    weight,
                    value,
                    contribution,
                });
            }
        }
        total
    }
}

fn check<F: Feature>(feature: F, weight: f64) -> Result<(), WeightError> {
    if !weight.is_finite() || weight < 0.0 {
        return Err(WeightError::Invalid {
            feature: feature.name(),
            weight,
        });
    }
    Ok(())
}

impl<F: Feature, const N: usize> fmt::Debug for WeightTable<F, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(F::ALL.iter().map(|&feat| (feat.name(), self.weight(feat))))
            .finish()
    }
}

/// Normalised feature values computed for one board.
#[derive(Clone, Copy, PartialEq)]
pub struct FeatureValues<F: Feature, const N: usize> {
    values: [f64; N],
    _feature: PhantomData<F>,
}

impl<F: Feature, const N: usize> FeatureValues<F, N> {
    pub fn new() -> Self {
        FeatureValues {
            values: [0.0; N],
            _feature: PhantomData,
        }
    }

    #[inline]
    pub fn get(&self, feature: F) -> f64 {
        self.values[feature.index()]
    }

    #[inline]
    pub fn set(&mut self, feature: F, value: f64) {
        self.values[feature.index()] = value;
    }
}

impl<F: Feature, const N: usize> Default for FeatureValues<F, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Feature, const N: usize> fmt::Debug for FeatureValues<F, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(F::ALL.iter().map(|&feat| (feat.name(), self.get(feat))))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Probe {
        First,
        Second,
    }

    impl Feature for Probe {
        const ALL: &'static [Self] = &[Probe::First, Probe::Second];

        fn name(self) -> &'static str {
            match self {
                Probe::First => "first",
                Probe::Second => "second",
            }
        }

        fn index(self) -> usize {
            self as usize
        }
    }

    #[test]
    fn score_is_dot_product() {
        let table = WeightTable::<Probe, 2>::new([2.0, 10.0]);
        let mut values = FeatureValues::new();
        values.set(Probe::First, 0.5);
        values.set(Probe::Second, 0.25);
        assert_eq!(table.score(Side::Attacker, &values, None), 3.5);
    }

    #[test]
    fn rejects_negative_and_nan_weights() {
        let table = WeightTable::<Probe, 2>::new([1.0, 1.0]);
        assert!(table.with_weight(Probe::First, -1.0).is_err());
        assert!(table.with_weight(Probe::First, f64::NAN).is_err());
        let updated = table.with_weight(Probe::Second, 4.0).unwrap();
        assert_eq!(updated.weight(Probe::Second), 4.0);
        assert_eq!(table.weight(Probe::Second), 1.0);
    }

    #[test]
    fn try_new_checks_every_entry() {
        let table = WeightTable::<Probe, 2>::try_new([2.0, 0.0]).unwrap();
        assert_eq!(table.weight(Probe::First), 2.0);

        assert_eq!(
            WeightTable::<Probe, 2>::try_new([1.0, -3.0]),
            Err(WeightError::Invalid {
                feature: "second",
                weight: -3.0
            })
        );
        let nan = WeightTable::<Probe, 2>::try_new([f64::NAN, 1.0]).unwrap_err();
        assert!(matches!(nan, WeightError::Invalid { feature: "first", .. }));
        assert!(WeightTable::<Probe, 2>::try_new([f64::INFINITY, 1.0]).is_err());
    }

    #[test]
    fn trace_sees_every_term_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let hook = move |term: &FeatureTerm| {
            sink.lock().unwrap().push((term.feature, term.contribution));
        };

        let table = WeightTable::<Probe, 2>::new([3.0, 1.0]);
        let mut values = FeatureValues::new();
        values.set(Probe::First, 1.0);
        let total = table.score(Side::Defender, &values, Some(&hook));

        assert_eq!(total, 3.0);
        assert_eq!(*seen.lock().unwrap(), vec![("first", 3.0), ("second", 0.0)]);
    }

    #[test]
    fn debug_lists_names() {
        let table = WeightTable::<Probe, 2>::new([3.0, 1.0]);
        let text = format!("{:?}", table);
        assert!(text.contains("\"first\": 3.0"));
    }
}
