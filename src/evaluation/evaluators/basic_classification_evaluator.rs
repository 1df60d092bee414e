use crate::core::instances::Instance;
use crate::evaluation::{Estimator, Measurement, PerformanceEvaluator};

/// Online accuracy and Cohen's kappa over every result seen so far.
///
/// Kappa compares the observed accuracy with the agreement expected by
/// chance, computed from the marginals of true (`true_marginals`) and
/// predicted (`predicted_marginals`) classes.
#[derive(Debug, Clone)]
pub struct BasicClassificationEvaluator<E: Estimator + Default> {
    correct: E,
    true_marginals: Vec<E>,
    predicted_marginals: Vec<E>,
    num_classes: usize,
    seen: u64,
}

impl<E: Estimator + Default> BasicClassificationEvaluator<E> {
    pub fn new(num_classes: usize) -> Self {
        let make_vec = || (0..num_classes).map(|_| E::default()).collect::<Vec<_>>();
        Self {
            correct: E::default(),
            true_marginals: make_vec(),
            predicted_marginals: make_vec(),
            num_classes,
            seen: 0,
        }
    }

    pub fn num_classes(&self) -> usize {
        self.num_classes
    }

    /// Results that were counted, excluding skipped ones.
    pub fn seen(&self) -> u64 {
        self.seen
    }

    /// Index of the highest finite vote; the lowest index wins ties.
    #[inline]
    fn argmax(v: &[f64]) -> Option<usize> {
        let mut best = None;
        let mut best_value = f64::NEG_INFINITY;
        for (i, &x) in v.iter().enumerate() {
            if !x.is_finite() {
                continue;
            }
            if best.is_none() || x > best_value {
                best = Some(i);
                best_value = x;
            }
        }
        best
    }

    fn grow_to(&mut self, k: usize) {
        if k > self.num_classes {
            self.true_marginals.resize_with(k, E::default);
            self.predicted_marginals.resize_with(k, E::default);
            self.num_classes = k;
        }
    }

    fn kappa(&self) -> f64 {
        let p_o = self.correct.estimation();
        let p_e: f64 = self
            .true_marginals
            .iter()
            .zip(&self.predicted_marginals)
            .map(|(t, p)| (t.estimation(), p.estimation()))
            .filter(|(t, p)| t.is_finite() && p.is_finite())
            .map(|(t, p)| t * p)
            .sum();
        let denom = 1.0 - p_e;
        if denom.abs() > f64::EPSILON {
            (p_o - p_e) / denom
        } else {
            f64::NAN
        }
    }
}

impl<E: Estimator + Default> PerformanceEvaluator for BasicClassificationEvaluator<E> {
    fn reset(&mut self) {
        *self = Self::new(self.num_classes)
    }

    fn add_result(&mut self, example: &dyn Instance, class_votes: Option<Vec<f64>>) {
        let Ok(y) = example.nominal_class_value() else {
            return;
        };
        let Some(votes) = class_votes else {
            return;
        };
        let Some(yhat) = Self::argmax(&votes) else {
            return;
        };
        self.grow_to(votes.len().max(y + 1));

        self.seen += 1;
        self.correct.add(if yhat == y { 1.0 } else { 0.0 });
        for (c, est) in self.true_marginals.iter_mut().enumerate() {
            est.add(if c == y { 1.0 } else { 0.0 });
        }
        for (c, est) in self.predicted_marginals.iter_mut().enumerate() {
            est.add(if c == yhat { 1.0 } else { 0.0 });
        }
    }

    fn performance(&self) -> Vec<Measurement> {
        let kappa = if self.seen == 0 { 0.0 } else { self.kappa() };
        vec![
            Measurement::new("accuracy", self.correct.estimation()),
            Measurement::new("kappa", kappa),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::instance_header::InstanceHeader;
    use crate::core::instances::DenseInstance;
    use crate::evaluation::{BasicEstimator, PerformanceEvaluatorExt};
    use crate::testing::dummies::header_binary;
    use approx::assert_abs_diff_eq;
    use std::sync::Arc;

    type Eval = BasicClassificationEvaluator<BasicEstimator>;

    fn inst(h: &Arc<InstanceHeader>, y: usize) -> DenseInstance {
        DenseInstance::from_indices(Arc::clone(h), &[y]).unwrap()
    }

    fn votes(pred: usize) -> Option<Vec<f64>> {
        if pred == 0 {
            Some(vec![1.0, 0.0])
        } else {
            Some(vec![0.0, 1.0])
        }
    }

    #[test]
    fn empty_evaluator_reports_nan_accuracy_and_zero_kappa() {
        let ev = Eval::new(2);
        assert!(ev.metric("accuracy").unwrap().is_nan());
        assert_eq!(ev.metric("kappa"), Some(0.0));
        assert_eq!(ev.metric("f1"), None);
    }

    #[test]
    fn accuracy_counts_argmax_hits() {
        let h = header_binary();
        let mut ev = Eval::new(2);
        ev.add_result(&inst(&h, 1), votes(1));
        ev.add_result(&inst(&h, 0), votes(1));
        ev.add_result(&inst(&h, 0), Some(vec![3.0, 3.0]));
        ev.add_result(&inst(&h, 1), Some(vec![0.0, 7.0]));
        assert_eq!(ev.seen(), 4);
        assert_abs_diff_eq!(ev.metric("accuracy").unwrap(), 0.75, epsilon = 1e-12);
    }

    #[test]
    fn kappa_one_when_perfect_on_balanced() {
        let h = header_binary();
        let mut ev = Eval::new(2);
        ev.add_result(&inst(&h, 0), votes(0));
        ev.add_result(&inst(&h, 1), votes(1));
        assert_abs_diff_eq!(ev.metric("kappa").unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn kappa_zero_when_accuracy_equals_chance() {
        let h = header_binary();
        let mut ev = Eval::new(2);
        ev.add_result(&inst(&h, 0), votes(1));
        ev.add_result(&inst(&h, 1), votes(1));
        assert_abs_diff_eq!(ev.metric("kappa").unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn kappa_undefined_when_chance_agreement_is_total() {
        let h = header_binary();
        let mut ev = Eval::new(2);
        ev.add_result(&inst(&h, 1), votes(1));
        assert!(ev.metric("kappa").unwrap().is_nan());
    }

    #[test]
    fn unusable_results_are_skipped() {
        let h = header_binary();
        let mut ev = Eval::new(2);
        ev.add_result(&inst(&h, 1), None);
        ev.add_result(&inst(&h, 1), Some(vec![f64::NAN, f64::NAN]));
        let mut missing = inst(&h, 1);
        missing.values[0] = f64::NAN;
        ev.add_result(&missing, votes(1));
        assert_eq!(ev.seen(), 0);
        assert!(ev.metric("accuracy").unwrap().is_nan());
    }

    #[test]
    fn marginals_grow_with_wider_votes() {
        let h = header_binary();
        let mut ev = Eval::new(0);
        ev.add_result(&inst(&h, 1), Some(vec![0.0, 0.0, 5.0]));
        assert_eq!(ev.num_classes(), 3);
        assert_eq!(ev.metric("accuracy"), Some(0.0));
    }

    #[test]
    fn reset_clears_metrics() {
        let h = header_binary();
        let mut ev = Eval::new(2);
        ev.add_result(&inst(&h, 1), votes(1));
        assert_eq!(ev.metric("accuracy"), Some(1.0));

        ev.reset();
        assert_eq!(ev.seen(), 0);
        assert_eq!(ev.num_classes(), 2);
        assert!(ev.metric("accuracy").unwrap().is_nan());
        assert_eq!(ev.metric("kappa"), Some(0.0));
    }
}
