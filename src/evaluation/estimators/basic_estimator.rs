use crate::evaluation::estimators::Estimator;

/// Running mean over every observation since creation. `NaN` inputs are
/// ignored.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct BasicEstimator {
    count: u64,
    sum: f64,
}

impl Estimator for BasicEstimator {
    #[inline]
    fn add(&mut self, v: f64) {
        if v.is_nan() {
            return;
        }
        self.count += 1;
        self.sum += v;
    }

    #[inline]
    fn estimation(&self) -> f64 {
        if self.count > 0 {
            self.sum / self.count as f64
        } else {
            f64::NAN
        }
    }

    fn count(&self) -> u64 {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn empty_estimate_is_nan() {
        let est = BasicEstimator::default();
        assert!(est.estimation().is_nan());
        assert_eq!(est.count(), 0);
    }

    #[test]
    fn mean_skips_nan() {
        let mut est = BasicEstimator::default();
        for v in [1.0, 0.0, f64::NAN, 1.0, 1.0] {
            est.add(v);
        }
        assert_eq!(est.count(), 4);
        assert_relative_eq!(est.estimation(), 0.75);
    }
}
