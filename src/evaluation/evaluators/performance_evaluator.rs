use crate::core::instances::Instance;
use crate::evaluation::Measurement;
use std::collections::HashMap;

/// Online evaluator of predictive performance.
///
/// Consumes labelled instances together with the class votes a model gave
/// for them, and exposes aggregated metrics via [`performance`].
///
/// [`performance`]: PerformanceEvaluator::performance
pub trait PerformanceEvaluator {
    /// Clears every metric. The number of classes is kept.
    fn reset(&mut self);

    /// Feeds one labelled instance and the votes predicted for it.
    ///
    /// Instances with a missing class, and `None` votes, are skipped.
    fn add_result(&mut self, example: &dyn Instance, class_votes: Option<Vec<f64>>);

    fn performance(&self) -> Vec<Measurement>;
}

pub trait PerformanceEvaluatorExt {
    /// Looks up metrics by name, preserving the requested order.
    fn metrics<'a, I>(&self, names: I) -> Vec<(String, Option<f64>)>
    where
        I: IntoIterator<Item = &'a str>;

    fn metric(&self, name: &str) -> Option<f64> {
        self.metrics([name]).into_iter().next().and_then(|(_, v)| v)
    }
}

impl<T: PerformanceEvaluator + ?Sized> PerformanceEvaluatorExt for T {
    fn metrics<'a, I>(&self, names: I) -> Vec<(String, Option<f64>)>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let map: HashMap<_, _> = self
            .performance()
            .into_iter()
            .map(|m| (m.name, m.value))
            .collect();
        names
            .into_iter()
            .map(|n| (n.to_string(), map.get(n).copied()))
            .collect()
    }
}
