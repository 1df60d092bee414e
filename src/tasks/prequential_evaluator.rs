use crate::classifiers::Classifier;
use crate::error::VfdtError;
use crate::evaluation::{LearningCurve, PerformanceEvaluator, Snapshot};
use crate::streams::Stream;
use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::time::Instant;
use tracing::{debug, info};

/// Interleaved test-then-train run: every instance is first predicted,
/// scored, and only then learned.
pub struct PrequentialEvaluator {
    learner: Box<dyn Classifier>,
    stream: Box<dyn Stream>,
    evaluator: Box<dyn PerformanceEvaluator>,

    curve: LearningCurve,

    max_instances: Option<u64>,
    max_seconds: Option<u64>,
    sample_frequency: u64,

    processed: u64,
    skipped: u64,
    start_time: Instant,

    progress_tx: Option<Sender<Snapshot>>,
}

impl PrequentialEvaluator {
    pub fn new(
        mut learner: Box<dyn Classifier>,
        stream: Box<dyn Stream>,
        evaluator: Box<dyn PerformanceEvaluator>,
        max_instances: Option<u64>,
        max_seconds: Option<u64>,
        sample_frequency: u64,
    ) -> Result<Self, VfdtError> {
        if sample_frequency == 0 {
            return Err(VfdtError::InvalidConfiguration(
                "sample frequency must be > 0".to_string(),
            ));
        }
        learner.set_model_context(Arc::clone(stream.header()));

        Ok(Self {
            learner,
            stream,
            evaluator,
            curve: LearningCurve::default(),
            max_instances,
            max_seconds,
            sample_frequency,
            processed: 0,
            skipped: 0,
            start_time: Instant::now(),
            progress_tx: None,
        })
    }

    /// Sends a copy of every snapshot to `tx` as it is taken.
    pub fn with_progress(mut self, tx: Sender<Snapshot>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    /// Runs until the stream ends or a limit is hit. A final snapshot is
    /// always taken.
    ///
    /// Instances the learner refuses because of missing values are still
    /// scored and counted as skipped; any other training error aborts the run.
    pub fn run(&mut self) -> Result<(), VfdtError> {
        self.start_time = Instant::now();

        while self.stream.has_more_instances() {
            if self.max_instances.is_some_and(|n| self.processed >= n) {
                break;
            }
            if self
                .max_seconds
                .is_some_and(|s| self.start_time.elapsed().as_secs() >= s)
            {
                break;
            }
            let Some(instance) = self.stream.next_instance() else {
                break;
            };
            self.processed += 1;

            let votes = self.learner.get_votes_for_instance(instance.as_ref());
            self.evaluator.add_result(instance.as_ref(), votes);

            match self.learner.train_on_instance(instance.as_ref()) {
                Ok(()) => {}
                Err(VfdtError::MissingValue { .. }) => self.skipped += 1,
                Err(e) => return Err(e),
            }

            if self.processed % self.sample_frequency == 0 {
                self.push_snapshot();
            }
        }

        self.push_snapshot();
        info!(
            processed = self.processed,
            skipped = self.skipped,
            snapshots = self.curve.len(),
            "prequential run finished"
        );
        Ok(())
    }

    pub fn curve(&self) -> &LearningCurve {
        &self.curve
    }

    pub fn processed(&self) -> u64 {
        self.processed
    }

    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    pub fn learner(&self) -> &dyn Classifier {
        &*self.learner
    }

    fn push_snapshot(&mut self) {
        let mut accuracy = f64::NAN;
        let mut kappa = f64::NAN;
        for m in self.evaluator.performance() {
            match m.name.as_str() {
                "accuracy" => accuracy = m.value,
                "kappa" => kappa = m.value,
                _ => {}
            }
        }

        let snapshot = Snapshot {
            instances_seen: self.processed,
            accuracy,
            kappa,
            model_bytes: self.learner.calc_memory_size(),
            seconds: self.start_time.elapsed().as_secs_f64(),
        };
        debug!(%snapshot, "snapshot");

        if let Some(tx) = &self.progress_tx {
            let _ = tx.send(snapshot);
        }
        self.curve.push(snapshot);
    }
}
