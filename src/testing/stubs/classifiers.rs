use crate::classifiers::Classifier;
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use crate::error::VfdtError;
use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

/// Votes for the true class of every instance it is asked about.
#[derive(Default)]
pub struct OracleClassifier {
    num_classes: usize,
}

impl Classifier for OracleClassifier {
    fn get_votes_for_instance(&self, instance: &dyn Instance) -> Option<Vec<f64>> {
        let y = instance.nominal_class_value().ok()?;
        let mut votes = vec![0.0; self.num_classes.max(y + 1)];
        votes[y] = 1.0;
        Some(votes)
    }

    fn set_model_context(&mut self, header: Arc<InstanceHeader>) {
        self.num_classes = header.number_of_classes();
    }

    fn train_on_instance(&mut self, _instance: &dyn Instance) -> Result<(), VfdtError> {
        Ok(())
    }

    fn calc_memory_size(&self) -> usize {
        size_of::<Self>()
    }
}

/// Never predicts anything.
#[derive(Default)]
pub struct ClassifierNoneVotes;

impl Classifier for ClassifierNoneVotes {
    fn get_votes_for_instance(&self, _instance: &dyn Instance) -> Option<Vec<f64>> {
        None
    }

    fn set_model_context(&mut self, _header: Arc<InstanceHeader>) {}

    fn train_on_instance(&mut self, _instance: &dyn Instance) -> Result<(), VfdtError> {
        Ok(())
    }

    fn calc_memory_size(&self) -> usize {
        0
    }
}

#[derive(Clone, Default)]
pub struct TrainSpyHandle(Rc<Cell<usize>>);

impl TrainSpyHandle {
    pub fn count(&self) -> usize {
        self.0.get()
    }
}

/// Counts `train_on_instance` calls; the count is read through the
/// returned handle.
pub struct TrainSpyClassifier {
    calls: TrainSpyHandle,
}

impl TrainSpyClassifier {
    pub fn new() -> (Self, TrainSpyHandle) {
        let handle = TrainSpyHandle::default();
        (
            Self {
                calls: handle.clone(),
            },
            handle,
        )
    }
}

impl Classifier for TrainSpyClassifier {
    fn get_votes_for_instance(&self, _instance: &dyn Instance) -> Option<Vec<f64>> {
        Some(vec![1.0, 0.0])
    }

    fn set_model_context(&mut self, _header: Arc<InstanceHeader>) {}

    fn train_on_instance(&mut self, _instance: &dyn Instance) -> Result<(), VfdtError> {
        self.calls.0.set(self.calls.0.get() + 1);
        Ok(())
    }

    fn calc_memory_size(&self) -> usize {
        self.calls.count() * 8
    }
}
