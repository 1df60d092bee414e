use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use crate::error::VfdtError;
use std::sync::Arc;

/// Incremental classifier fed one instance at a time.
pub trait Classifier {
    /// One score per class, or `None` when no prediction can be made for
    /// this instance.
    fn get_votes_for_instance(&self, instance: &dyn Instance) -> Option<Vec<f64>>;

    fn set_model_context(&mut self, header: Arc<InstanceHeader>);

    fn train_on_instance(&mut self, instance: &dyn Instance) -> Result<(), VfdtError>;

    /// Estimated heap and inline footprint of the model, in bytes.
    fn calc_memory_size(&self) -> usize;
}
