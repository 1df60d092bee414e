use crate::classifiers::hoeffding_tree::nodes::NodeStats;
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use crate::error::VfdtError;

/// Leaf of the tree: accumulates statistics until it is split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LearningNode {
    stats: NodeStats,
}

impl LearningNode {
    pub fn new(header: &InstanceHeader) -> Self {
        Self {
            stats: NodeStats::new(header),
        }
    }

    /// Counts `instance` and returns the number of instances seen so far.
    pub fn learn_from_instance(&mut self, instance: &dyn Instance) -> Result<u64, VfdtError> {
        self.stats.increment(instance)?;
        Ok(self.stats.total())
    }

    pub fn stats(&self) -> &NodeStats {
        &self.stats
    }

    pub fn weight_seen(&self) -> u64 {
        self.stats.total()
    }

    pub fn observed_class_distribution(&self) -> &[u64] {
        self.stats.class_distribution()
    }

    pub fn majority_class(&self) -> usize {
        self.stats.majority_class()
    }

    pub fn calc_byte_size(&self) -> usize {
        self.stats.calc_byte_size()
    }
}
