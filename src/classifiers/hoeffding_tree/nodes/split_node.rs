use crate::classifiers::hoeffding_tree::nodes::Node;
use crate::core::instances::Instance;
use crate::error::VfdtError;
use std::mem::size_of;

/// Internal node routing instances by the value of one nominal attribute,
/// with one owned child per value of its domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitNode {
    split_attribute: usize,
    observed_class_distribution: Vec<u64>,
    children: Vec<Node>,
}

impl SplitNode {
    pub fn new(
        split_attribute: usize,
        observed_class_distribution: Vec<u64>,
        children: Vec<Node>,
    ) -> Self {
        Self {
            split_attribute,
            observed_class_distribution,
            children,
        }
    }

    pub fn split_attribute(&self) -> usize {
        self.split_attribute
    }

    /// Class histogram the node had when it was split. Frozen afterwards.
    pub fn observed_class_distribution(&self) -> &[u64] {
        &self.observed_class_distribution
    }

    pub fn num_children(&self) -> usize {
        self.children.len()
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn child(&self, index: usize) -> Result<&Node, VfdtError> {
        let num_children = self.children.len();
        self.children
            .get(index)
            .ok_or(VfdtError::ChildOutOfRange {
                index,
                num_children,
            })
    }

    pub fn child_mut(&mut self, index: usize) -> Result<&mut Node, VfdtError> {
        let num_children = self.children.len();
        self.children
            .get_mut(index)
            .ok_or(VfdtError::ChildOutOfRange {
                index,
                num_children,
            })
    }

    pub fn branch_for_instance(&self, instance: &dyn Instance) -> Result<usize, VfdtError> {
        let branch = instance.nominal_value_at(self.split_attribute)?;
        if branch >= self.children.len() {
            return Err(VfdtError::ValueOutOfDomain {
                attribute: self.split_attribute,
                value: branch as f64,
                num_values: self.children.len(),
            });
        }
        Ok(branch)
    }

    pub fn calc_byte_size(&self) -> usize {
        size_of::<Self>()
            + self.observed_class_distribution.len() * size_of::<u64>()
            + self.children.capacity() * size_of::<Node>()
    }
}
