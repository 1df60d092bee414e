use crate::classifiers::hoeffding_tree::nodes::node_stats::majority_index;
use crate::classifiers::hoeffding_tree::nodes::{FoundNode, LearningNode, SplitNode};
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use crate::error::VfdtError;

/// A tree node: either a leaf still gathering statistics or an internal
/// node that routes instances to its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf(LearningNode),
    Split(SplitNode),
}

impl Node {
    pub fn new_leaf(header: &InstanceHeader) -> Self {
        Node::Leaf(LearningNode::new(header))
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    pub fn as_leaf(&self) -> Option<&LearningNode> {
        match self {
            Node::Leaf(leaf) => Some(leaf),
            Node::Split(_) => None,
        }
    }

    pub fn as_leaf_mut(&mut self) -> Option<&mut LearningNode> {
        match self {
            Node::Leaf(leaf) => Some(leaf),
            Node::Split(_) => None,
        }
    }

    pub fn as_internal(&self) -> Option<&SplitNode> {
        match self {
            Node::Leaf(_) => None,
            Node::Split(split) => Some(split),
        }
    }

    pub fn split_attribute(&self) -> Option<usize> {
        self.as_internal().map(SplitNode::split_attribute)
    }

    pub fn observed_class_distribution(&self) -> &[u64] {
        match self {
            Node::Leaf(leaf) => leaf.observed_class_distribution(),
            Node::Split(split) => split.observed_class_distribution(),
        }
    }

    /// Majority class of the node's class histogram; lowest index on ties.
    pub fn majority_class(&self) -> usize {
        match self {
            Node::Leaf(leaf) => leaf.majority_class(),
            Node::Split(split) => majority_index(split.observed_class_distribution()),
        }
    }

    /// Counts `instance` at this leaf and returns the leaf's new total.
    pub fn learn_from_instance(&mut self, instance: &dyn Instance) -> Result<u64, VfdtError> {
        match self {
            Node::Leaf(leaf) => leaf.learn_from_instance(instance),
            Node::Split(split) => Err(VfdtError::AlreadySplit {
                attribute: split.split_attribute(),
            }),
        }
    }

    pub fn child(&self, value_index: usize) -> Result<&Node, VfdtError> {
        match self {
            Node::Leaf(_) => Err(VfdtError::NotASplitNode),
            Node::Split(split) => split.child(value_index),
        }
    }

    /// Turns this leaf into an internal node on `attribute`, with one fresh
    /// empty leaf per value of the attribute's domain.
    ///
    /// Statistics are not pushed down: the children start from zero.
    pub fn split(&mut self, attribute: usize, header: &InstanceHeader) -> Result<(), VfdtError> {
        let leaf = match self {
            Node::Leaf(leaf) => leaf,
            Node::Split(split) => {
                return Err(VfdtError::AlreadySplit {
                    attribute: split.split_attribute(),
                });
            }
        };
        if leaf.weight_seen() == 0 {
            return Err(VfdtError::EmptyLeaf);
        }
        if attribute == header.class_index() {
            return Err(VfdtError::InvalidSplitAttribute { attribute });
        }
        let num_values = header
            .attribute_at_index(attribute)
            .map(|a| a.num_values())
            .ok_or(VfdtError::InvalidSplitAttribute { attribute })?;

        let children = (0..num_values).map(|_| Node::new_leaf(header)).collect();
        let class_distribution = leaf.observed_class_distribution().to_vec();
        *self = Node::Split(SplitNode::new(attribute, class_distribution, children));
        Ok(())
    }

    /// Follows the instance's attribute values down to the leaf it belongs to.
    pub fn filter_instance_to_leaf(
        &self,
        instance: &dyn Instance,
    ) -> Result<&LearningNode, VfdtError> {
        let mut node = self;
        loop {
            match node {
                Node::Leaf(leaf) => return Ok(leaf),
                Node::Split(split) => {
                    let branch = split.branch_for_instance(instance)?;
                    node = split.child(branch)?;
                }
            }
        }
    }

    pub fn filter_instance_to_leaf_mut(
        &mut self,
        instance: &dyn Instance,
    ) -> Result<&mut Node, VfdtError> {
        match self {
            Node::Leaf(_) => Ok(self),
            Node::Split(split) => {
                let branch = split.branch_for_instance(instance)?;
                split.child_mut(branch)?.filter_instance_to_leaf_mut(instance)
            }
        }
    }

    /// Appends every leaf below this node, in depth-first value order.
    pub fn collect_learning_nodes<'a>(
        &'a self,
        parent: Option<&'a SplitNode>,
        parent_branch: Option<usize>,
        depth: usize,
        found: &mut Vec<FoundNode<'a>>,
    ) {
        match self {
            Node::Leaf(leaf) => found.push(FoundNode::new(leaf, parent, parent_branch, depth)),
            Node::Split(split) => {
                for (branch, child) in split.children().iter().enumerate() {
                    child.collect_learning_nodes(Some(split), Some(branch), depth + 1, found);
                }
            }
        }
    }

    /// Longest root-to-leaf path length, counted in edges.
    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf(_) => 0,
            Node::Split(split) => 1 + split.children().iter().map(Node::depth).max().unwrap_or(0),
        }
    }

    pub fn count_nodes(&self) -> (usize, usize) {
        match self {
            Node::Leaf(_) => (0, 1),
            Node::Split(split) => split
                .children()
                .iter()
                .map(Node::count_nodes)
                .fold((1, 0), |(d, l), (cd, cl)| (d + cd, l + cl)),
        }
    }

    pub fn calc_byte_size(&self) -> usize {
        match self {
            Node::Leaf(leaf) => leaf.calc_byte_size(),
            Node::Split(split) => split.calc_byte_size(),
        }
    }

    pub fn calc_byte_size_including_subtree(&self) -> usize {
        match self {
            Node::Leaf(leaf) => leaf.calc_byte_size(),
            Node::Split(split) => {
                split.calc_byte_size()
                    + split
                        .children()
                        .iter()
                        .map(Node::calc_byte_size_including_subtree)
                        .sum::<usize>()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::instances::DenseInstance;
    use crate::testing::dummies::header_abc;
    use std::sync::Arc;

    fn trained_leaf(header: &Arc<InstanceHeader>, rows: &[[usize; 3]]) -> Node {
        let mut node = Node::new_leaf(header);
        for row in rows {
            let inst = DenseInstance::from_indices(Arc::clone(header), row).unwrap();
            node.as_leaf_mut().unwrap().learn_from_instance(&inst).unwrap();
        }
        node
    }

    #[test]
    fn fresh_leaf_reports_leaf_variant() {
        let header = header_abc();
        let node = Node::new_leaf(&header);
        assert!(node.is_leaf());
        assert!(node.as_internal().is_none());
        assert_eq!(node.split_attribute(), None);
        assert!(matches!(node.child(0), Err(VfdtError::NotASplitNode)));
    }

    #[test]
    fn split_creates_one_empty_leaf_per_value() {
        let header = header_abc();
        let mut node = trained_leaf(&header, &[[0, 1, 1], [2, 0, 1], [1, 1, 0]]);
        node.split(0, &header).unwrap();

        assert!(!node.is_leaf());
        assert_eq!(node.split_attribute(), Some(0));
        let split = node.as_internal().unwrap();
        assert_eq!(split.num_children(), 3);
        assert_eq!(split.observed_class_distribution(), &[1, 2]);
        assert_eq!(node.majority_class(), 1);
        for v in 0..3 {
            let child = node.child(v).unwrap();
            assert!(child.is_leaf());
            assert_eq!(child.as_leaf().unwrap().weight_seen(), 0);
        }
        assert!(node.child(3).is_err());
    }

    #[test]
    fn split_preconditions_are_enforced() {
        let header = header_abc();
        let mut empty = Node::new_leaf(&header);
        assert!(matches!(empty.split(0, &header), Err(VfdtError::EmptyLeaf)));

        let mut node = trained_leaf(&header, &[[0, 1, 1]]);
        assert!(matches!(
            node.split(2, &header),
            Err(VfdtError::InvalidSplitAttribute { attribute: 2 })
        ));
        assert!(matches!(
            node.split(9, &header),
            Err(VfdtError::InvalidSplitAttribute { attribute: 9 })
        ));
        assert!(node.is_leaf());

        node.split(1, &header).unwrap();
        assert!(matches!(
            node.split(0, &header),
            Err(VfdtError::AlreadySplit { attribute: 1 })
        ));
        assert_eq!(node.split_attribute(), Some(1));
    }

    #[test]
    fn instances_are_routed_by_split_values() {
        let header = header_abc();
        let mut root = trained_leaf(&header, &[[0, 0, 0], [1, 1, 1]]);
        root.split(0, &header).unwrap();

        let inst = DenseInstance::from_indices(Arc::clone(&header), &[1, 0, 1]).unwrap();
        let leaf = root.filter_instance_to_leaf_mut(&inst).unwrap();
        leaf.as_leaf_mut().unwrap().learn_from_instance(&inst).unwrap();
        leaf.split(1, &header).unwrap();

        let found = root.filter_instance_to_leaf(&inst).unwrap();
        assert_eq!(found.weight_seen(), 0);
        assert_eq!(root.depth(), 2);
        assert_eq!(root.count_nodes(), (2, 4));
        assert_eq!(
            root.child(1).unwrap().child(0).unwrap().as_leaf().unwrap().weight_seen(),
            0
        );
        assert_eq!(root.child(1).unwrap().observed_class_distribution(), &[0, 1]);
    }

    #[test]
    fn learning_on_a_split_node_is_rejected() {
        let header = header_abc();
        let mut root = trained_leaf(&header, &[[0, 0, 0]]);
        let inst = DenseInstance::from_indices(Arc::clone(&header), &[2, 1, 1]).unwrap();
        assert_eq!(root.learn_from_instance(&inst).unwrap(), 2);
        root.split(1, &header).unwrap();
        assert!(matches!(
            root.learn_from_instance(&inst),
            Err(VfdtError::AlreadySplit { attribute: 1 })
        ));
    }

    #[test]
    fn collects_leaves_with_parents() {
        let header = header_abc();
        let mut root = trained_leaf(&header, &[[0, 0, 0]]);
        let mut found = Vec::new();
        root.collect_learning_nodes(None, None, 0, &mut found);
        assert_eq!(found.len(), 1);
        assert!(found[0].get_parent().is_none());

        root.split(0, &header).unwrap();
        let mut found = Vec::new();
        root.collect_learning_nodes(None, None, 0, &mut found);
        assert_eq!(found.len(), 3);
        for (branch, leaf) in found.iter().enumerate() {
            assert_eq!(leaf.get_parent_branch(), Some(branch));
            assert_eq!(leaf.get_depth(), 1);
            assert_eq!(leaf.get_parent().unwrap().split_attribute(), 0);
        }
    }

    #[test]
    fn subtree_size_grows_with_splits() {
        let header = header_abc();
        let mut root = trained_leaf(&header, &[[0, 0, 0]]);
        let before = root.calc_byte_size_including_subtree();
        root.split(0, &header).unwrap();
        assert!(root.calc_byte_size_including_subtree() > before);
        assert!(root.calc_byte_size_including_subtree() > root.calc_byte_size());
    }
}
