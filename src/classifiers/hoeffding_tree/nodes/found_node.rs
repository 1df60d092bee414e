use crate::classifiers::hoeffding_tree::nodes::{LearningNode, SplitNode};

/// A leaf located by a tree walk, with the split node that owns it and the
/// branch it hangs from. The root leaf has no parent.
#[derive(Debug, Clone, Copy)]
pub struct FoundNode<'a> {
    node: &'a LearningNode,
    parent: Option<&'a SplitNode>,
    parent_branch: Option<usize>,
    depth: usize,
}

impl<'a> FoundNode<'a> {
    pub fn new(
        node: &'a LearningNode,
        parent: Option<&'a SplitNode>,
        parent_branch: Option<usize>,
        depth: usize,
    ) -> Self {
        Self {
            node,
            parent,
            parent_branch,
            depth,
        }
    }

    pub fn get_node(&self) -> &'a LearningNode {
        self.node
    }

    pub fn get_parent(&self) -> Option<&'a SplitNode> {
        self.parent
    }

    pub fn get_parent_branch(&self) -> Option<usize> {
        self.parent_branch
    }

    pub fn get_depth(&self) -> usize {
        self.depth
    }
}
