use crate::classifiers::Classifier;
use crate::classifiers::hoeffding_tree::nodes::{FoundNode, Node};
use crate::classifiers::hoeffding_tree::{HoeffdingTreeConfig, SplitEvaluator};
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use crate::error::VfdtError;
use crate::streams::Stream;
use std::mem::size_of;
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

/// Very Fast Decision Tree over nominal attributes.
///
/// Each training instance is routed to one leaf, counted there and
/// dropped. Every `grace_period` instances a leaf checks whether the
/// Hoeffding bound lets it commit to the best attribute, and if so is
/// replaced by a split node with one empty leaf per attribute value.
/// Memory depends on the number of nodes only, never on how many instances
/// were seen.
#[derive(Debug, Clone)]
pub struct HoeffdingTree {
    config: HoeffdingTreeConfig,
    split_evaluator: SplitEvaluator,
    header: Option<Arc<InstanceHeader>>,
    tree_root: Option<Node>,
    decision_node_count: usize,
    active_leaf_node_count: usize,
    instances_seen: u64,
    instances_skipped: u64,
}

impl HoeffdingTree {
    pub fn new(config: HoeffdingTreeConfig) -> Result<Self, VfdtError> {
        config.validate()?;
        Ok(Self {
            split_evaluator: SplitEvaluator::new(&config),
            config,
            header: None,
            tree_root: None,
            decision_node_count: 0,
            active_leaf_node_count: 0,
            instances_seen: 0,
            instances_skipped: 0,
        })
    }

    /// Builds a tree in one pass over `stream`.
    pub fn train(config: HoeffdingTreeConfig, stream: &mut dyn Stream) -> Result<Self, VfdtError> {
        let mut tree = Self::new(config)?;
        tree.set_model_context(Arc::clone(stream.header()));
        tree.train_on_stream(stream)?;
        Ok(tree)
    }

    /// Feeds every remaining instance of `stream` to the tree.
    ///
    /// Instances with missing values are skipped. Any other error stops the
    /// pass; instances consumed before it stay learned.
    pub fn train_on_stream(&mut self, stream: &mut dyn Stream) -> Result<(), VfdtError> {
        while stream.has_more_instances() {
            let Some(instance) = stream.next_instance() else {
                break;
            };
            match self.train_on_instance(instance.as_ref()) {
                Ok(()) | Err(VfdtError::MissingValue { .. }) => {}
                Err(e) => return Err(e),
            }
        }
        info!(
            seen = self.instances_seen,
            skipped = self.instances_skipped,
            decision_nodes = self.decision_node_count,
            leaves = self.active_leaf_node_count,
            "finished training pass"
        );
        Ok(())
    }

    /// Majority class of the leaf the instance falls into.
    pub fn classify(&self, instance: &dyn Instance) -> Result<usize, VfdtError> {
        Ok(self.leaf_for_instance(instance)?.majority_class())
    }

    fn leaf_for_instance(&self, instance: &dyn Instance) -> Result<&Node, VfdtError> {
        if let Some(attribute) = instance.first_missing_index() {
            return Err(VfdtError::MissingValue { attribute });
        }
        let (Some(header), Some(root)) = (&self.header, &self.tree_root) else {
            return Err(VfdtError::ModelNotTrained);
        };
        Self::check_schema(header, instance)?;
        for attribute in 0..header.number_of_attributes() {
            instance.nominal_value_at(attribute)?;
        }

        let mut node = root;
        while let Node::Split(split) = node {
            node = split.child(split.branch_for_instance(instance)?)?;
        }
        Ok(node)
    }

    fn check_schema(
        header: &Arc<InstanceHeader>,
        instance: &dyn Instance,
    ) -> Result<(), VfdtError> {
        let other = instance.header();
        if Arc::ptr_eq(header, other) || **header == **other {
            return Ok(());
        }
        Err(VfdtError::SchemaMismatch(format!(
            "model was built on relation '{}', instance belongs to '{}'",
            header.relation_name(),
            other.relation_name()
        )))
    }

    /// Header of the model, captured from the first accepted instance when
    /// none was set explicitly.
    fn model_header(&mut self, instance: &dyn Instance) -> Result<Arc<InstanceHeader>, VfdtError> {
        match &self.header {
            Some(header) => {
                Self::check_schema(header, instance)?;
                Ok(Arc::clone(header))
            }
            None => {
                let header = Arc::clone(instance.header());
                self.header = Some(Arc::clone(&header));
                Ok(header)
            }
        }
    }

    pub fn root(&self) -> Option<&Node> {
        self.tree_root.as_ref()
    }

    pub fn header(&self) -> Option<&Arc<InstanceHeader>> {
        self.header.as_ref()
    }

    pub fn config(&self) -> &HoeffdingTreeConfig {
        &self.config
    }

    pub fn decision_node_count(&self) -> usize {
        self.decision_node_count
    }

    pub fn leaf_node_count(&self) -> usize {
        self.active_leaf_node_count
    }

    /// Depth of the deepest leaf, 0 for a single leaf or an empty tree.
    pub fn tree_depth(&self) -> usize {
        self.tree_root.as_ref().map_or(0, Node::depth)
    }

    pub fn instances_seen(&self) -> u64 {
        self.instances_seen
    }

    pub fn instances_skipped(&self) -> u64 {
        self.instances_skipped
    }

    pub fn find_learning_nodes(&self) -> Vec<FoundNode<'_>> {
        let mut found = Vec::new();
        if let Some(root) = &self.tree_root {
            root.collect_learning_nodes(None, None, 0, &mut found);
        }
        found
    }

    fn reset(&mut self) {
        self.tree_root = None;
        self.decision_node_count = 0;
        self.active_leaf_node_count = 0;
        self.instances_seen = 0;
        self.instances_skipped = 0;
    }
}

impl Default for HoeffdingTree {
    fn default() -> Self {
        let config = HoeffdingTreeConfig::default();
        Self {
            split_evaluator: SplitEvaluator::new(&config),
            config,
            header: None,
            tree_root: None,
            decision_node_count: 0,
            active_leaf_node_count: 0,
            instances_seen: 0,
            instances_skipped: 0,
        }
    }
}

impl Classifier for HoeffdingTree {
    fn get_votes_for_instance(&self, instance: &dyn Instance) -> Option<Vec<f64>> {
        let leaf = self.leaf_for_instance(instance).ok()?;
        Some(
            leaf.observed_class_distribution()
                .iter()
                .map(|&count| count as f64)
                .collect(),
        )
    }

    /// Fixes the schema. A different schema discards the current tree.
    fn set_model_context(&mut self, header: Arc<InstanceHeader>) {
        if let Some(current) = &self.header {
            if Arc::ptr_eq(current, &header) || **current == *header {
                return;
            }
            debug!(relation = header.relation_name(), "schema changed, resetting tree");
            self.reset();
        }
        self.header = Some(header);
    }

    fn train_on_instance(&mut self, instance: &dyn Instance) -> Result<(), VfdtError> {
        if let Some(attribute) = instance.first_missing_index() {
            self.instances_skipped += 1;
            warn!(attribute, "skipping training instance with a missing value");
            return Err(VfdtError::MissingValue { attribute });
        }
        let header = self.model_header(instance)?;
        for attribute in 0..header.number_of_attributes() {
            instance.nominal_value_at(attribute)?;
        }

        if self.tree_root.is_none() {
            self.active_leaf_node_count = 1;
        }
        let root = self
            .tree_root
            .get_or_insert_with(|| Node::new_leaf(&header));
        let node = root.filter_instance_to_leaf_mut(instance)?;
        let seen = node.learn_from_instance(instance)?;
        self.instances_seen += 1;

        if seen % self.config.grace_period != 0 {
            return Ok(());
        }
        let Some(decision) = node
            .as_leaf()
            .and_then(|leaf| self.split_evaluator.evaluate(leaf.stats()))
        else {
            return Ok(());
        };

        if !decision.should_split() {
            trace!(
                n = seen,
                best = decision.best_attribute,
                epsilon = decision.hoeffding_bound,
                pre_pruned = decision.pre_pruned,
                "leaf kept"
            );
            return Ok(());
        }
        node.split(decision.best_attribute, &header)?;
        let children = node.as_internal().map_or(0, |split| split.num_children());
        self.decision_node_count += 1;
        self.active_leaf_node_count = self.active_leaf_node_count - 1 + children;
        debug!(
            attribute = decision.best_attribute,
            n = seen,
            epsilon = decision.hoeffding_bound,
            best = decision.best_impurity,
            second = decision.second_best_impurity,
            tie = decision.tie && !decision.confident,
            "leaf split"
        );
        Ok(())
    }

    fn calc_memory_size(&self) -> usize {
        size_of::<Self>()
            + self
                .tree_root
                .as_ref()
                .map_or(0, Node::calc_byte_size_including_subtree)
    }
}
