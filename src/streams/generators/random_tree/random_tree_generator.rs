use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::instance_header::InstanceHeader;
use crate::core::instances::{DenseInstance, Instance};
use crate::error::VfdtError;
use crate::streams::Stream;
use crate::streams::generators::random_tree::concept::{ConceptNode, ConceptShape};

/// Shape of the hidden concept and of the produced schema.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomTreeParams {
    pub num_classes: usize,
    pub num_nominals: usize,
    pub num_vals_per_nominal: usize,
    pub max_tree_depth: usize,
    /// Shallowest level at which a branch may stop early.
    pub first_leaf_level: usize,
    /// Chance of stopping early once `first_leaf_level` is reached.
    pub leaf_fraction: f64,
    pub tree_seed: u64,
    pub instance_seed: u64,
    pub max_instances: Option<usize>,
}

impl Default for RandomTreeParams {
    fn default() -> Self {
        Self {
            num_classes: 2,
            num_nominals: 5,
            num_vals_per_nominal: 5,
            max_tree_depth: 5,
            first_leaf_level: 3,
            leaf_fraction: 0.15,
            tree_seed: 1,
            instance_seed: 1,
            max_instances: None,
        }
    }
}

impl RandomTreeParams {
    fn validate(&self) -> Result<(), VfdtError> {
        if self.num_classes < 1 {
            return Err(VfdtError::InvalidConfiguration(
                "number of classes must be at least 1".to_string(),
            ));
        }
        if self.num_nominals < 1 || self.num_vals_per_nominal < 1 {
            return Err(VfdtError::InvalidConfiguration(
                "need at least one nominal attribute with at least one value".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.leaf_fraction) {
            return Err(VfdtError::InvalidConfiguration(format!(
                "leaf fraction must be in [0, 1], got {}",
                self.leaf_fraction
            )));
        }
        Ok(())
    }
}

/// Stream of nominal instances labelled by a randomly grown decision tree.
///
/// Attribute values are drawn uniformly; the class is whatever the hidden
/// tree predicts, so a tree learner can in principle reach zero error.
#[derive(Debug)]
pub struct RandomTreeGenerator {
    params: RandomTreeParams,
    rng: StdRng,
    concept: ConceptNode,
    header: Arc<InstanceHeader>,
    produced: usize,
}

impl RandomTreeGenerator {
    pub fn new(params: RandomTreeParams) -> Result<Self, VfdtError> {
        params.validate()?;

        let value_labels: Vec<String> = (0..params.num_vals_per_nominal)
            .map(|v| format!("value{}", v + 1))
            .collect();
        let value_refs: Vec<&str> = value_labels.iter().map(String::as_str).collect();
        let class_labels: Vec<String> = (0..params.num_classes)
            .map(|c| format!("class{}", c + 1))
            .collect();
        let class_refs: Vec<&str> = class_labels.iter().map(String::as_str).collect();

        let names: Vec<String> = (0..params.num_nominals)
            .map(|i| format!("nominal{}", i + 1))
            .collect();
        let mut attributes: Vec<(&str, &[&str])> = names
            .iter()
            .map(|name| (name.as_str(), value_refs.as_slice()))
            .collect();
        attributes.push(("class", class_refs.as_slice()));
        let header = InstanceHeader::nominal("randomTree", &attributes, params.num_nominals)?;

        let shape = ConceptShape {
            num_classes: params.num_classes,
            num_values: params.num_vals_per_nominal,
            max_depth: params.max_tree_depth,
            first_leaf_level: params.first_leaf_level,
            leaf_fraction: params.leaf_fraction,
        };
        let mut tree_rng = StdRng::seed_from_u64(params.tree_seed);
        let mut available: Vec<usize> = (0..params.num_nominals).collect();
        let concept = ConceptNode::grow(&mut tree_rng, &shape, &mut available, 0);
        debug!(depth = concept.depth(), "grew random concept tree");

        Ok(Self {
            rng: StdRng::seed_from_u64(params.instance_seed),
            params,
            concept,
            header,
            produced: 0,
        })
    }

    pub fn params(&self) -> &RandomTreeParams {
        &self.params
    }

    /// Depth of the hidden labelling tree.
    pub fn concept_depth(&self) -> usize {
        self.concept.depth()
    }
}

impl Stream for RandomTreeGenerator {
    fn header(&self) -> &Arc<InstanceHeader> {
        &self.header
    }

    fn has_more_instances(&self) -> bool {
        self.params
            .max_instances
            .is_none_or(|max| self.produced < max)
    }

    fn next_instance(&mut self) -> Option<Box<dyn Instance>> {
        if !self.has_more_instances() {
            return None;
        }
        let mut indices: Vec<usize> = (0..self.params.num_nominals)
            .map(|_| self.rng.random_range(0..self.params.num_vals_per_nominal))
            .collect();
        indices.push(self.concept.classify(&indices));

        let values = indices.into_iter().map(|v| v as f64).collect();
        self.produced += 1;
        Some(Box::new(DenseInstance::new(Arc::clone(&self.header), values)))
    }

    fn restart(&mut self) -> Result<(), VfdtError> {
        self.rng = StdRng::seed_from_u64(self.params.instance_seed);
        self.produced = 0;
        Ok(())
    }
}
