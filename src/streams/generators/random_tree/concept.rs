use rand::Rng;
use rand::rngs::StdRng;

/// Hidden labelling tree of the generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ConceptNode {
    Leaf { class: usize },
    Branch { attribute: usize, children: Vec<ConceptNode> },
}

pub(crate) struct ConceptShape {
    pub num_classes: usize,
    pub num_values: usize,
    pub max_depth: usize,
    pub first_leaf_level: usize,
    pub leaf_fraction: f64,
}

impl ConceptNode {
    /// Grows a random tree. `available` holds the attributes not yet
    /// tested on the current path.
    pub(crate) fn grow(
        rng: &mut StdRng,
        shape: &ConceptShape,
        available: &mut Vec<usize>,
        depth: usize,
    ) -> ConceptNode {
        let stop_early =
            depth >= shape.first_leaf_level && rng.random::<f64>() < shape.leaf_fraction;
        if available.is_empty() || depth >= shape.max_depth || stop_early {
            return ConceptNode::Leaf {
                class: rng.random_range(0..shape.num_classes),
            };
        }

        let pick = rng.random_range(0..available.len());
        let attribute = available.swap_remove(pick);
        let children = (0..shape.num_values)
            .map(|_| ConceptNode::grow(rng, shape, available, depth + 1))
            .collect();
        available.push(attribute);
        ConceptNode::Branch {
            attribute,
            children,
        }
    }

    pub(crate) fn classify(&self, values: &[usize]) -> usize {
        let mut node = self;
        loop {
            match node {
                ConceptNode::Leaf { class } => return *class,
                ConceptNode::Branch {
                    attribute,
                    children,
                } => node = &children[values[*attribute]],
            }
        }
    }

    pub(crate) fn depth(&self) -> usize {
        match self {
            ConceptNode::Leaf { .. } => 0,
            ConceptNode::Branch { children, .. } => {
                1 + children.iter().map(ConceptNode::depth).max().unwrap_or(0)
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn attributes_on_paths(&self, path: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
        match self {
            ConceptNode::Leaf { .. } => out.push(path.clone()),
            ConceptNode::Branch {
                attribute,
                children,
            } => {
                path.push(*attribute);
                for child in children {
                    child.attributes_on_paths(path, out);
                }
                path.pop();
            }
        }
    }
}
