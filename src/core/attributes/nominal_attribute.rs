use std::collections::HashMap;
use std::sync::Arc;

pub type AttributeRef = Arc<NominalAttribute>;

/// An attribute with a finite, ordered domain of labels.
///
/// Instances refer to a label by its position in [`values`](Self::values),
/// so the order is part of the schema and never changes once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NominalAttribute {
    pub name: String,
    pub values: Vec<String>,
    pub label_to_index: HashMap<String, usize>,
}

impl NominalAttribute {
    pub fn new<N, I, S>(name: N, values: I) -> NominalAttribute
    where
        N: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        let label_to_index = values
            .iter()
            .enumerate()
            .map(|(i, v)| (v.clone(), i))
            .collect();
        NominalAttribute {
            name: name.into(),
            values,
            label_to_index,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn num_values(&self) -> usize {
        self.values.len()
    }

    pub fn value(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }

    pub fn index_of_value(&self, label: &str) -> Option<usize> {
        self.label_to_index.get(label).copied()
    }

    pub fn enumerate_values(&self) -> impl Iterator<Item = (usize, &String)> {
        self.values.iter().enumerate()
    }
}
