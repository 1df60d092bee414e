use crate::core::attributes::{AttributeRef, NominalAttribute};
use crate::error::VfdtError;
use std::sync::Arc;

/// Schema shared by every instance of a stream: relation name, the ordered
/// nominal attributes and which of them is the class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceHeader {
    pub relation_name: String,
    attributes: Vec<AttributeRef>,
    class_index: usize,
}

impl InstanceHeader {
    /// The class index must name one of the attributes.
    pub fn try_new(
        relation_name: String,
        attributes: Vec<AttributeRef>,
        class_index: usize,
    ) -> Result<InstanceHeader, VfdtError> {
        if class_index >= attributes.len() {
            return Err(VfdtError::IndexOutOfBounds {
                index: class_index,
                len: attributes.len(),
            });
        }
        Ok(InstanceHeader {
            relation_name,
            attributes,
            class_index,
        })
    }

    /// Builds a header from `(name, labels)` pairs.
    pub fn nominal(
        relation_name: &str,
        attributes: &[(&str, &[&str])],
        class_index: usize,
    ) -> Result<Arc<InstanceHeader>, VfdtError> {
        let attributes = attributes
            .iter()
            .map(|(name, labels)| Arc::new(NominalAttribute::new(*name, labels.iter().copied())))
            .collect();
        Self::try_new(relation_name.to_string(), attributes, class_index).map(Arc::new)
    }

    pub fn class_attribute(&self) -> &NominalAttribute {
        self.attributes[self.class_index].as_ref()
    }

    pub fn attributes(&self) -> &[AttributeRef] {
        &self.attributes
    }

    pub fn number_of_attributes(&self) -> usize {
        self.attributes.len()
    }

    pub fn relation_name(&self) -> &str {
        &self.relation_name
    }

    pub fn attribute_at_index(&self, index: usize) -> Option<&NominalAttribute> {
        self.attributes.get(index).map(|a| a.as_ref())
    }

    pub fn index_of_attribute(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|attr| attr.name() == name)
    }

    pub fn class_index(&self) -> usize {
        self.class_index
    }

    pub fn number_of_classes(&self) -> usize {
        self.class_attribute().num_values()
    }

    /// Indices of every attribute except the class, ascending.
    pub fn candidate_attributes(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.attributes.len()).filter(move |&i| i != self.class_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nominal_header_exposes_schema() {
        let header = InstanceHeader::nominal(
            "weather",
            &[
                ("outlook", &["sunny", "overcast", "rainy"]),
                ("windy", &["false", "true"]),
                ("play", &["no", "yes"]),
            ],
            2,
        )
        .unwrap();

        assert_eq!(header.relation_name(), "weather");
        assert_eq!(header.number_of_attributes(), 3);
        assert_eq!(header.class_index(), 2);
        assert_eq!(header.number_of_classes(), 2);
        assert_eq!(header.class_attribute().name(), "play");
        assert_eq!(header.index_of_attribute("windy"), Some(1));
        assert_eq!(header.index_of_attribute("humidity"), None);
        assert_eq!(header.candidate_attributes().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn class_index_must_be_in_range() {
        let err = InstanceHeader::nominal("r", &[("a", &["x"])], 1).unwrap_err();
        assert!(matches!(
            err,
            VfdtError::IndexOutOfBounds { index: 1, len: 1 }
        ));

        let attributes = vec![Arc::new(NominalAttribute::new("a", ["x", "y"]))];
        let err = InstanceHeader::try_new("r".to_string(), attributes, 3).unwrap_err();
        assert!(matches!(
            err,
            VfdtError::IndexOutOfBounds { index: 3, len: 1 }
        ));
    }

    #[test]
    fn candidate_attributes_skip_class_in_the_middle() {
        let header = InstanceHeader::nominal(
            "r",
            &[("a", &["x", "y"]), ("c", &["p", "q"]), ("b", &["x", "y"])],
            1,
        )
        .unwrap();
        assert_eq!(header.candidate_attributes().collect::<Vec<_>>(), vec![0, 2]);
    }
}
