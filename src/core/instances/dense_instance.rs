use crate::core::attributes::NominalAttribute;
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::instance::Instance;
use crate::error::VfdtError;
use std::sync::Arc;

/// Label used for a missing value, as in ARFF data sections.
pub const MISSING_LABEL: &str = "?";

#[derive(Debug, Clone, PartialEq)]
pub struct DenseInstance {
    pub header: Arc<InstanceHeader>,
    pub values: Vec<f64>,
}

impl DenseInstance {
    pub fn new(header: Arc<InstanceHeader>, values: Vec<f64>) -> DenseInstance {
        DenseInstance { header, values }
    }

    /// Builds an instance from value indices, one per attribute.
    pub fn from_indices(
        header: Arc<InstanceHeader>,
        indices: &[usize],
    ) -> Result<DenseInstance, VfdtError> {
        let len = header.number_of_attributes();
        if indices.len() != len {
            return Err(VfdtError::SchemaMismatch(format!(
                "expected {len} values, got {}",
                indices.len()
            )));
        }
        let values = indices.iter().map(|&i| i as f64).collect();
        Ok(DenseInstance::new(header, values))
    }

    /// Builds an instance from labels, one per attribute. `?` marks a
    /// missing value.
    pub fn from_labels(
        header: Arc<InstanceHeader>,
        labels: &[&str],
    ) -> Result<DenseInstance, VfdtError> {
        let len = header.number_of_attributes();
        if labels.len() != len {
            return Err(VfdtError::SchemaMismatch(format!(
                "expected {len} labels, got {}",
                labels.len()
            )));
        }
        let mut values = Vec::with_capacity(len);
        for (index, (label, attribute)) in labels.iter().zip(header.attributes()).enumerate() {
            if *label == MISSING_LABEL {
                values.push(f64::NAN);
                continue;
            }
            let value = attribute.index_of_value(label).ok_or_else(|| {
                VfdtError::SchemaMismatch(format!(
                    "label '{label}' is not a value of attribute {index} ('{}')",
                    attribute.name()
                ))
            })?;
            values.push(value as f64);
        }
        Ok(DenseInstance::new(header, values))
    }
}

impl Instance for DenseInstance {
    fn value_at_index(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    fn set_value_at_index(&mut self, index: usize, new_value: f64) -> Result<(), VfdtError> {
        let len = self.values.len();
        match self.values.get_mut(index) {
            Some(slot) => {
                *slot = new_value;
                Ok(())
            }
            None => Err(VfdtError::IndexOutOfBounds { index, len }),
        }
    }

    fn is_missing_at_index(&self, index: usize) -> Result<bool, VfdtError> {
        self.values
            .get(index)
            .map(|v| v.is_nan())
            .ok_or(VfdtError::IndexOutOfBounds {
                index,
                len: self.values.len(),
            })
    }

    fn attribute_at_index(&self, index: usize) -> Option<&NominalAttribute> {
        self.header.attribute_at_index(index)
    }

    fn number_of_attributes(&self) -> usize {
        self.header.number_of_attributes()
    }

    fn class_index(&self) -> usize {
        self.header.class_index()
    }

    fn class_value(&self) -> Option<f64> {
        self.values.get(self.header.class_index()).copied()
    }

    fn set_class_value(&mut self, new_value: f64) -> Result<(), VfdtError> {
        self.set_value_at_index(self.header.class_index(), new_value)
    }

    fn is_class_missing(&self) -> bool {
        self.class_value().is_none_or(f64::is_nan)
    }

    fn number_of_classes(&self) -> usize {
        self.header.number_of_classes()
    }

    fn to_vec(&self) -> Vec<f64> {
        self.values.clone()
    }

    fn header(&self) -> &Arc<InstanceHeader> {
        &self.header
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weather_header() -> Arc<InstanceHeader> {
        InstanceHeader::nominal(
            "weather",
            &[
                ("outlook", &["sunny", "overcast", "rainy"]),
                ("windy", &["false", "true"]),
                ("play", &["no", "yes"]),
            ],
            2,
        )
        .unwrap()
    }

    #[test]
    fn from_labels_resolves_indices() {
        let inst = DenseInstance::from_labels(weather_header(), &["rainy", "true", "yes"]).unwrap();
        assert_eq!(inst.to_vec(), vec![2.0, 1.0, 1.0]);
        assert_eq!(inst.nominal_value_at(0).unwrap(), 2);
        assert_eq!(inst.nominal_class_value().unwrap(), 1);
        assert!(!inst.has_missing_value());
        assert_eq!(inst.number_of_classes(), 2);
    }

    #[test]
    fn question_mark_is_missing() {
        let inst = DenseInstance::from_labels(weather_header(), &["sunny", "?", "no"]).unwrap();
        assert!(inst.is_missing_at_index(1).unwrap());
        assert_eq!(inst.first_missing_index(), Some(1));
        assert!(matches!(
            inst.nominal_value_at(1),
            Err(VfdtError::MissingValue { attribute: 1 })
        ));
        assert!(!inst.is_class_missing());
    }

    #[test]
    fn missing_class_is_reported() {
        let inst = DenseInstance::from_labels(weather_header(), &["sunny", "true", "?"]).unwrap();
        assert!(inst.is_class_missing());
        assert_eq!(inst.first_missing_index(), Some(2));
    }

    #[test]
    fn unknown_label_is_rejected() {
        let err =
            DenseInstance::from_labels(weather_header(), &["foggy", "true", "no"]).unwrap_err();
        assert!(matches!(err, VfdtError::SchemaMismatch(_)));
    }

    #[test]
    fn wrong_arity_is_rejected() {
        let err = DenseInstance::from_indices(weather_header(), &[0, 1]).unwrap_err();
        assert!(matches!(err, VfdtError::SchemaMismatch(_)));
    }

    #[test]
    fn out_of_domain_values_are_rejected() {
        let mut inst = DenseInstance::from_indices(weather_header(), &[0, 1, 0]).unwrap();
        inst.set_value_at_index(0, 3.0).unwrap();
        assert!(matches!(
            inst.nominal_value_at(0),
            Err(VfdtError::ValueOutOfDomain {
                attribute: 0,
                num_values: 3,
                ..
            })
        ));
        inst.set_value_at_index(0, 0.5).unwrap();
        assert!(matches!(
            inst.nominal_value_at(0),
            Err(VfdtError::ValueOutOfDomain { .. })
        ));
        inst.set_value_at_index(0, -1.0).unwrap();
        assert!(inst.nominal_value_at(0).is_err());
    }

    #[test]
    fn setters_check_bounds() {
        let mut inst = DenseInstance::from_indices(weather_header(), &[0, 1, 0]).unwrap();
        assert!(matches!(
            inst.set_value_at_index(5, 1.0),
            Err(VfdtError::IndexOutOfBounds { index: 5, len: 3 })
        ));
        assert!(inst.is_missing_at_index(7).is_err());
        inst.set_class_value(1.0).unwrap();
        assert_eq!(inst.class_value(), Some(1.0));
    }
}
