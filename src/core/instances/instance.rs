use crate::core::attributes::NominalAttribute;
use crate::core::instance_header::InstanceHeader;
use crate::error::VfdtError;
use std::sync::Arc;

/// A single labeled example. Values are indices into the matching
/// attribute's domain, stored as `f64` with `NaN` meaning missing.
pub trait Instance {
    fn value_at_index(&self, index: usize) -> Option<f64>;

    fn set_value_at_index(&mut self, index: usize, new_value: f64) -> Result<(), VfdtError>;

    fn is_missing_at_index(&self, index: usize) -> Result<bool, VfdtError>;

    fn attribute_at_index(&self, index: usize) -> Option<&NominalAttribute>;

    fn number_of_attributes(&self) -> usize;

    fn class_index(&self) -> usize;

    fn class_value(&self) -> Option<f64>;

    fn set_class_value(&mut self, new_value: f64) -> Result<(), VfdtError>;

    fn is_class_missing(&self) -> bool;

    fn number_of_classes(&self) -> usize;

    fn to_vec(&self) -> Vec<f64>;

    fn header(&self) -> &Arc<InstanceHeader>;

    /// Index of the first attribute (class included) whose value is missing.
    fn first_missing_index(&self) -> Option<usize> {
        (0..self.number_of_attributes()).find(|&i| self.is_missing_at_index(i).unwrap_or(true))
    }

    fn has_missing_value(&self) -> bool {
        self.first_missing_index().is_some()
    }

    /// Value at `index` as a position in the attribute's domain.
    ///
    /// Fails with [`VfdtError::MissingValue`] for `NaN` and with
    /// [`VfdtError::ValueOutOfDomain`] when the value is not a valid
    /// position in the domain.
    fn nominal_value_at(&self, index: usize) -> Result<usize, VfdtError> {
        let len = self.number_of_attributes();
        let value = self
            .value_at_index(index)
            .ok_or(VfdtError::IndexOutOfBounds { index, len })?;
        if value.is_nan() {
            return Err(VfdtError::MissingValue { attribute: index });
        }
        let num_values = self
            .attribute_at_index(index)
            .map(NominalAttribute::num_values)
            .ok_or(VfdtError::IndexOutOfBounds { index, len })?;
        if value < 0.0 || value.fract() != 0.0 || value >= num_values as f64 {
            return Err(VfdtError::ValueOutOfDomain {
                attribute: index,
                value,
                num_values,
            });
        }
        Ok(value as usize)
    }

    fn nominal_class_value(&self) -> Result<usize, VfdtError> {
        self.nominal_value_at(self.class_index())
    }
}
