use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use crate::error::VfdtError;
use std::mem::size_of;

/// Index of the largest count, lowest index on ties; 0 for an empty slice.
pub(crate) fn majority_index(counts: &[u64]) -> usize {
    let mut best = 0;
    for (i, &count) in counts.iter().enumerate() {
        if count > counts[best] {
            best = i;
        }
    }
    best
}

/// Running counts kept by a leaf.
///
/// Holds the number of instances seen, the class histogram, and for every
/// non-class attribute the marginal `(value)` and joint `(value, class)`
/// histograms. Joint counts are stored flat, `value * num_classes + class`.
/// Tables are sized from the schema once and never grow, so the footprint
/// does not depend on how many instances were counted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeStats {
    class_index: usize,
    total: u64,
    class_counts: Vec<u64>,
    value_counts: Vec<Vec<u64>>,
    joint_counts: Vec<Vec<u64>>,
}

impl NodeStats {
    pub fn new(header: &InstanceHeader) -> Self {
        let class_index = header.class_index();
        let num_classes = header.number_of_classes();
        let (value_counts, joint_counts) = header
            .attributes()
            .iter()
            .enumerate()
            .map(|(i, attribute)| {
                if i == class_index {
                    (Vec::new(), Vec::new())
                } else {
                    let num_values = attribute.num_values();
                    (vec![0; num_values], vec![0; num_values * num_classes])
                }
            })
            .unzip();

        Self {
            class_index,
            total: 0,
            class_counts: vec![0; num_classes],
            value_counts,
            joint_counts,
        }
    }

    /// Counts one instance.
    ///
    /// Every value is validated before anything is written, so an error
    /// leaves the counts untouched.
    pub fn increment(&mut self, instance: &dyn Instance) -> Result<(), VfdtError> {
        if instance.number_of_attributes() != self.value_counts.len() {
            return Err(VfdtError::SchemaMismatch(format!(
                "expected {} attributes, got {}",
                self.value_counts.len(),
                instance.number_of_attributes()
            )));
        }
        let class = self.checked_value(instance, self.class_index, self.class_counts.len())?;
        for (attribute, counts) in self.value_counts.iter().enumerate() {
            if attribute != self.class_index {
                self.checked_value(instance, attribute, counts.len())?;
            }
        }

        let num_classes = self.class_counts.len();
        self.total += 1;
        self.class_counts[class] += 1;
        for attribute in 0..self.value_counts.len() {
            if attribute == self.class_index {
                continue;
            }
            let value = instance.nominal_value_at(attribute)?;
            self.value_counts[attribute][value] += 1;
            self.joint_counts[attribute][value * num_classes + class] += 1;
        }
        Ok(())
    }

    fn checked_value(
        &self,
        instance: &dyn Instance,
        attribute: usize,
        num_values: usize,
    ) -> Result<usize, VfdtError> {
        let value = instance.nominal_value_at(attribute)?;
        if value >= num_values {
            return Err(VfdtError::ValueOutOfDomain {
                attribute,
                value: value as f64,
                num_values,
            });
        }
        Ok(value)
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn class_index(&self) -> usize {
        self.class_index
    }

    pub fn num_classes(&self) -> usize {
        self.class_counts.len()
    }

    pub fn number_of_attributes(&self) -> usize {
        self.value_counts.len()
    }

    /// Domain size of `attribute` (0 for the class attribute).
    pub fn num_values(&self, attribute: usize) -> usize {
        self.value_counts[attribute].len()
    }

    pub fn class_count(&self, class: usize) -> u64 {
        self.class_counts[class]
    }

    pub fn value_count(&self, attribute: usize, value: usize) -> u64 {
        self.value_counts[attribute][value]
    }

    pub fn joint_count(&self, attribute: usize, value: usize, class: usize) -> u64 {
        self.value_class_distribution(attribute, value)[class]
    }

    pub fn class_distribution(&self) -> &[u64] {
        &self.class_counts
    }

    /// Class histogram restricted to instances with `attribute == value`.
    pub fn value_class_distribution(&self, attribute: usize, value: usize) -> &[u64] {
        let num_classes = self.class_counts.len();
        let start = value * num_classes;
        &self.joint_counts[attribute][start..start + num_classes]
    }

    /// Class with the highest count; the lowest index wins ties.
    pub fn majority_class(&self) -> usize {
        majority_index(&self.class_counts)
    }

    pub fn calc_byte_size(&self) -> usize {
        let mut total = size_of::<Self>();
        total += self.class_counts.len() * size_of::<u64>();
        for (marginal, joint) in self.value_counts.iter().zip(&self.joint_counts) {
            total += 2 * size_of::<Vec<u64>>();
            total += (marginal.len() + joint.len()) * size_of::<u64>();
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::instances::DenseInstance;
    use crate::testing::dummies::header_abc;
    use std::sync::Arc;

    fn inst(header: &Arc<InstanceHeader>, a: usize, b: usize, c: usize) -> DenseInstance {
        DenseInstance::from_indices(Arc::clone(header), &[a, b, c]).unwrap()
    }

    #[test]
    fn new_stats_are_zeroed_and_sized_from_schema() {
        let header = header_abc();
        let stats = NodeStats::new(&header);
        assert_eq!(stats.total(), 0);
        assert_eq!(stats.num_classes(), 2);
        assert_eq!(stats.number_of_attributes(), 3);
        assert_eq!(stats.num_values(0), 3);
        assert_eq!(stats.num_values(1), 2);
        assert_eq!(stats.num_values(2), 0);
        assert_eq!(stats.class_distribution(), &[0, 0]);
    }

    #[test]
    fn increment_updates_every_table() {
        let header = header_abc();
        let mut stats = NodeStats::new(&header);
        stats.increment(&inst(&header, 2, 0, 1)).unwrap();
        stats.increment(&inst(&header, 2, 1, 1)).unwrap();
        stats.increment(&inst(&header, 0, 1, 0)).unwrap();

        assert_eq!(stats.total(), 3);
        assert_eq!(stats.class_count(0), 1);
        assert_eq!(stats.class_count(1), 2);
        assert_eq!(stats.value_count(0, 2), 2);
        assert_eq!(stats.value_count(0, 1), 0);
        assert_eq!(stats.value_count(1, 1), 2);
        assert_eq!(stats.joint_count(0, 2, 1), 2);
        assert_eq!(stats.joint_count(0, 0, 0), 1);
        assert_eq!(stats.joint_count(1, 1, 0), 1);
        assert_eq!(stats.value_class_distribution(1, 1), &[1, 1]);
    }

    #[test]
    fn marginals_and_joints_stay_consistent() {
        let header = header_abc();
        let mut stats = NodeStats::new(&header);
        for i in 0..97 {
            stats
                .increment(&inst(&header, i % 3, (i / 3) % 2, (i * 7 / 5) % 2))
                .unwrap();
        }
        for attribute in header.candidate_attributes() {
            let sum: u64 = (0..stats.num_values(attribute))
                .map(|v| stats.value_count(attribute, v))
                .sum();
            assert_eq!(sum, stats.total());
            for v in 0..stats.num_values(attribute) {
                let joint: u64 = stats.value_class_distribution(attribute, v).iter().sum();
                assert_eq!(joint, stats.value_count(attribute, v));
            }
        }
        assert_eq!(stats.class_distribution().iter().sum::<u64>(), 97);
    }

    #[test]
    fn failed_increment_leaves_counts_untouched() {
        let header = header_abc();
        let mut stats = NodeStats::new(&header);
        stats.increment(&inst(&header, 1, 1, 1)).unwrap();
        let before = stats.clone();

        let mut bad = inst(&header, 0, 0, 0);
        bad.values[1] = 5.0;
        assert!(matches!(
            stats.increment(&bad),
            Err(VfdtError::ValueOutOfDomain { attribute: 1, .. })
        ));

        let mut missing = inst(&header, 0, 0, 0);
        missing.values[2] = f64::NAN;
        assert!(matches!(
            stats.increment(&missing),
            Err(VfdtError::MissingValue { attribute: 2 })
        ));
        assert_eq!(stats, before);
    }

    #[test]
    fn majority_class_prefers_lowest_index_on_ties() {
        let header = header_abc();
        let mut stats = NodeStats::new(&header);
        assert_eq!(stats.majority_class(), 0);
        stats.increment(&inst(&header, 0, 0, 1)).unwrap();
        assert_eq!(stats.majority_class(), 1);
        stats.increment(&inst(&header, 0, 0, 0)).unwrap();
        assert_eq!(stats.majority_class(), 0);
    }

    #[test]
    fn majority_index_over_raw_counts() {
        assert_eq!(majority_index(&[]), 0);
        assert_eq!(majority_index(&[0, 0, 0]), 0);
        assert_eq!(majority_index(&[2, 5, 5]), 1);
        assert_eq!(majority_index(&[1, 0, 3]), 2);
    }

    #[test]
    fn byte_size_does_not_grow_with_counts() {
        let header = header_abc();
        let mut stats = NodeStats::new(&header);
        let empty = stats.calc_byte_size();
        for i in 0..1000 {
            stats.increment(&inst(&header, i % 3, i % 2, i % 2)).unwrap();
        }
        assert_eq!(stats.calc_byte_size(), empty);
    }
}
