use crate::classifiers::hoeffding_tree::split_criteria::split_criterion::SplitCriterion;

/// Shannon entropy in bits.
#[derive(Debug, Default, Clone, Copy)]
pub struct EntropySplitCriterion;

impl EntropySplitCriterion {
    pub fn new() -> Self {
        Self
    }

    pub fn compute_entropy(&self, distribution: &[u64]) -> f64 {
        let total: u64 = distribution.iter().sum();
        let total = total as f64;
        let mut entropy = 0.0;
        for &count in distribution {
            if count > 0 {
                let p = count as f64 / total;
                entropy -= p * p.log2();
            }
        }
        entropy
    }
}

impl SplitCriterion for EntropySplitCriterion {
    fn impurity(&self, distribution: &[u64]) -> f64 {
        self.compute_entropy(distribution)
    }

    fn range_of_merit(&self, num_classes: usize) -> f64 {
        (num_classes.max(1) as f64).log2()
    }
}
