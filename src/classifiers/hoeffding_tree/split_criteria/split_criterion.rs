/// Impurity measure used to rank candidate split attributes.
///
/// Lower impurity is better. `range_of_merit` is the width of the
/// impurity scale, the `R` of the Hoeffding bound.
pub trait SplitCriterion {
    fn impurity(&self, distribution: &[u64]) -> f64;

    /// Impurity after a split, each branch weighted by its share of
    /// `total` instances. Empty branches contribute nothing.
    fn post_split_impurity<'a, I>(&self, post_split_dists: I, total: u64) -> f64
    where
        I: IntoIterator<Item = &'a [u64]>,
    {
        let mut sum = 0.0;
        for dist in post_split_dists {
            let count: u64 = dist.iter().sum();
            if count > 0 {
                let ratio = count as f64 / total as f64;
                sum += ratio * self.impurity(dist);
            }
        }
        sum
    }

    fn range_of_merit(&self, num_classes: usize) -> f64;
}
