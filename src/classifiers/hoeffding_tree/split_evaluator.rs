use crate::classifiers::hoeffding_tree::HoeffdingTreeConfig;
use crate::classifiers::hoeffding_tree::nodes::NodeStats;
use crate::classifiers::hoeffding_tree::split_criteria::{EntropySplitCriterion, SplitCriterion};

/// Outcome of a split check on one leaf.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitDecision {
    pub best_attribute: usize,
    /// Impurity of the leaf without splitting (`H0`).
    pub null_impurity: f64,
    pub best_impurity: f64,
    /// `f64::MAX` when only one candidate attribute exists.
    pub second_best_impurity: f64,
    pub hoeffding_bound: f64,
    pub confident: bool,
    pub tie: bool,
    pub pre_pruned: bool,
}

impl SplitDecision {
    pub fn should_split(&self) -> bool {
        (self.confident || self.tie) && !self.pre_pruned
    }
}

/// `sqrt(R² · ln(1/δ) / 2n)`.
pub fn compute_hoeffding_bound(range: f64, confidence: f64, n: f64) -> f64 {
    ((range * range * (1.0 / confidence).ln()) / (2.0 * n)).sqrt()
}

/// Ranks the attributes of a leaf and applies the Hoeffding test.
#[derive(Debug, Clone)]
pub struct SplitEvaluator<C: SplitCriterion = EntropySplitCriterion> {
    criterion: C,
    split_confidence: f64,
    tie_threshold: f64,
    no_pre_prune: bool,
}

impl SplitEvaluator<EntropySplitCriterion> {
    pub fn new(config: &HoeffdingTreeConfig) -> Self {
        Self::with_criterion(EntropySplitCriterion::new(), config)
    }
}

impl<C: SplitCriterion> SplitEvaluator<C> {
    pub fn with_criterion(criterion: C, config: &HoeffdingTreeConfig) -> Self {
        Self {
            criterion,
            split_confidence: config.split_confidence,
            tie_threshold: config.tie_threshold,
            no_pre_prune: config.no_pre_prune,
        }
    }

    pub fn criterion(&self) -> &C {
        &self.criterion
    }

    /// Impurity left after splitting the leaf on `attribute` (`Hw`).
    pub fn post_split_impurity(&self, stats: &NodeStats, attribute: usize) -> f64 {
        let dists = (0..stats.num_values(attribute))
            .map(|value| stats.value_class_distribution(attribute, value));
        self.criterion.post_split_impurity(dists, stats.total())
    }

    /// Scores every non-class attribute in ascending index order and decides
    /// whether the leaf should split. Returns `None` when the leaf is empty
    /// or the schema has no attribute besides the class.
    pub fn evaluate(&self, stats: &NodeStats) -> Option<SplitDecision> {
        if stats.total() == 0 {
            return None;
        }
        let null_impurity = self.criterion.impurity(stats.class_distribution());

        let mut best_attribute = None;
        let mut best_impurity = f64::MAX;
        let mut second_best_impurity = f64::MAX;
        for attribute in 0..stats.number_of_attributes() {
            if attribute == stats.class_index() {
                continue;
            }
            let impurity = self.post_split_impurity(stats, attribute);
            if impurity < best_impurity {
                second_best_impurity = best_impurity;
                best_impurity = impurity;
                best_attribute = Some(attribute);
            } else if impurity < second_best_impurity {
                second_best_impurity = impurity;
            }
        }
        let best_attribute = best_attribute?;

        let range = self.criterion.range_of_merit(stats.num_classes());
        let hoeffding_bound =
            compute_hoeffding_bound(range, self.split_confidence, stats.total() as f64);

        Some(SplitDecision {
            best_attribute,
            null_impurity,
            best_impurity,
            second_best_impurity,
            hoeffding_bound,
            confident: second_best_impurity - best_impurity > hoeffding_bound,
            tie: hoeffding_bound < self.tie_threshold,
            pre_pruned: !self.no_pre_prune && null_impurity <= best_impurity,
        })
    }
}
