mod config;
mod hoeffding_tree;
pub mod nodes;
pub mod split_criteria;
mod split_evaluator;

pub use config::HoeffdingTreeConfig;
pub use hoeffding_tree::HoeffdingTree;
pub use split_evaluator::{SplitDecision, SplitEvaluator, compute_hoeffding_bound};
