pub mod classifier;
pub mod hoeffding_tree;

pub use classifier::Classifier;
pub use hoeffding_tree::{HoeffdingTree, HoeffdingTreeConfig};
