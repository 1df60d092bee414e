mod found_node;
mod learning_node;
mod node;
mod node_stats;
mod split_node;

pub use found_node::FoundNode;
pub use learning_node::LearningNode;
pub use node::Node;
pub use node_stats::NodeStats;
pub use split_node::SplitNode;
