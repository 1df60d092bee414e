mod random_tree;

pub use random_tree::{RandomTreeGenerator, RandomTreeParams};
