mod concept;
mod random_tree_generator;

pub use random_tree_generator::{RandomTreeGenerator, RandomTreeParams};
