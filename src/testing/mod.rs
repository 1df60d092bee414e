pub mod dummies;
pub mod stubs;

pub use stubs::{ClassifierNoneVotes, OracleClassifier, TrainSpyClassifier, VecStream};
