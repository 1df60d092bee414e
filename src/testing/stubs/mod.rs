mod classifiers;
mod vec_stream;

pub use classifiers::{ClassifierNoneVotes, OracleClassifier, TrainSpyClassifier};
pub use vec_stream::VecStream;
