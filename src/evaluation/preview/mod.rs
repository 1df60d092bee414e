mod learning_curve;
mod snapshot;

pub use learning_curve::{CurveFormat, LearningCurve};
pub use snapshot::Snapshot;
