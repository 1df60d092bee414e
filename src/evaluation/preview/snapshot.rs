use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result};

/// Metrics captured at one point of an evaluation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub instances_seen: u64,
    pub accuracy: f64,
    pub kappa: f64,
    /// Estimated model footprint at capture time.
    pub model_bytes: usize,
    pub seconds: f64,
}

impl Display for Snapshot {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "seen={}, acc={:.6}, kappa={:.6}, model={}B, t={:.3}s",
            self.instances_seen, self.accuracy, self.kappa, self.model_bytes, self.seconds
        )
    }
}
