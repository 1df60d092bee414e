use crate::error::VfdtError;
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};

fn default_split_confidence() -> f64 {
    1e-4
}
fn default_tie_threshold() -> f64 {
    0.05
}
fn default_grace_period() -> u64 {
    30
}

/// Tunables of a training run. Fixed once the tree is built.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct HoeffdingTreeConfig {
    #[serde(default = "default_split_confidence", alias = "delta")]
    #[schemars(
        title = "Split confidence",
        description = "Allowed error (delta) of each split decision, in (0, 1)."
    )]
    pub split_confidence: f64,

    #[serde(default = "default_tie_threshold", alias = "tie_confidence")]
    #[schemars(
        title = "Tie threshold",
        description = "Split on the current best attribute once the Hoeffding bound drops below this value."
    )]
    pub tie_threshold: f64,

    #[serde(default = "default_grace_period", alias = "n_min")]
    #[schemars(
        title = "Grace period",
        description = "Instances a leaf should observe between split attempts (nMin)."
    )]
    pub grace_period: u64,

    #[serde(default)]
    #[schemars(
        title = "No pre-pruning",
        description = "Allow splits that do not reduce the entropy of the leaf."
    )]
    pub no_pre_prune: bool,
}

impl Default for HoeffdingTreeConfig {
    fn default() -> Self {
        Self {
            split_confidence: default_split_confidence(),
            tie_threshold: default_tie_threshold(),
            grace_period: default_grace_period(),
            no_pre_prune: false,
        }
    }
}

impl HoeffdingTreeConfig {
    pub fn validate(&self) -> Result<(), VfdtError> {
        if !(self.split_confidence > 0.0 && self.split_confidence < 1.0) {
            return Err(VfdtError::InvalidConfiguration(format!(
                "split confidence must be in (0, 1), got {}",
                self.split_confidence
            )));
        }
        if !self.tie_threshold.is_finite() || self.tie_threshold < 0.0 {
            return Err(VfdtError::InvalidConfiguration(format!(
                "tie threshold must be a finite value >= 0, got {}",
                self.tie_threshold
            )));
        }
        if self.grace_period == 0 {
            return Err(VfdtError::InvalidConfiguration(
                "grace period must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Parses a JSON object; absent fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, VfdtError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String, VfdtError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn schema() -> Schema {
        schema_for!(HoeffdingTreeConfig)
    }
}
