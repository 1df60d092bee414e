use thiserror::Error;

#[derive(Debug, Error)]
pub enum VfdtError {
    #[error("instance has a missing value at attribute {attribute}")]
    MissingValue { attribute: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("value {value} is outside the domain of attribute {attribute} ({num_values} values)")]
    ValueOutOfDomain {
        attribute: usize,
        value: f64,
        num_values: usize,
    },

    #[error("node is already split on attribute {attribute}")]
    AlreadySplit { attribute: usize },

    #[error("cannot split a leaf that has not seen any instance")]
    EmptyLeaf,

    #[error("attribute {attribute} cannot be used as a split attribute")]
    InvalidSplitAttribute { attribute: usize },

    #[error("node is a leaf and has no children")]
    NotASplitNode,

    #[error("child index {index} out of range ({num_children} children)")]
    ChildOutOfRange { index: usize, num_children: usize },

    #[error("instance schema does not match the model schema: {0}")]
    SchemaMismatch(String),

    #[error("model has not been trained yet")]
    ModelNotTrained,

    #[error("index {index} out of bounds (len {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("unknown {kind}: '{value}'")]
    UnknownVariant { kind: &'static str, value: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
