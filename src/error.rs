use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScytaleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Empty pipeline: at least one stage is required")]
    EmptyPipeline,

    #[error("Unknown stage kind: {0}")]
    UnknownStage(String),

    #[error("Invalid stage parameter: {0}")]
    InvalidStageParam(String),

    #[error("Invalid mask: {0}. Must be between 0 and 255")]
    InvalidMask(i64),

    #[error("Invalid modulus: {0}. Must be at least 1")]
    InvalidModulus(u32),

    #[error("Pipeline must start with a leaf stage, found wrapper '{0}'")]
    ExpectedLeaf(&'static str),

    #[error("Leaf stage '{0}' at position {1}: only the first stage may be a leaf")]
    MisplacedLeaf(&'static str, usize),

    #[error("Leaf stage '{0}' does not operate on the {1} domain")]
    DomainMismatch(&'static str, &'static str),
}

pub type Result<T> = std::result::Result<T, ScytaleError>;
