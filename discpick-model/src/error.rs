use thiserror::Error;

/// Errors produced by model constructors and validation routines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("pending status is missing required field `{0}`")]
    MissingField(&'static str),

    #[error("disc id must not be empty")]
    EmptyDiscId,

    #[error("pending request for disc {disc_id} has no candidates")]
    NoCandidates { disc_id: String },

    #[error("decision budget must be positive")]
    InvalidBudget,

    #[error("candidate index {index} out of range (0..{len})")]
    IndexOutOfRange { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, ModelError>;
