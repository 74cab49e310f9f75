use fd_core::ConstraintOperationError;
use thiserror::Error;

pub type PlacementResult<T> = Result<T, PlacementError>;

#[derive(Error, Debug)]
pub enum PlacementError {
    #[error(
        "Invalid cost entry ({talk_a}, {talk_b}) = {cost}; expected 0 <= talk_a < talk_b < \
         {no_of_talks} and a non-negative cost"
    )]
    InvalidCostEntry {
        talk_a: usize,
        talk_b: usize,
        cost: i32,
        no_of_talks: usize,
    },
    #[error("Invalid configuration: {0}")]
    ConfigurationError(String),
    #[error("The model is infeasible at the root, more details: {0}")]
    ModelInconsistent(#[from] ConstraintOperationError),
    #[error("Invalid cost file at line {line}: {message}")]
    CostFile { line: usize, message: String },
    #[error("IO error, more details: {0}")]
    Io(#[from] std::io::Error),
}

impl PlacementError {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError(message.into())
    }
}
