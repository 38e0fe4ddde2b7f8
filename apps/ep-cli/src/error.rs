//! Error types for the ep-cli binary.

use ep_core::MeasError;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Measurement(#[from] MeasError),

    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    #[error("Operator {op} does not accept a bare number on the right")]
    ScalarNotAllowed { op: &'static str },

    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}
