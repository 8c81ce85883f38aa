//! Structural errors for the sales pipeline.
//!
//! Data-quality problems (malformed cells, non-positive measures, missing
//! labels) are never errors; they are absorbed by the cleaner. Everything in
//! [`PipelineError`] aborts the current invocation.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// A column the stage needs is not in the table.
    #[error("required column '{0}' is missing")]
    MissingColumn(String),

    /// Two headers collapse to the same name after title-casing.
    #[error("column '{0}' appears more than once after normalization")]
    DuplicateColumn(String),

    /// A column holds values of the wrong kind for the operation.
    #[error("column '{column}' has a {found} value at row {row}, expected a number")]
    TypeMismatch {
        column: String,
        row: usize,
        found: &'static str,
    },

    /// The input has no header row.
    #[error("input has no header row")]
    EmptyHeader,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
