use std::path::PathBuf;

use thiserror::Error;

/// Errors emitted by loading and querying datasets.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    Core(#[from] mindstat_core::Error),
    #[error("dataset is missing column: {0}")]
    MissingColumn(String),
    #[error("malformed row at line {line}: {message}")]
    MalformedRow { line: u64, message: String },
    #[error("invalid dataset file name: {0:?}")]
    InvalidFileName(String),
    #[error("dataset file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for query operations.
pub type Result<T> = std::result::Result<T, QueryError>;
