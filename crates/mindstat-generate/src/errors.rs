use thiserror::Error;

use crate::validate::ValidationReport;

/// Errors emitted by the generation engine.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid generator config: {}", summarize(.0))]
    InvalidConfig(ValidationReport),
    #[error("invalid output path: {0}")]
    InvalidPath(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

fn summarize(report: &ValidationReport) -> String {
    report
        .errors
        .iter()
        .map(|issue| format!("{} ({})", issue.message, issue.path))
        .collect::<Vec<_>>()
        .join("; ")
}
