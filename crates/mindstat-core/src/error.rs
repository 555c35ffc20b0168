use thiserror::Error;

/// Core error type shared across mindstat crates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The name does not match any column of the record schema.
    #[error("field not found: {0}")]
    FieldNotFound(String),
    /// The column exists but does not hold a number.
    #[error("field is not numeric: {0}")]
    NonNumericField(String),
    /// The name does not match any known region.
    #[error("unknown region: {0}")]
    UnknownRegion(String),
    /// The value cannot be parsed as an integer year.
    #[error("invalid year: {0:?}")]
    InvalidYear(String),
}

/// Convenience alias for results returned by mindstat crates.
pub type Result<T> = std::result::Result<T, Error>;
