use thiserror::Error;

/// Result type for carbon operations
pub type CarbonResult<T> = Result<T, CarbonError>;

/// Errors that can occur in the carbon domain.
///
/// Only build-time data problems surface here. An unknown instance type or
/// region is not an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CarbonError {
    /// Embedded table could not be parsed
    #[error("Embedded carbon data is corrupt: {0}")]
    CorruptData(String),

    /// Embedded table parsed but is internally inconsistent
    #[error("Invalid carbon spec: {0}")]
    InvalidSpec(String),
}
