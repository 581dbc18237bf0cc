use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A metric name that is not present on the stored records.
    #[error("Unknown metric: '{0}'")]
    UnknownMetric(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}
