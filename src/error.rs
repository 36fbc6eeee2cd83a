//! Error types for the churn preprocessing pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, PrepError>;

/// Main error type for the pipeline
#[derive(Error, Debug)]
pub enum PrepError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Data error: {0}")]
    DataError(String),

    #[error("{0} not fitted")]
    NotFitted(&'static str),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid parameter: {name} = {value}, {reason}")]
    InvalidParameter {
        name: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<polars::error::PolarsError> for PrepError {
    fn from(err: polars::error::PolarsError) -> Self {
        PrepError::DataError(err.to_string())
    }
}

impl From<serde_json::Error> for PrepError {
    fn from(err: serde_json::Error) -> Self {
        PrepError::SerializationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PrepError::DataError("test error".to_string());
        assert_eq!(err.to_string(), "Data error: test error");
    }

    #[test]
    fn test_file_not_found_display() {
        let err = PrepError::FileNotFound(PathBuf::from("data/raw.csv"));
        assert_eq!(err.to_string(), "File not found: data/raw.csv");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: PrepError = io_err.into();
        assert!(matches!(err, PrepError::IoError(_)));
    }
}
