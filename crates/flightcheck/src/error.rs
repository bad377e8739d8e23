//! Error types for the flightcheck library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for flightcheck operations.
///
/// Only loading can fail. Normalization and rule evaluation degrade to
/// missing values and empty violation groups instead of erroring.
#[derive(Debug, Error)]
pub enum FlightcheckError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid delimiter detected or specified.
    #[error("Invalid delimiter: {0}")]
    InvalidDelimiter(String),

    /// Empty file or no data to check.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for flightcheck operations.
pub type Result<T> = std::result::Result<T, FlightcheckError>;
