//! Error types for heuristic-analytics
//!
//! Ingestion errors are fatal for the whole load: no aggregator ever sees
//! partially-typed data. Unmatched comparison records are not errors.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// heuristic-analytics error types
#[derive(Error, Debug)]
pub enum Error {
    /// No source data file could be found
    #[error("Missing input: {0}\nPass the path to the raw results file explicitly")]
    MissingInput(String),

    /// A field could not be coerced to its declared type
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// Two records share the same replication key
    #[error("Duplicate record: {0}")]
    DuplicateRecord(String),

    /// Input parsed but held no data rows
    #[error("No data: the input contains no experiment records")]
    NoData,

    /// Storage error (Parquet)
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Arrow error (CSV parsing, batch construction)
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
