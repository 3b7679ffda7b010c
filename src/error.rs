//! Error types for the qgrid crate

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the qgrid crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid action id {action} (configured action count is {n_actions})")]
    InvalidAction { action: usize, n_actions: usize },

    #[error("state vector has {got} dimensions, the quantization grid expects {expected}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("invalid cell id '{input}': {reason}")]
    ParseCellId { input: String, reason: String },

    #[error("corrupt table document {path:?}: {message}")]
    CorruptTable { path: PathBuf, message: String },

    #[error("environment failure: {message}")]
    Environment { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
