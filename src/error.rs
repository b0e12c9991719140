//! Error types for the scheduler.

use std::path::PathBuf;
use thiserror::Error;

use crate::timeline::Granularity;

/// Main error type for scheduler operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SchedulerError {
    /// A date string that is not a `YYYY-MM-DD` calendar date.
    #[error("Invalid calendar date '{value}': {source}")]
    InvalidDateFormat {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Invalid timeline bounds: start {start} is after end {end}")]
    InvalidBounds {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    #[error("Pixels per day for {granularity:?} must be positive")]
    InvalidScale { granularity: Granularity },

    /// IO errors with the file involved
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Order form validation errors
    #[error("{0}")]
    Validation(String),
}

impl SchedulerError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}

/// Convenient result alias.
pub type Result<T> = std::result::Result<T, SchedulerError>;
