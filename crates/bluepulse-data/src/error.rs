//! Error types for the bluepulse-data crate.

use std::fmt;
use std::path::PathBuf;

/// Result type for dataset operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or deriving data.
#[derive(Debug)]
pub enum Error {
    /// Reading a dataset file failed.
    Io {
        /// The file being read.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },
    /// JSON parsing failed.
    Json(serde_json::Error),
    /// A dataset was structurally invalid.
    InvalidData {
        /// Context for where the error occurred.
        context: &'static str,
        /// Description of what was invalid.
        detail: String,
    },
    /// A time index past the end of the dataset's timestamps.
    TimeIndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of timestamps.
        len: usize,
    },
    /// No scenario with the given id.
    UnknownScenario(u32),
    /// The year is not on the projection timeline.
    UnknownYear(i32),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            Error::Json(e) => write!(f, "invalid json: {e}"),
            Error::InvalidData { context, detail } => {
                write!(f, "invalid {context}: {detail}")
            }
            Error::TimeIndexOutOfRange { index, len } => {
                write!(f, "time index {index} out of range for {len} timestamps")
            }
            Error::UnknownScenario(id) => write!(f, "unknown scenario {id}"),
            Error::UnknownYear(year) => write!(f, "year {year} is not on the timeline"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io { source, .. } => Some(source),
            Error::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e)
    }
}
