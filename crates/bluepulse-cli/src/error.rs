//! Error types for the command-line front end.

use std::fmt;

/// Result type for subcommands.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors a subcommand can end with.
#[derive(Debug)]
pub enum Error {
    /// Loading or deriving data failed.
    Data(bluepulse_data::Error),
    /// Writing the report to stdout failed.
    Output(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Data(e) => write!(f, "{e}"),
            Error::Output(e) => write!(f, "failed to write output: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Data(e) => Some(e),
            Error::Output(e) => Some(e),
        }
    }
}

impl From<bluepulse_data::Error> for Error {
    fn from(e: bluepulse_data::Error) -> Self {
        Error::Data(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Data(bluepulse_data::Error::Json(e))
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Output(e)
    }
}
