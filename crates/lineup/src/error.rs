//! Error type for table operations.

use std::fmt;

/// Error type for table operations.
///
/// Malformed inputs fail fast with one of these variants. Custom renderer
/// panics are never caught; they propagate to the render caller.
#[derive(Debug)]
pub enum Error {
    /// A sort criterion carried an unknown direction token.
    InvalidSortKey(String),

    /// Data serialization error.
    Serialization(String),

    /// The convenience printers were fed a shape they cannot render.
    UnsupportedData(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidSortKey(msg) => write!(f, "invalid sort key: {}", msg),
            Error::Serialization(msg) => write!(f, "serialization error: {}", msg),
            Error::UnsupportedData(msg) => write!(f, "unsupported data: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
