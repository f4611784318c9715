//! Error types for codemound core.

use std::{error::Error, fmt, io};

/// Error type for codemound core operations.
#[derive(Debug)]
pub enum CodeMoundError {
    /// An underlying I/O error.
    Io(io::Error),
    /// A catch-all error with a message.
    Other(String),
}

impl fmt::Display for CodeMoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io error: {err}"),
            Self::Other(message) => write!(f, "{message}"),
        }
    }
}

impl Error for CodeMoundError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Other(_) => None,
        }
    }
}

impl From<io::Error> for CodeMoundError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// Convenience result type for codemound core.
pub type Result<T> = std::result::Result<T, CodeMoundError>;
