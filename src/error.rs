//! Error types
//!
//! Every fallible operation in the crate returns [`Result`], so the binary
//! can report a single message and exit.

use thiserror::Error;

/// Errors raised while building, filling or writing images and reports
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid canvas dimensions {width}x{height}: both sides must be non-zero")]
    InvalidDimensions { width: usize, height: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scene error: {0}")]
    Scene(String),

    #[error("Malformed pixel dump: {0}")]
    MalformedDump(String),
}

/// Result type alias for pixeldump operations
pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Scene(err.to_string())
    }
}
