//! Error types for LexiGuard

use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error carried by [`Error::Transport`]
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Core error types for the LexiGuard analysis pipeline
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Empty response: {0}")]
    EmptyResponse(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The underlying network call failed. Display and source are forwarded
    /// to the original error untouched.
    #[error(transparent)]
    Transport(BoxError),

    #[error("Service error: request failed with status {status}: {message}")]
    Service { status: u16, message: String },

    #[error("Timeout error: no response within {0:?}")]
    Timeout(Duration),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure classes a caller can discriminate on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    Configuration,
    EmptyResponse,
    MalformedResponse,
    Transport,
    InvalidInput,
    Io,
}

impl Error {
    /// Wrap a lower-level failure without altering its diagnostic
    pub fn transport<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        Error::Transport(err.into())
    }

    /// Classify this error. Service statuses and timeouts are transport failures.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Configuration(_) => ErrorKind::Configuration,
            Error::EmptyResponse(_) => ErrorKind::EmptyResponse,
            Error::MalformedResponse(_) => ErrorKind::MalformedResponse,
            Error::Transport(_) | Error::Service { .. } | Error::Timeout(_) => ErrorKind::Transport,
            Error::InvalidInput(_) => ErrorKind::InvalidInput,
            Error::Io(_) => ErrorKind::Io,
        }
    }
}
