//! Error types for tokenstash.
//!
//! Every failure a session operation can hit maps onto one of these
//! variants. The session client renders them into the status line; they
//! never escape an operation as a structured error.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// The unified error type for tokenstash operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Token storage errors (I/O, corrupt storage file).
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// The server answered with something that is not JSON.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Input validation errors (base URL, scope name, token characters).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Errors raised by a [`TokenStore`](crate::TokenStore) backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("I/O error on {}: {message}", path.display())]
    Io { path: PathBuf, message: String },

    /// The backing file exists but could not be parsed.
    #[error("corrupt storage file {}: {message}", path.display())]
    Corrupt { path: PathBuf, message: String },
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

/// A response body the client could not parse.
#[derive(Debug)]
pub struct ProtocolError {
    /// HTTP status code of the offending response.
    pub status: u16,
    /// Parser detail.
    pub message: String,
}

impl ProtocolError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}: {}", self.status, self.message)
    }
}

impl std::error::Error for ProtocolError {}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API base URL '{value}': {reason}")]
    ApiBase { value: String, reason: String },

    /// Unknown storage scope name.
    #[error("invalid storage scope '{value}': expected 'durable' or 'ephemeral'")]
    StorageScope { value: String },

    /// Token contains characters that cannot go in an HTTP header.
    #[error("token cannot be sent as a header value")]
    TokenHeader,
}
