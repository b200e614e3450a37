//! Error types for ucs-core

use thiserror::Error;

/// Result type for ucs-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in ucs-core operations
///
/// The color transforms themselves are infallible. Errors arise only when
/// validating viewing conditions, loading them from configuration, or
/// handing mis-sized buffers to the batch entry points.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Viewing conditions outside the model's domain
    #[error("Invalid viewing conditions: {0}")]
    InvalidConditions(String),

    /// Buffer size mismatch
    #[error("Buffer size mismatch: expected {expected}, got {actual}")]
    BufferSize { expected: usize, actual: usize },

    /// Malformed configuration document
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
