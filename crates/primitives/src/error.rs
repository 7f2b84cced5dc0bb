//! Error types for primitive value parsing and construction.

use thiserror::Error;

/// Result type for primitive operations.
pub type PrimitiveResult<T> = std::result::Result<T, PrimitiveError>;

/// Errors raised while parsing or constructing primitive values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PrimitiveError {
    /// A byte slice had the wrong length for the target type.
    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// A string was not valid hexadecimal for the target type.
    #[error("invalid hex string: {message}")]
    InvalidHex { message: String },

    /// A secret key was rejected by the underlying curve implementation.
    #[error("invalid secret key")]
    InvalidSecretKey,
}
