//! Error types for ABI parsing and the argument codec.

use thiserror::Error;

/// Result type for ABI operations.
pub type AbiResult<T> = std::result::Result<T, AbiError>;

/// Errors raised while parsing ABI definitions or encoding/decoding values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AbiError {
    /// The ABI JSON could not be parsed.
    #[error("invalid ABI JSON: {message}")]
    InvalidJson { message: String },

    /// A Solidity type string is not supported by this codec.
    #[error("unsupported parameter type: {type_name}")]
    UnsupportedType { type_name: String },

    /// A token does not match the parameter type it is encoded against.
    #[error("type mismatch: expected {expected}, got token {token}")]
    TypeMismatch { expected: String, token: String },

    /// A token value cannot be represented in its encoded form.
    #[error("value out of range for {type_name}")]
    ValueOutOfRange { type_name: String },

    /// The byte payload ended before the expected data.
    #[error("truncated encoding: need {needed} bytes at offset {offset}, have {available}")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// A decoded slot held a value that is invalid for its type.
    #[error("invalid encoding: {message}")]
    InvalidEncoding { message: String },
}
