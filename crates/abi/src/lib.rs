//! # ethpipe ABI
//!
//! Contract ABI handling for the ethpipe workspace:
//!
//! - `AbiDefinition`: a parsed JSON ABI (constructor, functions, events)
//! - `ParamType`: the Solidity parameter type model
//! - `Token`: runtime argument values
//! - `encode` / `decode`: the standard 32-byte-slot head/tail codec
//!
//! The codec covers the types constructor arguments use in practice:
//! `address`, `uint<N>`, `bool`, `bytes<N>`, `bytes`, `string`, and
//! single-dimension arrays of those. Decoding the encoding of any well-typed
//! token vector reproduces the original values.
//!
//! ## Example
//!
//! ```rust
//! use ethpipe_abi::{encode, decode, ParamType, Token};
//!
//! let tokens = vec![Token::Bool(true), Token::String("hi".into())];
//! let data = encode(&tokens).unwrap();
//! let back = decode(&[ParamType::Bool, ParamType::String], &data).unwrap();
//! assert_eq!(back, tokens);
//! ```

pub mod codec;
pub mod definition;
pub mod error;
pub mod param_type;
pub mod token;

// Re-exports
pub use codec::{decode, encode, encode_params};
pub use definition::{AbiDefinition, AbiEntry, AbiParam};
pub use error::{AbiError, AbiResult};
pub use param_type::ParamType;
pub use token::Token;
