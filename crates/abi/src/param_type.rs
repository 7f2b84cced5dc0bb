//! The Solidity parameter type model.

use crate::error::{AbiError, AbiResult};
use std::fmt;

/// A Solidity parameter type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    /// `address`: a 20-byte account or contract address.
    Address,
    /// `uint<N>`: unsigned integer of the given bit width (8..=256, step 8).
    Uint(usize),
    /// `bool`.
    Bool,
    /// `bytes<N>`: fixed-size byte string, 1..=32 bytes.
    FixedBytes(usize),
    /// `bytes`: dynamically sized byte string.
    Bytes,
    /// `string`: dynamically sized UTF-8 string.
    String,
    /// `T[]`: dynamically sized array of a single element type.
    Array(Box<ParamType>),
}

impl ParamType {
    /// Whether values of this type use tail (offset-indirected) encoding.
    #[must_use]
    pub fn is_dynamic(&self) -> bool {
        matches!(self, Self::Bytes | Self::String | Self::Array(_))
    }

    /// Parses a Solidity type string such as `"uint256"`, `"bytes32"`, or
    /// `"address[]"`.
    ///
    /// # Errors
    ///
    /// Returns `AbiError::UnsupportedType` for anything outside the codec's
    /// type subset (signed integers, tuples, fixed-size arrays, ...).
    pub fn parse(s: &str) -> AbiResult<Self> {
        if let Some(inner) = s.strip_suffix("[]") {
            return Ok(Self::Array(Box::new(Self::parse(inner)?)));
        }

        match s {
            "address" => return Ok(Self::Address),
            "bool" => return Ok(Self::Bool),
            "bytes" => return Ok(Self::Bytes),
            "string" => return Ok(Self::String),
            "uint" => return Ok(Self::Uint(256)),
            _ => {}
        }

        if let Some(width) = s.strip_prefix("uint") {
            if let Ok(bits) = width.parse::<usize>() {
                if bits >= 8 && bits <= 256 && bits % 8 == 0 {
                    return Ok(Self::Uint(bits));
                }
            }
        }

        if let Some(len) = s.strip_prefix("bytes") {
            if let Ok(len) = len.parse::<usize>() {
                if len >= 1 && len <= 32 {
                    return Ok(Self::FixedBytes(len));
                }
            }
        }

        Err(AbiError::UnsupportedType {
            type_name: s.to_string(),
        })
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address => write!(f, "address"),
            Self::Uint(bits) => write!(f, "uint{bits}"),
            Self::Bool => write!(f, "bool"),
            Self::FixedBytes(len) => write!(f, "bytes{len}"),
            Self::Bytes => write!(f, "bytes"),
            Self::String => write!(f, "string"),
            Self::Array(inner) => write!(f, "{inner}[]"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_elementary_types() {
        assert_eq!(ParamType::parse("address").unwrap(), ParamType::Address);
        assert_eq!(ParamType::parse("bool").unwrap(), ParamType::Bool);
        assert_eq!(ParamType::parse("bytes").unwrap(), ParamType::Bytes);
        assert_eq!(ParamType::parse("string").unwrap(), ParamType::String);
        assert_eq!(ParamType::parse("uint").unwrap(), ParamType::Uint(256));
        assert_eq!(ParamType::parse("uint8").unwrap(), ParamType::Uint(8));
        assert_eq!(ParamType::parse("bytes32").unwrap(), ParamType::FixedBytes(32));
    }

    #[test]
    fn test_parse_arrays() {
        assert_eq!(
            ParamType::parse("uint256[]").unwrap(),
            ParamType::Array(Box::new(ParamType::Uint(256)))
        );
        assert_eq!(
            ParamType::parse("string[]").unwrap(),
            ParamType::Array(Box::new(ParamType::String))
        );
    }

    #[test]
    fn test_parse_rejects_unsupported() {
        for bad in ["int256", "uint7", "uint264", "bytes0", "bytes33", "tuple", ""] {
            assert!(
                matches!(ParamType::parse(bad), Err(AbiError::UnsupportedType { .. })),
                "expected rejection for {bad:?}"
            );
        }
    }

    #[test]
    fn test_display_roundtrip() {
        for s in ["address", "uint256", "bool", "bytes4", "bytes", "string", "uint8[]"] {
            assert_eq!(ParamType::parse(s).unwrap().to_string(), s);
        }
    }
}
