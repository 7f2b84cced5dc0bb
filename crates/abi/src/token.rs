//! Runtime argument values for the ABI codec.

use crate::param_type::ParamType;
use ethpipe_primitives::EthAddress;
use num_bigint::BigUint;
use std::fmt;

/// A runtime value matching a [`ParamType`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// An address value.
    Address(EthAddress),
    /// An unsigned integer value.
    Uint(BigUint),
    /// A boolean value.
    Bool(bool),
    /// A fixed-size byte string (1..=32 bytes).
    FixedBytes(Vec<u8>),
    /// A dynamically sized byte string.
    Bytes(Vec<u8>),
    /// A UTF-8 string.
    String(String),
    /// An array of homogeneous tokens.
    Array(Vec<Token>),
}

impl Token {
    /// Whether this token uses tail (offset-indirected) encoding.
    #[must_use]
    pub fn is_dynamic(&self) -> bool {
        matches!(self, Self::Bytes(_) | Self::String(_) | Self::Array(_))
    }

    /// Checks that this token is a valid value of the given type, including
    /// integer range and fixed-bytes length.
    #[must_use]
    pub fn type_check(&self, ty: &ParamType) -> bool {
        match (self, ty) {
            (Self::Address(_), ParamType::Address) => true,
            (Self::Uint(value), ParamType::Uint(bits)) => value.bits() as usize <= *bits,
            (Self::Bool(_), ParamType::Bool) => true,
            (Self::FixedBytes(bytes), ParamType::FixedBytes(len)) => bytes.len() == *len,
            (Self::Bytes(_), ParamType::Bytes) => true,
            (Self::String(_), ParamType::String) => true,
            (Self::Array(items), ParamType::Array(inner)) => {
                items.iter().all(|item| item.type_check(inner))
            }
            _ => false,
        }
    }

    /// Convenience constructor for small unsigned integers.
    #[must_use]
    pub fn uint(value: u64) -> Self {
        Self::Uint(BigUint::from(value))
    }
}

// Display mirrors the Solidity literal forms closely enough for log output.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address(addr) => write!(f, "{addr}"),
            Self::Uint(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::FixedBytes(bytes) | Self::Bytes(bytes) => {
                write!(f, "0x")?;
                for b in bytes {
                    write!(f, "{b:02x}")?;
                }
                Ok(())
            }
            Self::String(s) => write!(f, "{s:?}"),
            Self::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_check_matches() {
        assert!(Token::Bool(true).type_check(&ParamType::Bool));
        assert!(Token::uint(7).type_check(&ParamType::Uint(8)));
        assert!(Token::Address(EthAddress::zero()).type_check(&ParamType::Address));
        assert!(Token::FixedBytes(vec![0; 4]).type_check(&ParamType::FixedBytes(4)));
    }

    #[test]
    fn test_type_check_range() {
        // 256 does not fit uint8.
        assert!(!Token::uint(256).type_check(&ParamType::Uint(8)));
        assert!(Token::uint(255).type_check(&ParamType::Uint(8)));
    }

    #[test]
    fn test_type_check_rejects_mismatches() {
        assert!(!Token::Bool(true).type_check(&ParamType::Uint(8)));
        assert!(!Token::FixedBytes(vec![0; 3]).type_check(&ParamType::FixedBytes(4)));
        assert!(!Token::Array(vec![Token::Bool(true), Token::uint(1)])
            .type_check(&ParamType::Array(Box::new(ParamType::Bool))));
    }
}
