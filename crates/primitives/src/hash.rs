//! Implementation of `TxHash`, a 32-byte transaction hash.

use crate::error::{PrimitiveError, PrimitiveResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The length of a transaction hash in bytes.
pub const TX_HASH_SIZE: usize = 32;

/// A 32-byte transaction hash.
///
/// The hash is assigned by the ledger client when a transaction is signed
/// and submitted. It is the key the confirmation watcher uses to correlate
/// block receipts back to a submission.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TxHash([u8; TX_HASH_SIZE]);

impl TxHash {
    /// Returns the all-zero hash.
    #[inline]
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }

    /// Checks whether every byte of the hash is zero.
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    /// Creates a hash from a byte slice.
    ///
    /// # Errors
    ///
    /// Returns `PrimitiveError::InvalidLength` if the slice is not exactly
    /// 32 bytes.
    pub fn from_bytes(value: &[u8]) -> PrimitiveResult<Self> {
        if value.len() != TX_HASH_SIZE {
            return Err(PrimitiveError::InvalidLength {
                expected: TX_HASH_SIZE,
                actual: value.len(),
            });
        }
        let mut bytes = [0u8; TX_HASH_SIZE];
        bytes.copy_from_slice(value);
        Ok(Self(bytes))
    }

    /// Returns the hash bytes as a slice.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the hash as a fixed-size byte array.
    #[inline]
    #[must_use]
    pub fn to_fixed_bytes(&self) -> [u8; TX_HASH_SIZE] {
        self.0
    }

    /// Parses a hash from a hexadecimal string, with or without a `0x`
    /// prefix.
    ///
    /// # Errors
    ///
    /// Returns `PrimitiveError::InvalidHex` if the string is not 64 hex
    /// characters after the optional prefix.
    pub fn parse(s: &str) -> PrimitiveResult<Self> {
        let s = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);

        if s.len() != TX_HASH_SIZE * 2 {
            return Err(PrimitiveError::InvalidHex {
                message: format!("expected 64 hex characters, got {}", s.len()),
            });
        }

        let bytes = hex::decode(s).map_err(|e| PrimitiveError::InvalidHex {
            message: e.to_string(),
        })?;
        Self::from_bytes(&bytes)
    }

    /// Renders the hash as lowercase hex with a `0x` prefix.
    #[inline]
    #[must_use]
    pub fn to_hex_string(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl FromStr for TxHash {
    type Err = PrimitiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<[u8; TX_HASH_SIZE]> for TxHash {
    fn from(bytes: [u8; TX_HASH_SIZE]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for TxHash {
    type Error = PrimitiveError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(value)
    }
}

impl AsRef<[u8]> for TxHash {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex_string())
    }
}

impl fmt::Debug for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxHash({})", self.to_hex_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero_hash() {
        assert!(TxHash::zero().is_zero());
    }

    #[test]
    fn test_from_bytes_rejects_bad_length() {
        assert!(TxHash::from_bytes(&[0u8; 31]).is_err());
        assert!(TxHash::from_bytes(&[0u8; 33]).is_err());
    }

    #[test]
    fn test_parse_display_roundtrip() {
        let s = "0x00112233445566778899aabbccddeeff00112233445566778899aabbccddeeff";
        let hash = TxHash::parse(s).unwrap();
        assert_eq!(hash.to_hex_string(), s);
    }

    proptest! {
        #[test]
        fn test_bytes_roundtrip(bytes in any::<[u8; TX_HASH_SIZE]>()) {
            let hash = TxHash::from(bytes);
            prop_assert_eq!(hash.to_fixed_bytes(), bytes);
            prop_assert_eq!(TxHash::parse(&hash.to_hex_string()).unwrap(), hash);
        }
    }
}
