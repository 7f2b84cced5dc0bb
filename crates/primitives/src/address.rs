//! Implementation of `EthAddress`, a 20-byte account or contract identifier.

use crate::error::{PrimitiveError, PrimitiveResult};
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};
use std::fmt;
use std::str::FromStr;

/// The length of an address in bytes.
pub const ADDRESS_SIZE: usize = 20;

/// A 20-byte account or contract address.
///
/// `EthAddress` is a plain value type: `Copy`, totally ordered, and hashable,
/// so it can serve as a map key. `Display` renders the EIP-55 checksummed
/// form.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EthAddress([u8; ADDRESS_SIZE]);

impl EthAddress {
    /// Alias for the byte length of an address.
    pub const LENGTH: usize = ADDRESS_SIZE;

    /// Returns the all-zero address.
    #[inline]
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }

    /// Checks whether every byte of the address is zero.
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    /// Creates an address from a byte slice.
    ///
    /// # Errors
    ///
    /// Returns `PrimitiveError::InvalidLength` if the slice is not exactly
    /// 20 bytes.
    pub fn from_bytes(value: &[u8]) -> PrimitiveResult<Self> {
        if value.len() != ADDRESS_SIZE {
            return Err(PrimitiveError::InvalidLength {
                expected: ADDRESS_SIZE,
                actual: value.len(),
            });
        }
        let mut bytes = [0u8; ADDRESS_SIZE];
        bytes.copy_from_slice(value);
        Ok(Self(bytes))
    }

    /// Returns the address bytes as a slice.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the address as a fixed-size byte array.
    #[inline]
    #[must_use]
    pub fn to_fixed_bytes(&self) -> [u8; ADDRESS_SIZE] {
        self.0
    }

    /// Parses an address from a hexadecimal string, with or without a
    /// `0x` prefix. Mixed-case input is accepted as-is; checksum casing is
    /// not enforced on input.
    ///
    /// # Errors
    ///
    /// Returns `PrimitiveError::InvalidHex` if the string is not 40 hex
    /// characters after the optional prefix.
    pub fn parse(s: &str) -> PrimitiveResult<Self> {
        let s = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);

        if s.len() != ADDRESS_SIZE * 2 {
            return Err(PrimitiveError::InvalidHex {
                message: format!("expected 40 hex characters, got {}", s.len()),
            });
        }

        let bytes = hex::decode(s).map_err(|e| PrimitiveError::InvalidHex {
            message: e.to_string(),
        })?;
        Self::from_bytes(&bytes)
    }

    /// Renders the address in EIP-55 checksummed form, with a `0x` prefix.
    #[must_use]
    pub fn to_checksum_string(&self) -> String {
        let lower = hex::encode(self.0);
        let digest = Keccak256::digest(lower.as_bytes());

        let mut out = String::with_capacity(2 + ADDRESS_SIZE * 2);
        out.push_str("0x");
        for (i, c) in lower.chars().enumerate() {
            let nibble = if i % 2 == 0 {
                digest[i / 2] >> 4
            } else {
                digest[i / 2] & 0x0f
            };
            if c.is_ascii_alphabetic() && nibble >= 8 {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
        }
        out
    }
}

impl FromStr for EthAddress {
    type Err = PrimitiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<[u8; ADDRESS_SIZE]> for EthAddress {
    fn from(bytes: [u8; ADDRESS_SIZE]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for EthAddress {
    type Error = PrimitiveError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(value)
    }
}

impl AsRef<[u8]> for EthAddress {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for EthAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_checksum_string())
    }
}

impl fmt::Debug for EthAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EthAddress({})", self.to_checksum_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero_address() {
        let addr = EthAddress::zero();
        assert!(addr.is_zero());
        assert_eq!(addr.as_bytes(), &[0u8; ADDRESS_SIZE]);
    }

    #[test]
    fn test_from_bytes_rejects_bad_length() {
        let result = EthAddress::from_bytes(&[1u8; 19]);
        assert!(matches!(
            result,
            Err(PrimitiveError::InvalidLength {
                expected: 20,
                actual: 19
            })
        ));
    }

    #[test]
    fn test_parse_with_and_without_prefix() {
        let with = EthAddress::parse("0x52908400098527886e0f7030069857d2e4169ee7").unwrap();
        let without = EthAddress::parse("52908400098527886e0f7030069857d2e4169ee7").unwrap();
        assert_eq!(with, without);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(EthAddress::parse("0x1234").is_err());
        assert!(EthAddress::parse("zz908400098527886e0f7030069857d2e4169ee7").is_err());
    }

    // EIP-55 reference vectors.
    #[test]
    fn test_checksum_vectors() {
        let cases = [
            "0x52908400098527886E0F7030069857D2E4169EE7",
            "0x8617E340B3D01FA5F11F306F4090FD50E238070D",
            "0xde709f2102306220921060314715629080e2fb77",
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
            "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
        ];
        for expected in cases {
            let addr = EthAddress::parse(expected).unwrap();
            assert_eq!(addr.to_checksum_string(), expected);
        }
    }

    proptest! {
        #[test]
        fn test_bytes_roundtrip(bytes in any::<[u8; ADDRESS_SIZE]>()) {
            let addr = EthAddress::from(bytes);
            prop_assert_eq!(addr.to_fixed_bytes(), bytes);
            prop_assert_eq!(EthAddress::from_bytes(&bytes).unwrap(), addr);
        }

        #[test]
        fn test_hex_roundtrip(bytes in any::<[u8; ADDRESS_SIZE]>()) {
            let addr = EthAddress::from(bytes);
            let parsed = EthAddress::parse(&addr.to_checksum_string()).unwrap();
            prop_assert_eq!(parsed, addr);
        }

        #[test]
        fn test_is_zero_correct(bytes in any::<[u8; ADDRESS_SIZE]>()) {
            let addr = EthAddress::from(bytes);
            prop_assert_eq!(addr.is_zero(), bytes.iter().all(|&b| b == 0));
        }
    }
}
