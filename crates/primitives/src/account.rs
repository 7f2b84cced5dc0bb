//! Accounts: an address paired with its secret signing capability.

use crate::address::EthAddress;
use crate::error::{PrimitiveError, PrimitiveResult};
use k256::ecdsa::SigningKey;
use sha3::{Digest, Keccak256};
use std::fmt;

/// The length of a secret key in bytes.
pub const SECRET_KEY_SIZE: usize = 32;

/// A 32-byte secp256k1 secret key.
///
/// The key is carried opaquely so the ledger client can sign with it; the
/// pipeline itself never reads it. `Debug` is redacted and the type is
/// deliberately not serializable.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey([u8; SECRET_KEY_SIZE]);

impl SecretKey {
    /// Wraps raw key bytes.
    ///
    /// # Errors
    ///
    /// Returns `PrimitiveError::InvalidSecretKey` if the scalar is zero or
    /// not a valid secp256k1 key.
    pub fn from_bytes(value: &[u8]) -> PrimitiveResult<Self> {
        if value.len() != SECRET_KEY_SIZE {
            return Err(PrimitiveError::InvalidLength {
                expected: SECRET_KEY_SIZE,
                actual: value.len(),
            });
        }
        // Reject scalars the curve implementation would refuse to sign with.
        SigningKey::from_slice(value).map_err(|_| PrimitiveError::InvalidSecretKey)?;

        let mut bytes = [0u8; SECRET_KEY_SIZE];
        bytes.copy_from_slice(value);
        Ok(Self(bytes))
    }

    /// Returns the raw key bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey(..)")
    }
}

/// An account: address plus secret key, immutable once constructed.
///
/// Owned by the caller. The pipeline hands a reference to the ledger client
/// for the single call that needs to sign, and retains nothing afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    address: EthAddress,
    secret: SecretKey,
}

impl Account {
    /// Builds an account from a secret key, deriving the address from the
    /// uncompressed public key (Keccak-256, last 20 bytes).
    ///
    /// # Errors
    ///
    /// Returns `PrimitiveError::InvalidSecretKey` if the key is not a valid
    /// secp256k1 scalar.
    pub fn from_secret(secret: SecretKey) -> PrimitiveResult<Self> {
        let signing =
            SigningKey::from_slice(secret.as_bytes()).map_err(|_| PrimitiveError::InvalidSecretKey)?;
        let point = signing.verifying_key().to_encoded_point(false);
        // Skip the 0x04 SEC1 tag; hash the 64-byte coordinate pair.
        let digest = Keccak256::digest(&point.as_bytes()[1..]);
        let address = EthAddress::from_bytes(&digest[12..])?;
        Ok(Self { address, secret })
    }

    /// The account's address.
    #[inline]
    #[must_use]
    pub fn address(&self) -> EthAddress {
        self.address
    }

    /// The account's secret key, for delegated signing.
    #[inline]
    #[must_use]
    pub fn secret(&self) -> &SecretKey {
        &self.secret
    }
}
