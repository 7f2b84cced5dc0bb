//! Implementation of `EthValue`, a wei-denominated amount.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

/// Wei per ether.
const WEI_PER_ETHER: u128 = 1_000_000_000_000_000_000;

/// An amount of ether, stored in wei.
///
/// `u128` comfortably covers the total wei supply. Arithmetic is checked in
/// debug builds via the standard `Add` overflow semantics.
#[derive(
    Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Debug,
)]
pub struct EthValue(u128);

impl EthValue {
    /// Creates a value from a raw wei amount.
    #[inline]
    #[must_use]
    pub const fn wei(amount: u128) -> Self {
        Self(amount)
    }

    /// Creates a value from a whole-ether amount.
    #[inline]
    #[must_use]
    pub const fn ether(amount: u64) -> Self {
        Self(amount as u128 * WEI_PER_ETHER)
    }

    /// Returns the zero value.
    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Checks whether the value is zero.
    #[inline]
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Returns the amount in wei.
    #[inline]
    #[must_use]
    pub const fn in_wei(&self) -> u128 {
        self.0
    }
}

impl Add for EthValue {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sum for EthValue {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

impl From<u128> for EthValue {
    fn from(wei: u128) -> Self {
        Self(wei)
    }
}

impl fmt::Display for EthValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} wei", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ether_to_wei() {
        assert_eq!(EthValue::ether(1).in_wei(), WEI_PER_ETHER);
        assert_eq!(EthValue::ether(0), EthValue::zero());
    }

    #[test]
    fn test_add_and_sum() {
        let total: EthValue = [EthValue::wei(1), EthValue::wei(2), EthValue::wei(3)]
            .into_iter()
            .sum();
        assert_eq!(total, EthValue::wei(6));
        assert_eq!(EthValue::ether(1) + EthValue::wei(1), EthValue::wei(WEI_PER_ETHER + 1));
    }

    #[test]
    fn test_ordering() {
        assert!(EthValue::ether(1) > EthValue::wei(1));
        assert!(EthValue::zero().is_zero());
    }
}
