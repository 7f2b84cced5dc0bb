//! # ethpipe Primitives
//!
//! Fundamental value types shared across the ethpipe workspace:
//!
//! - `EthAddress`: 20-byte account/contract identifier (EIP-55 display)
//! - `TxHash`: 32-byte transaction hash, the confirmation correlation key
//! - `EthValue`: wei-denominated amount
//! - `Account`: an address paired with its secret signing capability
//!
//! ## Design Principles
//!
//! - No dependencies on the other ethpipe crates
//! - Cheap `Copy` value types usable as map keys (stable `Eq`/`Hash`)
//! - Key material is held opaquely and never printed or serialized
//!
//! ## Example
//!
//! ```rust
//! use ethpipe_primitives::{EthAddress, EthValue};
//!
//! let addr = EthAddress::parse("0x52908400098527886e0f7030069857d2e4169ee7").unwrap();
//! assert!(!addr.is_zero());
//! let amount = EthValue::ether(2) + EthValue::wei(5);
//! assert_eq!(amount.in_wei(), 2_000_000_000_000_000_000u128 + 5);
//! ```

pub mod account;
pub mod address;
pub mod error;
pub mod hash;
pub mod value;

// Re-exports
pub use account::{Account, SecretKey};
pub use address::{EthAddress, ADDRESS_SIZE};
pub use error::{PrimitiveError, PrimitiveResult};
pub use hash::{TxHash, TX_HASH_SIZE};
pub use value::EthValue;
