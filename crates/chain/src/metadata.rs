//! The content-addressed side-storage collaborator interface.

use crate::error::Result;
use async_trait::async_trait;
use std::fmt;

/// A content address returned by the side store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentAddress(String);

impl ContentAddress {
    /// Wraps a store-produced content address.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// The address string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Content-addressed auxiliary metadata storage, independent of the ledger.
///
/// Publication during deployment is best-effort: the orchestrator publishes
/// before submitting the creation transaction and does not roll back a
/// published blob if the submission subsequently fails.
#[async_trait]
pub trait MetadataStore: Send + Sync + 'static {
    /// Publishes a metadata blob, returning its content address.
    ///
    /// # Errors
    ///
    /// `ChainError::MetadataPublish` on I/O failure.
    async fn publish(&self, blob: &[u8]) -> Result<ContentAddress>;

    /// Fetches a previously published blob.
    async fn fetch(&self, address: &ContentAddress) -> Result<Vec<u8>>;
}
