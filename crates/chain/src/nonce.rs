//! Per-account nonce allocation.

use crate::error::Result;
use crate::ledger::LedgerClient;
use dashmap::DashMap;
use ethpipe_primitives::EthAddress;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tracing::warn;

/// Tracks, per account, how many submitted transactions have not yet
/// reached a terminal state, and allocates nonces as
/// `confirmed_nonce + pending_count`.
///
/// The counter's atomic fetch-add is the serialization point for an
/// address: N concurrent allocations yield exactly `base..base + N`, with
/// no duplicates and no gaps. Counters for different addresses never
/// contend. Entries are created lazily on first use and stay at zero when
/// idle; they are never removed.
#[derive(Debug, Default)]
pub struct NonceTracker {
    pending: DashMap<EthAddress, Arc<AtomicI64>>,
}

impl NonceTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates the next nonce for `address`: the ledger's confirmed nonce
    /// plus the pending count, incrementing the pending count atomically.
    ///
    /// The increment is optimistic; if the subsequent dispatch fails before
    /// a transaction hash exists, the caller must undo it with [`abort`].
    /// If the dispatch succeeds, the confirmation watcher releases it via
    /// [`release`] once the transaction reaches a terminal state.
    ///
    /// [`abort`]: NonceTracker::abort
    /// [`release`]: NonceTracker::release
    pub async fn allocate<L>(&self, ledger: &L, address: EthAddress) -> Result<u64>
    where
        L: LedgerClient + ?Sized,
    {
        let counter = self.counter(address);
        let prior = counter.fetch_add(1, Ordering::SeqCst);
        debug_assert!(prior >= 0, "pending count read below zero");

        match ledger.confirmed_nonce(address).await {
            Ok(confirmed) => Ok(confirmed + prior.max(0) as u64),
            Err(e) => {
                // The allocation never happened as far as callers are
                // concerned; roll the optimistic increment back.
                counter.fetch_sub(1, Ordering::SeqCst);
                Err(e)
            }
        }
    }

    /// Releases one pending slot after a transaction reached its terminal
    /// state (confirmed or timed out). Called exactly once per dispatched
    /// transaction.
    pub fn release(&self, address: EthAddress) {
        self.decrement(address, "release");
    }

    /// Undoes an allocation whose submission failed before a transaction
    /// hash existed.
    pub fn abort(&self, address: EthAddress) {
        self.decrement(address, "abort");
    }

    /// The number of outstanding transactions for `address`.
    #[must_use]
    pub fn pending(&self, address: EthAddress) -> u64 {
        self.pending
            .get(&address)
            .map(|counter| counter.load(Ordering::SeqCst).max(0) as u64)
            .unwrap_or(0)
    }

    fn counter(&self, address: EthAddress) -> Arc<AtomicI64> {
        self.pending
            .entry(address)
            .or_insert_with(|| Arc::new(AtomicI64::new(0)))
            .clone()
    }

    #[cfg(test)]
    pub(crate) fn seed_pending(&self, address: EthAddress, count: i64) {
        self.counter(address).store(count, Ordering::SeqCst);
    }

    fn decrement(&self, address: EthAddress, op: &str) {
        let counter = self.counter(address);
        let prior = counter.fetch_sub(1, Ordering::SeqCst);
        if prior <= 0 {
            // A terminal state was recorded more than once; that is a bug
            // in the caller, not a tolerated steady state.
            warn!(%address, op, prior, "pending count dropped below zero");
        }
    }
}
