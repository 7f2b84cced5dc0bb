//! Per-transaction confirmation watchers.

use crate::error::{ChainError, Result};
use crate::ledger::BlockEvent;
use crate::nonce::NonceTracker;
use ethpipe_primitives::{EthAddress, TxHash};
use std::sync::Arc;
use tokio::sync::{broadcast, oneshot};
use tracing::{debug, warn};

/// The successful result of a mined transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxConfirmation {
    /// Block in which the transaction was mined.
    pub block_number: u64,
    /// Gas consumed by the execution.
    pub gas_used: u64,
    /// Return data of the execution.
    pub return_data: Vec<u8>,
    /// Address of the created contract, for creation transactions.
    pub contract_address: Option<EthAddress>,
}

/// The terminal outcome of a dispatched transaction.
///
/// Timeout is a distinguished outcome rather than a generic error: the
/// transaction left the pipeline's observation window but may still be
/// mined later out-of-band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxOutcome {
    /// A receipt matched and carried no error marker.
    Confirmed(TxConfirmation),
    /// A receipt matched but the execution failed.
    Reverted {
        /// Receipt-derived error detail.
        error: String,
        /// Block in which the failing transaction was mined.
        block_number: u64,
    },
    /// No matching receipt within the block window.
    TimedOut {
        /// Best block height captured at submission time.
        baseline: u64,
        /// Number of blocks waited past the baseline.
        window: u64,
    },
}

impl TxOutcome {
    /// Converts the outcome into a `Result`, mapping the failure arms onto
    /// [`ChainError::ExecutionReverted`] and
    /// [`ChainError::TransactionTimeout`].
    pub fn into_result(self) -> Result<TxConfirmation> {
        match self {
            Self::Confirmed(confirmation) => Ok(confirmation),
            Self::Reverted { error, .. } => Err(ChainError::ExecutionReverted(error)),
            Self::TimedOut { baseline, window } => {
                Err(ChainError::TransactionTimeout { baseline, window })
            }
        }
    }
}

/// Handle to a dispatched transaction awaiting its terminal outcome.
///
/// Exactly one watcher task tracks the transaction until it resolves; the
/// handle is the receiving side of that resolution.
#[derive(Debug)]
pub struct PendingTx {
    hash: TxHash,
    baseline: u64,
    outcome: oneshot::Receiver<TxOutcome>,
}

impl PendingTx {
    /// The submitted transaction's hash.
    #[must_use]
    pub fn hash(&self) -> TxHash {
        self.hash
    }

    /// Best block height captured at submission time; the watcher's wait
    /// window starts here.
    #[must_use]
    pub fn baseline(&self) -> u64 {
        self.baseline
    }

    /// Awaits the transaction's terminal outcome.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::Ledger`] if the watcher task was torn down
    /// without resolving, which only happens when the runtime shuts down.
    pub async fn outcome(self) -> Result<TxOutcome> {
        self.outcome
            .await
            .map_err(|_| ChainError::Ledger("confirmation watcher dropped".to_string()))
    }

    /// Awaits the outcome and converts it with [`TxOutcome::into_result`].
    pub async fn confirmation(self) -> Result<TxConfirmation> {
        self.outcome().await?.into_result()
    }
}

/// Spawns the confirmation watcher for a dispatched transaction and returns
/// the caller's handle.
///
/// The subscription must have been created before the transaction was
/// dispatched, so the matching block cannot slip past between dispatch and
/// watch. The watcher consumes the stream only until resolution; dropping
/// the receiver afterwards is the unsubscribe.
pub(crate) fn spawn(
    events: broadcast::Receiver<BlockEvent>,
    hash: TxHash,
    sender: EthAddress,
    baseline: u64,
    window: u64,
    tracker: Arc<NonceTracker>,
) -> PendingTx {
    let (outcome_tx, outcome_rx) = oneshot::channel();

    tokio::spawn(async move {
        let outcome = watch(events, hash, baseline, window).await;
        // Terminal state reached: the pending slot is released exactly once,
        // whether or not anyone still holds the handle.
        tracker.release(sender);
        let _ = outcome_tx.send(outcome);
    });

    PendingTx {
        hash,
        baseline,
        outcome: outcome_rx,
    }
}

async fn watch(
    mut events: broadcast::Receiver<BlockEvent>,
    hash: TxHash,
    baseline: u64,
    window: u64,
) -> TxOutcome {
    loop {
        let event = match events.recv().await {
            Ok(event) => event,
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!(%hash, skipped, "block stream lagged; continuing");
                continue;
            }
            Err(broadcast::error::RecvError::Closed) => {
                warn!(%hash, baseline, "block stream closed before resolution");
                return TxOutcome::TimedOut { baseline, window };
            }
        };

        // Blocks below the baseline predate the submission.
        if event.number < baseline {
            continue;
        }

        // The match is checked first: a receipt in the block that crosses
        // the window boundary still wins over timeout.
        if let Some(receipt) = event.receipts.iter().find(|r| r.tx_hash == hash) {
            return match &receipt.error {
                Some(error) => {
                    debug!(%hash, block = event.number, error, "transaction reverted");
                    TxOutcome::Reverted {
                        error: error.clone(),
                        block_number: event.number,
                    }
                }
                None => {
                    debug!(%hash, block = event.number, "transaction confirmed");
                    TxOutcome::Confirmed(TxConfirmation {
                        block_number: event.number,
                        gas_used: receipt.gas_used,
                        return_data: receipt.return_data.clone(),
                        contract_address: receipt.contract_address,
                    })
                }
            };
        }

        if event.number > baseline + window {
            debug!(%hash, baseline, window, "confirmation window expired");
            return TxOutcome::TimedOut { baseline, window };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::TxReceipt;

    fn hash(byte: u8) -> TxHash {
        TxHash::from([byte; 32])
    }

    fn receipt_for(hash: TxHash) -> TxReceipt {
        TxReceipt {
            tx_hash: hash,
            contract_address: None,
            return_data: vec![0xaa],
            gas_used: 21_000,
            error: None,
        }
    }

    fn block(number: u64, receipts: Vec<TxReceipt>) -> BlockEvent {
        BlockEvent {
            number,
            receipts: Arc::new(receipts),
        }
    }

    #[tokio::test]
    async fn test_match_resolves_confirmed() {
        let (tx, rx) = broadcast::channel(16);
        let target = hash(1);

        tx.send(block(5, vec![])).unwrap();
        tx.send(block(6, vec![receipt_for(hash(2)), receipt_for(target)]))
            .unwrap();

        let outcome = watch(rx, target, 4, 16).await;
        assert_eq!(
            outcome,
            TxOutcome::Confirmed(TxConfirmation {
                block_number: 6,
                gas_used: 21_000,
                return_data: vec![0xaa],
                contract_address: None,
            })
        );
    }

    #[tokio::test]
    async fn test_error_receipt_resolves_reverted() {
        let (tx, rx) = broadcast::channel(16);
        let target = hash(3);

        let mut receipt = receipt_for(target);
        receipt.error = Some("out of gas".to_string());
        tx.send(block(10, vec![receipt])).unwrap();

        let outcome = watch(rx, target, 9, 16).await;
        assert_eq!(
            outcome,
            TxOutcome::Reverted {
                error: "out of gas".to_string(),
                block_number: 10,
            }
        );
    }

    #[tokio::test]
    async fn test_timeout_exactly_past_window() {
        let (tx, rx) = broadcast::channel(64);
        let target = hash(4);
        let baseline = 100;

        // Blocks up to and including baseline + 16 keep the watcher alive.
        for number in baseline..=baseline + 16 {
            tx.send(block(number, vec![])).unwrap();
        }
        tx.send(block(baseline + 17, vec![])).unwrap();

        let outcome = watch(rx, target, baseline, 16).await;
        assert_eq!(
            outcome,
            TxOutcome::TimedOut {
                baseline,
                window: 16,
            }
        );
    }

    #[tokio::test]
    async fn test_match_wins_over_timeout_in_boundary_block() {
        let (tx, rx) = broadcast::channel(16);
        let target = hash(5);

        // The matching block is already past the window boundary.
        tx.send(block(30, vec![receipt_for(target)])).unwrap();

        let outcome = watch(rx, target, 2, 16).await;
        assert!(matches!(outcome, TxOutcome::Confirmed(_)));
    }

    #[tokio::test]
    async fn test_blocks_below_baseline_are_ignored() {
        let (tx, rx) = broadcast::channel(16);
        let target = hash(6);

        // A stale notification below the baseline must not time the
        // watcher out even with an inflated number gap afterwards.
        tx.send(block(1, vec![receipt_for(target)])).unwrap();
        tx.send(block(50, vec![receipt_for(target)])).unwrap();

        let outcome = watch(rx, target, 40, 16).await;
        assert!(matches!(
            outcome,
            TxOutcome::Confirmed(TxConfirmation {
                block_number: 50,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_closed_stream_resolves_timed_out() {
        let (tx, rx) = broadcast::channel(16);
        drop(tx);
        let outcome = watch(rx, hash(7), 0, 16).await;
        assert!(matches!(outcome, TxOutcome::TimedOut { .. }));
    }

    #[tokio::test]
    async fn test_into_result_mapping() {
        assert!(matches!(
            TxOutcome::TimedOut {
                baseline: 1,
                window: 16
            }
            .into_result(),
            Err(ChainError::TransactionTimeout { .. })
        ));
        assert!(matches!(
            TxOutcome::Reverted {
                error: "revert".into(),
                block_number: 2
            }
            .into_result(),
            Err(ChainError::ExecutionReverted(_))
        ));
    }

    #[tokio::test]
    async fn test_spawned_watcher_releases_pending_slot() {
        let tracker = Arc::new(NonceTracker::new());
        let sender = EthAddress::from([9u8; 20]);
        // Seed one pending slot as the submitter would.
        tracker.seed_pending(sender, 1);

        let (tx, rx) = broadcast::channel(16);
        let target = hash(8);
        let pending = spawn(rx, target, sender, 0, 16, tracker.clone());
        assert_eq!(pending.hash(), target);
        assert_eq!(pending.baseline(), 0);

        tx.send(block(1, vec![receipt_for(target)])).unwrap();
        let outcome = pending.outcome().await.unwrap();
        assert!(matches!(outcome, TxOutcome::Confirmed(_)));
        assert_eq!(tracker.pending(sender), 0);
    }
}
