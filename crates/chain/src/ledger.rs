//! The ledger client collaborator interface and its wire types.

use crate::error::Result;
use async_trait::async_trait;
use ethpipe_primitives::{Account, EthAddress, EthValue, TxHash};
use std::sync::Arc;
use tokio::sync::broadcast;

/// A transaction to be signed and dispatched by the ledger client.
///
/// An absent destination signals contract creation. The request is handed
/// to the client once and never mutated afterwards; the client derives the
/// hash during signing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxRequest {
    /// Per-account sequence number allocated by the nonce tracker.
    pub nonce: u64,
    /// Gas price in wei per unit.
    pub gas_price: u64,
    /// Gas limit for execution.
    pub gas_limit: u64,
    /// Destination; `None` creates a contract.
    pub to: Option<EthAddress>,
    /// Transferred value.
    pub value: EthValue,
    /// Call data or contract creation payload.
    pub payload: Vec<u8>,
}

impl TxRequest {
    /// Whether this request creates a contract.
    #[must_use]
    pub fn is_contract_creation(&self) -> bool {
        self.to.is_none()
    }
}

/// The ledger-produced record of a mined transaction's outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
    /// Hash of the mined transaction.
    pub tx_hash: TxHash,
    /// Address of the created contract, for creation transactions.
    pub contract_address: Option<EthAddress>,
    /// Return data of the execution.
    pub return_data: Vec<u8>,
    /// Gas consumed.
    pub gas_used: u64,
    /// Error marker; `Some` means the execution failed.
    pub error: Option<String>,
}

impl TxReceipt {
    /// Whether the receipt carries an error marker.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

/// A block-arrival notification bundling the receipts mined in that block.
///
/// Events are delivered in non-decreasing block-number order and are not
/// retained beyond the watcher's matching pass.
#[derive(Debug, Clone)]
pub struct BlockEvent {
    /// Height of the newly produced block.
    pub number: u64,
    /// Receipts mined in this block, in execution order.
    pub receipts: Arc<Vec<TxReceipt>>,
}

/// A snapshot of the current best block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockInfo {
    /// Height of the best block.
    pub number: u64,
    /// Gas limit of the best block, used as the default for submissions
    /// that do not specify one.
    pub gas_limit: u64,
}

/// The external component that holds account and contract state, accepts
/// signed transactions, and emits block notifications.
///
/// The pipeline consumes this interface; it never owns or re-implements
/// ledger behavior. All state-changing paths flow through
/// [`sign_and_submit`](LedgerClient::sign_and_submit).
#[async_trait]
pub trait LedgerClient: Send + Sync + 'static {
    /// Resolves once the client's initial chain sync completes, and
    /// immediately forever after.
    async fn wait_ready(&self);

    /// Current best block height and gas limit.
    async fn best_block(&self) -> Result<BlockInfo>;

    /// Current gas price in wei per unit.
    async fn gas_price(&self) -> Result<u64>;

    /// Last confirmed nonce for an address.
    async fn confirmed_nonce(&self, address: EthAddress) -> Result<u64>;

    /// Balance of an address.
    async fn balance(&self, address: EthAddress) -> Result<EthValue>;

    /// Code deployed at an address; empty if none.
    async fn code(&self, address: EthAddress) -> Result<Vec<u8>>;

    /// Whether an address exists in the ledger state.
    async fn exists(&self, address: EthAddress) -> Result<bool>;

    /// Constructs, signs, and submits a transaction, returning its hash.
    ///
    /// # Errors
    ///
    /// `ChainError::Signing` if the account cannot sign the request.
    async fn sign_and_submit(&self, request: TxRequest, sender: &Account) -> Result<TxHash>;

    /// Subscribes to the live block notification stream.
    ///
    /// The stream reflects real-time chain progress and is not restartable;
    /// subscribers receive every block produced after the subscription.
    fn subscribe_blocks(&self) -> broadcast::Receiver<BlockEvent>;

    /// Releases the client. Called once, from facade shutdown.
    async fn close(&self);
}
