//! Error types for the submission and confirmation pipeline.

use ethpipe_abi::AbiError;
use ethpipe_primitives::EthAddress;
use thiserror::Error;

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, ChainError>;

/// Errors surfaced by the pipeline.
///
/// Every variant is a distinct, inspectable outcome; nothing is swallowed
/// and nothing is retried automatically. Re-submitting with a stale nonce
/// would break the nonce tracker's invariant, so retry policy belongs to
/// the caller.
#[derive(Debug, Error)]
pub enum ChainError {
    /// The compiler reported failure, produced no contract of the requested
    /// name, or produced an empty binary.
    #[error("contract compilation failed: {0}")]
    Compilation(String),

    /// Constructor arguments were supplied that the ABI cannot accept.
    #[error("constructor mismatch: {0}")]
    ConstructorMismatch(String),

    /// The side-storage publisher failed. Deployment logs this and
    /// continues; the variant is surfaced by direct metadata operations.
    #[error("metadata publish failed: {0}")]
    MetadataPublish(String),

    /// The ledger client has not opened its readiness gate, or has been
    /// shut down. Callers should wait on the readiness signal.
    #[error("ledger client is not available")]
    LedgerUnavailable,

    /// Transaction signing failed; fatal for this call.
    #[error("transaction signing failed: {0}")]
    Signing(String),

    /// No matching receipt was observed within the block window. The
    /// transaction may still confirm later out-of-band.
    #[error("no receipt within {window} blocks after block {baseline}")]
    TransactionTimeout {
        /// Best block height captured at submission time.
        baseline: u64,
        /// Number of blocks waited past the baseline.
        window: u64,
    },

    /// A receipt was found but carries an error marker.
    #[error("execution reverted: {0}")]
    ExecutionReverted(String),

    /// No contract code is deployed at the queried address.
    #[error("no contract code at {0}")]
    CodeMissing(EthAddress),

    /// ABI parsing or encoding failed.
    #[error(transparent)]
    Abi(#[from] AbiError),

    /// The ledger client reported an error.
    #[error("ledger error: {0}")]
    Ledger(String),
}
