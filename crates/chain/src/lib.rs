//! # ethpipe Chain
//!
//! The transaction submission and confirmation pipeline.
//!
//! This crate turns a signed ledger-mutating request into a durable,
//! observably-confirmed outcome on a chain whose block production is
//! asynchronous and whose finality is only probabilistic within a bounded
//! block window.
//!
//! ## Components
//!
//! - [`NonceTracker`]: per-account nonce allocation combining the ledger's
//!   confirmed nonce with locally outstanding submissions
//! - [`ReadyGate`]: one-shot process-wide gate; nothing is submitted before
//!   the ledger client finishes its initial sync
//! - [`ChainFacade`]: the caller-facing surface — submit, deploy, query,
//!   shutdown
//! - [`PendingTx`] / [`TxOutcome`]: the handle and terminal outcome of a
//!   dispatched transaction, resolved by a per-transaction confirmation
//!   watcher task
//!
//! ## Collaborators
//!
//! The pipeline consumes three external interfaces it does not own: a
//! [`LedgerClient`] (chain state, signing, block notifications), a
//! [`ContractCompiler`], and a [`MetadataStore`] (content-addressed side
//! storage for contract metadata).
//!
//! ## Control flow
//!
//! A state-changing call suspends on the readiness gate, allocates a nonce,
//! subscribes to the block stream, dispatches the signed transaction through
//! the ledger client, and spawns exactly one watcher task that correlates
//! incoming block receipts to the transaction hash. The watcher resolves
//! with a receipt-derived outcome, or with a distinguished timeout once the
//! chain advances more than [`config::DEFAULT_BLOCK_WINDOW`] blocks past the
//! submission baseline without a match.

pub mod compiler;
pub mod config;
pub mod deploy;
pub mod error;
pub mod facade;
pub mod gate;
pub mod ledger;
pub mod metadata;
pub mod nonce;
pub mod watcher;

// Re-exports
pub use compiler::{CompiledContract, ContractCompiler};
pub use config::ChainConfig;
pub use error::{ChainError, Result};
pub use facade::ChainFacade;
pub use gate::ReadyGate;
pub use ledger::{BlockEvent, BlockInfo, LedgerClient, TxReceipt, TxRequest};
pub use metadata::{ContentAddress, MetadataStore};
pub use nonce::NonceTracker;
pub use watcher::{PendingTx, TxConfirmation, TxOutcome};
