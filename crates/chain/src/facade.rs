//! The caller-facing pipeline surface.

use crate::compiler::ContractCompiler;
use crate::config::ChainConfig;
use crate::deploy::constructor_payload;
use crate::error::{ChainError, Result};
use crate::gate::ReadyGate;
use crate::ledger::{LedgerClient, TxRequest};
use crate::metadata::{ContentAddress, MetadataStore};
use crate::nonce::NonceTracker;
use crate::watcher::{self, PendingTx};
use ethpipe_abi::Token;
use ethpipe_primitives::{Account, EthAddress, EthValue};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The pipeline facade: submits transactions, deploys contracts, answers
/// state queries, and owns the process-wide readiness gate.
///
/// Cheap to share; all methods take `&self` and every submission path is
/// safe to drive from many tasks concurrently. The facade holds its
/// collaborators behind [`Arc`] and spawns one confirmation watcher task
/// per dispatched transaction.
pub struct ChainFacade<L, C, M> {
    ledger: Arc<L>,
    compiler: Arc<C>,
    metadata: Arc<M>,
    gate: Arc<ReadyGate>,
    tracker: Arc<NonceTracker>,
    config: ChainConfig,
}

impl<L, C, M> ChainFacade<L, C, M>
where
    L: LedgerClient,
    C: ContractCompiler,
    M: MetadataStore,
{
    /// Creates the facade and starts watching for ledger readiness.
    ///
    /// The readiness gate opens as soon as the ledger client's initial
    /// chain sync completes; submissions made before that suspend on the
    /// gate rather than failing. Must be called from within a Tokio
    /// runtime.
    pub fn new(ledger: Arc<L>, compiler: Arc<C>, metadata: Arc<M>, config: ChainConfig) -> Self {
        let gate = Arc::new(ReadyGate::new());
        {
            let gate = gate.clone();
            let ledger = ledger.clone();
            tokio::spawn(async move {
                ledger.wait_ready().await;
                info!("ledger client ready; opening submission gate");
                gate.open();
            });
        }
        Self {
            ledger,
            compiler,
            metadata,
            gate,
            tracker: Arc::new(NonceTracker::new()),
            config,
        }
    }

    /// Submits a value transfer or contract call, using the best block's
    /// gas limit as the default.
    ///
    /// Returns once the transaction is dispatched; the returned handle
    /// resolves when a receipt matches or the block window expires.
    pub async fn send_transaction(
        &self,
        sender: &Account,
        to: EthAddress,
        value: EthValue,
        payload: Vec<u8>,
    ) -> Result<PendingTx> {
        self.dispatch(sender, Some(to), value, payload, None).await
    }

    /// Submits a value transfer or contract call with an explicit gas limit.
    pub async fn send_transaction_with_gas(
        &self,
        sender: &Account,
        to: EthAddress,
        value: EthValue,
        payload: Vec<u8>,
        gas_limit: u64,
    ) -> Result<PendingTx> {
        self.dispatch(sender, Some(to), value, payload, Some(gas_limit))
            .await
    }

    /// Compiles a contract and submits its creation transaction.
    ///
    /// Fails fast on compilation or constructor-argument problems, before
    /// anything is published or submitted. If the compiler emitted a
    /// metadata blob it is published to the side store first; a publish
    /// failure is logged and does not block the deployment.
    pub async fn deploy_contract(
        &self,
        sender: &Account,
        source: &str,
        contract_name: &str,
        args: &[Token],
    ) -> Result<PendingTx> {
        let contract = self.compiler.compile(source, contract_name).await?;
        let payload = constructor_payload(&contract, args)?;

        if let Some(blob) = &contract.metadata {
            match self.metadata.publish(blob.as_bytes()).await {
                Ok(address) => {
                    debug!(contract_name, %address, "published contract metadata");
                }
                Err(e) => {
                    warn!(contract_name, error = %e, "metadata publish failed; continuing");
                }
            }
        }

        self.dispatch(sender, None, EthValue::zero(), payload, None)
            .await
    }

    /// Publishes a metadata blob directly, surfacing any store failure.
    pub async fn publish_metadata(&self, blob: &[u8]) -> Result<ContentAddress> {
        self.metadata.publish(blob).await
    }

    /// Fetches a previously published metadata blob.
    pub async fn fetch_metadata(&self, address: &ContentAddress) -> Result<Vec<u8>> {
        self.metadata.fetch(address).await
    }

    /// Balance of an address.
    pub async fn balance(&self, address: EthAddress) -> Result<EthValue> {
        self.ledger.balance(address).await
    }

    /// Code deployed at an address.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::CodeMissing`] if no code is deployed there.
    pub async fn code(&self, address: EthAddress) -> Result<Vec<u8>> {
        let code = self.ledger.code(address).await?;
        if code.is_empty() {
            return Err(ChainError::CodeMissing(address));
        }
        Ok(code)
    }

    /// Next usable nonce for an address: the ledger's confirmed nonce plus
    /// transactions this process has in flight.
    pub async fn nonce(&self, address: EthAddress) -> Result<u64> {
        let confirmed = self.ledger.confirmed_nonce(address).await?;
        Ok(confirmed + self.tracker.pending(address))
    }

    /// Whether an address exists in the ledger state.
    pub async fn exists(&self, address: EthAddress) -> Result<bool> {
        self.ledger.exists(address).await
    }

    /// Number of this process's transactions from `address` not yet in a
    /// terminal state.
    #[must_use]
    pub fn pending_count(&self, address: EthAddress) -> u64 {
        self.tracker.pending(address)
    }

    /// Whether the submission gate is open.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.gate.is_open()
    }

    /// Shuts the pipeline down: closes the gate so waiting and future
    /// submissions fail with [`ChainError::LedgerUnavailable`], then
    /// releases the ledger client. In-flight watchers resolve from the
    /// block stream closing.
    pub async fn shutdown(&self) {
        info!("shutting down submission pipeline");
        self.gate.close();
        self.ledger.close().await;
    }

    /// The shared dispatch path for every state-changing call.
    ///
    /// The block subscription is created before the transaction is handed
    /// to the ledger, so the mined block cannot slip between dispatch and
    /// watch; the baseline is the best block height at that same moment.
    async fn dispatch(
        &self,
        sender: &Account,
        to: Option<EthAddress>,
        value: EthValue,
        payload: Vec<u8>,
        gas_limit: Option<u64>,
    ) -> Result<PendingTx> {
        self.gate.wait_open().await?;

        let events = self.ledger.subscribe_blocks();
        let best = self.ledger.best_block().await?;
        let gas_price = self.ledger.gas_price().await?;
        let from = sender.address();
        let nonce = self.tracker.allocate(&*self.ledger, from).await?;

        let request = TxRequest {
            nonce,
            gas_price,
            gas_limit: gas_limit.unwrap_or(best.gas_limit),
            to,
            value,
            payload,
        };
        let creation = request.is_contract_creation();

        let hash = match self.ledger.sign_and_submit(request, sender).await {
            Ok(hash) => hash,
            Err(e) => {
                // No hash exists, so no watcher will ever release this slot.
                self.tracker.abort(from);
                return Err(e);
            }
        };
        debug!(%hash, %from, nonce, baseline = best.number, creation, "transaction dispatched");

        Ok(watcher::spawn(
            events,
            hash,
            from,
            best.number,
            self.config.block_window,
            self.tracker.clone(),
        ))
    }
}
