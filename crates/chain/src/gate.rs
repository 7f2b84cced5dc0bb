//! The one-shot readiness gate.

use crate::error::{ChainError, Result};
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GateState {
    Waiting,
    Open,
    Closed,
}

/// Process-wide readiness gate with a one-shot open transition.
///
/// Every submission path suspends on the gate before doing anything else.
/// The gate opens once the ledger client signals that its initial chain
/// sync is complete and stays open from then on; it closes only when the
/// facade shuts down, after which waiting submissions and all later ones
/// fail with [`ChainError::LedgerUnavailable`].
#[derive(Debug)]
pub struct ReadyGate {
    state: watch::Sender<GateState>,
}

impl ReadyGate {
    /// Creates a gate in the waiting state.
    #[must_use]
    pub fn new() -> Self {
        let (state, _) = watch::channel(GateState::Waiting);
        Self { state }
    }

    /// Opens the gate. Has no effect once the gate is open or closed.
    pub fn open(&self) {
        self.state.send_if_modified(|state| {
            if *state == GateState::Waiting {
                *state = GateState::Open;
                true
            } else {
                false
            }
        });
    }

    /// Closes the gate permanently. Wins over a prior open.
    pub fn close(&self) {
        self.state.send_if_modified(|state| {
            if *state == GateState::Closed {
                false
            } else {
                *state = GateState::Closed;
                true
            }
        });
    }

    /// Whether the gate is currently open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        *self.state.borrow() == GateState::Open
    }

    /// Suspends until the gate opens.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::LedgerUnavailable`] if the gate is closed, or
    /// closes while waiting.
    pub async fn wait_open(&self) -> Result<()> {
        let mut rx = self.state.subscribe();
        loop {
            match *rx.borrow_and_update() {
                GateState::Open => return Ok(()),
                GateState::Closed => return Err(ChainError::LedgerUnavailable),
                GateState::Waiting => {}
            }
            if rx.changed().await.is_err() {
                return Err(ChainError::LedgerUnavailable);
            }
        }
    }
}

impl Default for ReadyGate {
    fn default() -> Self {
        Self::new()
    }
}
