//! The contract compiler collaborator interface.

use crate::error::Result;
use async_trait::async_trait;

/// The output of compiling one named contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledContract {
    /// The contract's ABI as a JSON array string.
    pub abi: String,
    /// Deployable bytecode.
    pub bytecode: Vec<u8>,
    /// Compiler metadata blob for side-storage publication, if emitted.
    pub metadata: Option<String>,
}

/// Compiles contract source into deployable artifacts.
///
/// Implementations report bad source or a missing contract name as
/// `ChainError::Compilation`; the deployment orchestrator additionally
/// rejects artifacts with empty bytecode.
#[async_trait]
pub trait ContractCompiler: Send + Sync + 'static {
    /// Compiles `source` and returns the artifacts of `contract_name`.
    async fn compile(&self, source: &str, contract_name: &str) -> Result<CompiledContract>;
}
