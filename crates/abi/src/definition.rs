//! Parsed JSON ABI definitions.

use crate::error::{AbiError, AbiResult};
use crate::param_type::ParamType;
use serde::{Deserialize, Serialize};

/// A single parameter of an ABI entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiParam {
    /// Parameter name; may be empty in older ABIs.
    #[serde(default)]
    pub name: String,
    /// Solidity type string, e.g. `"uint256"`.
    #[serde(rename = "type")]
    pub type_name: String,
}

/// One entry of a contract ABI: a constructor, function, or event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiEntry {
    /// Entry kind: `"constructor"`, `"function"`, `"event"`, `"fallback"`, ...
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    /// Entry name; constructors and fallbacks have none.
    #[serde(default)]
    pub name: String,
    /// Input parameters.
    #[serde(default)]
    pub inputs: Vec<AbiParam>,
    /// Output parameters (functions only).
    #[serde(default)]
    pub outputs: Vec<AbiParam>,
}

// Solidity emitted entries without a "type" field for functions historically.
fn default_kind() -> String {
    "function".to_string()
}

impl AbiEntry {
    /// Resolves the entry's input parameter types.
    ///
    /// # Errors
    ///
    /// Returns `AbiError::UnsupportedType` if any input type falls outside
    /// the codec's type subset.
    pub fn param_types(&self) -> AbiResult<Vec<ParamType>> {
        self.inputs
            .iter()
            .map(|p| ParamType::parse(&p.type_name))
            .collect()
    }
}

/// A parsed contract ABI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AbiDefinition {
    entries: Vec<AbiEntry>,
}

impl AbiDefinition {
    /// Parses an ABI from its JSON array form.
    ///
    /// # Errors
    ///
    /// Returns `AbiError::InvalidJson` if the string is not a JSON ABI array.
    pub fn from_json(json: &str) -> AbiResult<Self> {
        serde_json::from_str(json).map_err(|e| AbiError::InvalidJson {
            message: e.to_string(),
        })
    }

    /// All entries of the ABI.
    #[must_use]
    pub fn entries(&self) -> &[AbiEntry] {
        &self.entries
    }

    /// The constructor entry, if the contract declares one.
    #[must_use]
    pub fn constructor(&self) -> Option<&AbiEntry> {
        self.entries.iter().find(|e| e.kind == "constructor")
    }
}
