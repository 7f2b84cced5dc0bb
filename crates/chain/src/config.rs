//! Pipeline configuration.

use serde::{Deserialize, Serialize};

/// How many blocks past the submission baseline a confirmation watcher
/// waits before declaring timeout.
pub const DEFAULT_BLOCK_WINDOW: u64 = 16;

/// Configuration for the submission and confirmation pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Confirmation wait window, in blocks past the submission baseline.
    /// A transaction unmatched once the chain reaches strictly more than
    /// `baseline + block_window` resolves as timed out.
    pub block_window: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            block_window: DEFAULT_BLOCK_WINDOW,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_window() {
        assert_eq!(ChainConfig::default().block_window, 16);
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = ChainConfig { block_window: 4 };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(serde_json::from_str::<ChainConfig>(&json).unwrap(), config);
    }
}
