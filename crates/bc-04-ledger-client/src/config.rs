//! # Ledger Client Configuration
//!
//! # Environment Variables
//!
//! - `BC_SKIPCHAIN_ID`: hex id of the ledger's genesis block
//! - `BC_INCLUSION_WAIT`: blocks to wait for a transaction (default: 10)
//! - `BC_VERIFY_PROOFS`: check proofs against the chain (default: true)

use std::env;

use serde::{Deserialize, Serialize};
use shared_types::{SkipBlockId, Version, CURRENT_VERSION};

/// Default number of blocks to wait for a transaction to be included.
pub const DEFAULT_INCLUSION_WAIT: i32 = 10;

/// Ledger client configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerClientConfig {
    /// Genesis block of the ledger. Every request is scoped to it.
    pub skipchain_id: SkipBlockId,

    /// Version sent with requests and expected in responses.
    pub protocol_version: Version,

    /// Blocks `send_transaction` waits for inclusion.
    pub inclusion_wait_blocks: i32,

    /// Verify fetched proofs against the skipchain.
    pub verify_proofs: bool,
}

impl Default for LedgerClientConfig {
    fn default() -> Self {
        Self {
            skipchain_id: SkipBlockId::default(),
            protocol_version: CURRENT_VERSION,
            inclusion_wait_blocks: DEFAULT_INCLUSION_WAIT,
            verify_proofs: true,
        }
    }
}

impl LedgerClientConfig {
    /// Create a config for testing: no waiting.
    pub fn for_testing() -> Self {
        Self {
            inclusion_wait_blocks: 0,
            ..Self::default()
        }
    }

    /// Create configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            skipchain_id: env::var("BC_SKIPCHAIN_ID")
                .ok()
                .and_then(|v| SkipBlockId::from_hex(&v).ok())
                .unwrap_or(defaults.skipchain_id),

            protocol_version: defaults.protocol_version,

            inclusion_wait_blocks: env::var("BC_INCLUSION_WAIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.inclusion_wait_blocks),

            verify_proofs: env::var("BC_VERIFY_PROOFS")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(defaults.verify_proofs),
        }
    }

    /// Scope the config to `skipchain_id`.
    pub fn with_skipchain_id(mut self, skipchain_id: SkipBlockId) -> Self {
        self.skipchain_id = skipchain_id;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LedgerClientConfig::default();
        assert_eq!(config.protocol_version, CURRENT_VERSION);
        assert_eq!(config.inclusion_wait_blocks, 10);
        assert!(config.verify_proofs);
        assert!(config.skipchain_id.is_empty());
    }

    #[test]
    fn test_testing_config() {
        let config = LedgerClientConfig::for_testing().with_skipchain_id(SkipBlockId::new(vec![1; 32]));
        assert_eq!(config.inclusion_wait_blocks, 0);
        assert_eq!(config.skipchain_id, SkipBlockId::new(vec![1; 32]));
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = LedgerClientConfig::for_testing().with_skipchain_id(SkipBlockId::new(vec![0xab; 4]));
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("abababab"));
        let back: LedgerClientConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
