//! # Outbound Ports
//!
//! Where signer counters come from. In production this is a conode; tests use
//! [`MockCounterSource`].

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bc_01_darc_identity::Identity;
use parking_lot::RwLock;

use crate::domain::errors::TransactionError;

/// Signer counter lookup - outbound port.
#[async_trait]
pub trait CounterSource: Send + Sync {
    /// For each identity, the last counter the ledger accepted plus `increment`.
    async fn get_signer_counters(
        &self,
        identities: &[Identity],
        increment: u64,
    ) -> Result<Vec<u64>, TransactionError>;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// In-memory counter store. Unknown identities start at 0.
#[derive(Default)]
pub struct MockCounterSource {
    /// Last accepted counter per identity string.
    pub counters: RwLock<HashMap<String, u64>>,
    /// Should return errors?
    pub should_fail: bool,
    /// Number of lookups served.
    pub calls: AtomicUsize,
}

impl MockCounterSource {
    /// Set the last accepted counter of `id`.
    pub fn set(&self, id: &Identity, counter: u64) {
        self.counters.write().insert(id.to_string(), counter);
    }

    /// Number of lookups served.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CounterSource for MockCounterSource {
    async fn get_signer_counters(
        &self,
        identities: &[Identity],
        increment: u64,
    ) -> Result<Vec<u64>, TransactionError> {
        if self.should_fail {
            return Err(TransactionError::CounterSource("Mock failure".to_string()));
        }
        self.calls.fetch_add(1, Ordering::SeqCst);
        let counters = self.counters.read();
        identities
            .iter()
            .map(|id| {
                counters
                    .get(&id.to_string())
                    .copied()
                    .unwrap_or(0)
                    .checked_add(increment)
                    .ok_or(TransactionError::CounterOverflow)
            })
            .collect()
    }
}
