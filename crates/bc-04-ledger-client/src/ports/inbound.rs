//! # Inbound Ports
//!
//! API trait defining what the ledger client can do.

use async_trait::async_trait;
use bc_02_transaction::{ClientTransaction, Signed};
use bc_03_state_proof::{ChainConfig, Instance, Proof};
use shared_types::{Hash, InstanceId};

use crate::domain::errors::ClientError;

/// Ledger client API - inbound port.
#[async_trait]
pub trait LedgerClientApi: Send + Sync {
    /// Submit `tx` and wait up to `wait_blocks` blocks for its inclusion.
    /// Returns the transaction hash.
    async fn send_transaction_and_wait(
        &self,
        tx: &ClientTransaction<Signed>,
        wait_blocks: i32,
    ) -> Result<Hash, ClientError>;

    /// Submit `tx` with the default inclusion wait of the implementation,
    /// zero unless it says otherwise.
    async fn send_transaction(&self, tx: &ClientTransaction<Signed>) -> Result<Hash, ClientError> {
        self.send_transaction_and_wait(tx, 0).await
    }

    /// Proof for `iid`, verified against the skipchain unless disabled.
    async fn get_proof(&self, iid: &InstanceId) -> Result<Proof, ClientError>;

    /// Instance `iid` of contract `contract_id`, read from a verified proof.
    async fn get_verified_instance(
        &self,
        iid: &InstanceId,
        contract_id: &str,
    ) -> Result<Instance, ClientError>;

    /// Fetch the chain configuration and keep it.
    async fn update_config(&self) -> Result<ChainConfig, ClientError>;

    /// Chain configuration from the last `update_config`.
    fn chain_config(&self) -> Option<ChainConfig>;
}
