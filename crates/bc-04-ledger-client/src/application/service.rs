//! # Ledger Client Service
//!
//! Application service tying the transaction and proof crates to a conode.
//!
//! Every request is checked against the message registry before it is sent,
//! and every response must carry the protocol version the client speaks.

use std::sync::Arc;

use async_trait::async_trait;
use bc_01_darc_identity::Identity;
use bc_02_transaction::{ClientTransaction, CounterSource, Signed, TransactionError};
use bc_03_state_proof::{ChainConfig, ForwardLinkVerifier, Instance, Proof, CONFIG_CONTRACT_ID};
use parking_lot::RwLock;
use shared_types::{Hash, InstanceId, MessageRegistry, SkipBlockId, Version};
use tracing::{debug, info, warn};

use crate::config::LedgerClientConfig;
use crate::domain::errors::ClientError;
use crate::ports::inbound::LedgerClientApi;
use crate::ports::outbound::ConodeConnection;
use crate::wire::{AddTxRequest, GetProof, GetSignerCounters, ServiceMessage, ServiceRequest};

/// Ledger client over one conode connection.
pub struct LedgerClient<C: ConodeConnection> {
    /// Configuration.
    config: LedgerClientConfig,
    /// Conode the requests go to.
    conode: Arc<C>,
    /// Service messages.
    registry: Arc<MessageRegistry>,
    /// Forward link signature check.
    verifier: Arc<dyn ForwardLinkVerifier>,
    /// Chain configuration from the last update.
    chain_config: RwLock<Option<ChainConfig>>,
}

impl<C: ConodeConnection> LedgerClient<C> {
    /// Create a new ledger client.
    pub fn new(
        config: LedgerClientConfig,
        conode: Arc<C>,
        registry: Arc<MessageRegistry>,
        verifier: Arc<dyn ForwardLinkVerifier>,
    ) -> Self {
        Self {
            config,
            conode,
            registry,
            verifier,
            chain_config: RwLock::new(None),
        }
    }

    /// Configuration.
    pub fn config(&self) -> &LedgerClientConfig {
        &self.config
    }

    /// The conode connection.
    pub fn conode(&self) -> &Arc<C> {
        &self.conode
    }

    /// Last accepted counter of each identity, as stored on the ledger.
    pub async fn signer_counters(&self, identities: &[Identity]) -> Result<Vec<u64>, ClientError> {
        self.route::<GetSignerCounters>()?;
        let response = self
            .conode
            .get_signer_counters(GetSignerCounters {
                signerids: identities.iter().map(|id| id.to_string()).collect(),
                skipchainid: self.skipchain_id()?.as_bytes().to_vec(),
            })
            .await?;
        debug!(
            signers = identities.len(),
            block = response.index,
            "received signer counters"
        );
        Ok(response.counters)
    }

    fn skipchain_id(&self) -> Result<&SkipBlockId, ClientError> {
        if self.config.skipchain_id.is_empty() {
            return Err(ClientError::MissingSkipchainId);
        }
        Ok(&self.config.skipchain_id)
    }

    /// Refuse `R` unless the registry knows it as a request answered by
    /// the response type the client decodes.
    fn route<R: ServiceRequest>(&self) -> Result<(), ClientError> {
        let reply = <R::Response as ServiceMessage>::NAME;
        let path = self.registry.request_path(R::NAME, reply)?;
        debug!(%path, reply, conode = self.conode.address(), "sending request");
        Ok(())
    }

    fn check_version(&self, actual: i32) -> Result<(), ClientError> {
        let actual = Version(actual);
        if actual != self.config.protocol_version {
            warn!(expected = %self.config.protocol_version, %actual, "response version mismatch");
            return Err(ClientError::VersionMismatch {
                expected: self.config.protocol_version,
                actual,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl<C: ConodeConnection + 'static> LedgerClientApi for LedgerClient<C> {
    async fn send_transaction_and_wait(
        &self,
        tx: &ClientTransaction<Signed>,
        wait_blocks: i32,
    ) -> Result<Hash, ClientError> {
        self.route::<AddTxRequest>()?;
        let request = AddTxRequest {
            version: self.config.protocol_version.0,
            skipchainid: self.skipchain_id()?.as_bytes().to_vec(),
            transaction: Some(tx.to_wire()),
            inclusionwait: wait_blocks,
        };
        let response = self.conode.add_transaction(request).await?;
        self.check_version(response.version)?;

        let id = tx.hash();
        info!(
            tx = %hex::encode(id),
            instructions = tx.len(),
            wait_blocks,
            "transaction accepted"
        );
        Ok(id)
    }

    /// Waits `inclusion_wait_blocks` from the configuration.
    async fn send_transaction(&self, tx: &ClientTransaction<Signed>) -> Result<Hash, ClientError> {
        self.send_transaction_and_wait(tx, self.config.inclusion_wait_blocks)
            .await
    }

    async fn get_proof(&self, iid: &InstanceId) -> Result<Proof, ClientError> {
        self.route::<GetProof>()?;
        let skipchain_id = self.skipchain_id()?;
        let response = self
            .conode
            .get_proof(GetProof {
                version: self.config.protocol_version.0,
                key: iid.to_vec(),
                id: skipchain_id.as_bytes().to_vec(),
            })
            .await?;
        self.check_version(response.version)?;

        let proof = Proof::from(response.proof.ok_or(ClientError::MissingProof)?);
        if self.config.verify_proofs {
            proof.verify(skipchain_id, self.verifier.as_ref())?;
        }
        debug!(instance = %iid, present = proof.matches(), "received proof");
        Ok(proof)
    }

    async fn get_verified_instance(
        &self,
        iid: &InstanceId,
        contract_id: &str,
    ) -> Result<Instance, ClientError> {
        let proof = self.get_proof(iid).await?;
        proof.match_or_fail(iid, contract_id)?;
        Ok(Instance::from_proof(&proof, iid)?)
    }

    async fn update_config(&self) -> Result<ChainConfig, ClientError> {
        let instance = self
            .get_verified_instance(&InstanceId::CONFIG, CONFIG_CONTRACT_ID)
            .await?;
        let config = ChainConfig::from_bytes(&instance.data)?;
        info!(
            block_interval_ns = config.blockinterval,
            max_block_size = config.maxblocksize,
            "chain config updated"
        );
        *self.chain_config.write() = Some(config.clone());
        Ok(config)
    }

    fn chain_config(&self) -> Option<ChainConfig> {
        self.chain_config.read().clone()
    }
}

#[async_trait]
impl<C: ConodeConnection + 'static> CounterSource for LedgerClient<C> {
    async fn get_signer_counters(
        &self,
        identities: &[Identity],
        increment: u64,
    ) -> Result<Vec<u64>, TransactionError> {
        let counters = self
            .signer_counters(identities)
            .await
            .map_err(|e| TransactionError::CounterSource(e.to_string()))?;
        counters
            .into_iter()
            .map(|c| c.checked_add(increment).ok_or(TransactionError::CounterOverflow))
            .collect()
    }
}
