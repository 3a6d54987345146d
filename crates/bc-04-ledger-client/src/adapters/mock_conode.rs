//! # Mock Conode
//!
//! In-memory ledger answering the ByzCoin requests with real proofs.
//!
//! Transactions are checked the way a conode checks them: every
//! instruction must be signed over the transaction hash and every signer
//! counter must be one above the last accepted one. A transaction is applied
//! as a whole or not at all; each accepted transaction adds a block.
//!
//! Contracts are reduced to a value store: spawn creates an instance holding
//! the `value` argument, `invoke:<cid>.update` replaces it, delete removes
//! the instance.

use std::collections::HashMap;

use async_trait::async_trait;
use bc_01_darc_identity::Identity;
use bc_02_transaction::{Action, ClientTransaction, Instruction, Signed};
use bc_03_state_proof::testing::{MemoryTrie, TestChain};
use bc_03_state_proof::{
    ChainConfig, ForwardLinkVerifier, StateAction, StateChangeBody, CONFIG_CONTRACT_ID,
};
use parking_lot::Mutex;
use prost::Message;
use shared_crypto::sha256_many;
use shared_types::{InstanceId, SkipBlockId, Version, CURRENT_VERSION};
use tracing::{debug, info, warn};

use crate::domain::errors::ClientError;
use crate::ports::outbound::ConodeConnection;
use crate::wire::{
    AddTxRequest, AddTxResponse, GetProof, GetProofResponse, GetSignerCounters,
    GetSignerCountersResponse,
};

/// Contract id of DARC instances.
pub const DARC_CONTRACT_ID: &str = "darc";

/// Block interval stored in the genesis config, in nanoseconds.
const BLOCK_INTERVAL_NS: i64 = 5_000_000_000;
const MAX_BLOCK_SIZE: i32 = 4_000_000;

struct LedgerState {
    trie: MemoryTrie,
    chain: TestChain,
    counters: HashMap<String, u64>,
}

/// In-memory conode.
pub struct MockConode {
    state: Mutex<LedgerState>,
    skipchain_id: SkipBlockId,
    genesis_darc: InstanceId,
    version: Version,
    reply_version: Version,
    should_fail: bool,
}

impl Default for MockConode {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConode {
    /// Ledger holding a genesis darc and the chain config.
    pub fn new() -> Self {
        let mut chain = TestChain::new(1);
        let skipchain_id = chain.skipchain_id();
        let mut trie = MemoryTrie::new(skipchain_id.as_bytes().to_vec());

        let genesis_darc = InstanceId::new(sha256_many(&[&b"genesis darc"[..], skipchain_id.as_bytes()]));
        trie.set(
            genesis_darc.as_bytes(),
            &StateChangeBody::new(
                StateAction::Create,
                DARC_CONTRACT_ID,
                Vec::new(),
                0,
                genesis_darc.to_vec(),
            )
            .encode_to_vec(),
        );

        let config = ChainConfig {
            roster: Some(chain.roster().clone()),
            blockinterval: BLOCK_INTERVAL_NS,
            maxblocksize: MAX_BLOCK_SIZE,
            darccontractids: vec![DARC_CONTRACT_ID.to_string()],
        };
        trie.set(
            InstanceId::CONFIG.as_bytes(),
            &StateChangeBody::new(
                StateAction::Create,
                CONFIG_CONTRACT_ID,
                config.encode_to_vec(),
                0,
                genesis_darc.to_vec(),
            )
            .encode_to_vec(),
        );

        chain.append(&trie.root());

        Self {
            state: Mutex::new(LedgerState {
                trie,
                chain,
                counters: HashMap::new(),
            }),
            skipchain_id,
            genesis_darc,
            version: CURRENT_VERSION,
            reply_version: CURRENT_VERSION,
            should_fail: false,
        }
    }

    /// Answer every request with `version`.
    pub fn with_reply_version(mut self, version: Version) -> Self {
        self.reply_version = version;
        self
    }

    /// Fail every request with a network error.
    pub fn failing(mut self) -> Self {
        self.should_fail = true;
        self
    }

    /// Genesis block id.
    pub fn skipchain_id(&self) -> SkipBlockId {
        self.skipchain_id.clone()
    }

    /// Instance id of the genesis darc.
    pub fn genesis_darc(&self) -> InstanceId {
        self.genesis_darc
    }

    /// Checks the links of this ledger's chain.
    pub fn verifier(&self) -> impl ForwardLinkVerifier + 'static {
        self.state.lock().chain.verifier()
    }

    /// Record `counter` as the last accepted counter of `id`.
    pub fn set_counter(&self, id: &Identity, counter: u64) {
        self.state.lock().counters.insert(id.to_string(), counter);
    }

    /// Last accepted counter of `id`.
    pub fn counter(&self, id: &Identity) -> u64 {
        self.state
            .lock()
            .counters
            .get(&id.to_string())
            .copied()
            .unwrap_or(0)
    }

    /// Number of blocks in the chain.
    pub fn block_count(&self) -> usize {
        self.state.lock().chain.len()
    }

    /// Current value of an instance.
    pub fn instance(&self, iid: &InstanceId) -> Option<StateChangeBody> {
        let state = self.state.lock();
        state
            .trie
            .get(iid.as_bytes())
            .and_then(|v| StateChangeBody::from_bytes(v).ok())
    }

    fn check_available(&self) -> Result<(), ClientError> {
        if self.should_fail {
            return Err(ClientError::Network("mock conode unavailable".to_string()));
        }
        Ok(())
    }

    fn check_skipchain(&self, id: &[u8]) -> Result<(), ClientError> {
        if id != self.skipchain_id.as_bytes() {
            return Err(ClientError::Refused(format!(
                "unknown skipchain {}",
                hex::encode(id)
            )));
        }
        Ok(())
    }

    fn apply(&self, tx: &ClientTransaction<Signed>) -> Result<(), ClientError> {
        let mut state = self.state.lock();
        let mut trie = state.trie.clone();
        let mut counters = state.counters.clone();
        let digest = tx.hash();

        for instr in tx.instructions() {
            if instr.signatures().is_empty() {
                return Err(ClientError::Refused("instruction is not signed".into()));
            }
            if instr.verify_signatures(&digest).len() != instr.signatures().len() {
                return Err(ClientError::Refused(format!(
                    "invalid signature on {}",
                    instr.action()
                )));
            }
            for (id, counter) in instr.signer_identities().iter().zip(instr.signer_counters()) {
                let key = id.to_string();
                let need = counters
                    .get(&key)
                    .copied()
                    .unwrap_or(0)
                    .checked_add(1)
                    .ok_or_else(|| ClientError::Refused("counter overflow".into()))?;
                if *counter != need {
                    return Err(ClientError::Refused(format!(
                        "got counter={}, but need {}",
                        counter, need
                    )));
                }
                counters.insert(key, *counter);
            }
            execute(&mut trie, instr)?;
        }

        state.trie = trie;
        state.counters = counters;
        let root = state.trie.root();
        let index = state.chain.append(&root).index;
        info!(block = index, instructions = tx.len(), "mock conode applied transaction");
        Ok(())
    }
}

fn load(trie: &MemoryTrie, iid: &InstanceId) -> Result<Option<StateChangeBody>, ClientError> {
    Ok(trie
        .get(iid.as_bytes())
        .map(StateChangeBody::from_bytes)
        .transpose()?)
}

fn execute(trie: &mut MemoryTrie, instr: &Instruction<Signed>) -> Result<(), ClientError> {
    let iid = instr.instance_id();
    let existing = load(trie, iid)?;
    match instr.operation() {
        Action::Spawn { contract_id, args } => {
            let parent = existing
                .ok_or_else(|| ClientError::Refused(format!("cannot spawn from missing instance {}", iid)))?;
            let darc_id = if parent.contract_id() == DARC_CONTRACT_ID {
                iid.to_vec()
            } else {
                parent.darcid
            };
            let new_id = instr.derive_id("");
            if trie.get(new_id.as_bytes()).is_some() {
                return Err(ClientError::Refused(format!("instance {} already exists", new_id)));
            }
            let value = args.search("value").unwrap_or_default().to_vec();
            let body = StateChangeBody::new(StateAction::Create, contract_id, value, 0, darc_id);
            trie.set(new_id.as_bytes(), &body.encode_to_vec());
            debug!(instance = %new_id, contract = %contract_id, "spawned instance");
        }
        Action::Invoke {
            contract_id,
            command,
            args,
        } => {
            let body = existing
                .ok_or_else(|| ClientError::Refused(format!("instance {} does not exist", iid)))?;
            check_contract(&body, contract_id)?;
            if command != "update" {
                return Err(ClientError::Refused(format!("unknown command {}", command)));
            }
            let value = args.search("value").unwrap_or_default().to_vec();
            let updated = StateChangeBody::new(
                StateAction::Update,
                contract_id,
                value,
                body.version + 1,
                body.darcid,
            );
            trie.set(iid.as_bytes(), &updated.encode_to_vec());
            debug!(instance = %iid, version = body.version + 1, "updated instance");
        }
        Action::Delete { contract_id } => {
            let body = existing
                .ok_or_else(|| ClientError::Refused(format!("instance {} does not exist", iid)))?;
            check_contract(&body, contract_id)?;
            trie.delete(iid.as_bytes());
            debug!(instance = %iid, "deleted instance");
        }
    }
    Ok(())
}

fn check_contract(body: &StateChangeBody, contract_id: &str) -> Result<(), ClientError> {
    let actual = body.contract_id();
    if actual != contract_id {
        return Err(ClientError::Refused(format!(
            "instruction for contract {} on instance of {}",
            contract_id, actual
        )));
    }
    Ok(())
}

#[async_trait]
impl ConodeConnection for MockConode {
    async fn add_transaction(&self, request: AddTxRequest) -> Result<AddTxResponse, ClientError> {
        self.check_available()?;
        self.check_skipchain(&request.skipchainid)?;
        let version = Version(request.version);
        if version != self.version {
            return Err(ClientError::Refused(format!("unsupported version {}", version)));
        }
        let wire = request
            .transaction
            .ok_or_else(|| ClientError::Refused("empty transaction".into()))?;
        let tx = ClientTransaction::<Signed>::from_wire(wire, version)?;
        if let Err(e) = self.apply(&tx) {
            warn!(error = %e, "mock conode refused transaction");
            return Err(e);
        }
        Ok(AddTxResponse {
            version: self.reply_version.0,
        })
    }

    async fn get_proof(&self, request: GetProof) -> Result<GetProofResponse, ClientError> {
        self.check_available()?;
        self.check_skipchain(&request.id)?;
        let state = self.state.lock();
        let proof = state.chain.proof(&state.trie, &request.key);
        Ok(GetProofResponse {
            version: self.reply_version.0,
            proof: Some(proof.to_wire()),
        })
    }

    async fn get_signer_counters(
        &self,
        request: GetSignerCounters,
    ) -> Result<GetSignerCountersResponse, ClientError> {
        self.check_available()?;
        self.check_skipchain(&request.skipchainid)?;
        let state = self.state.lock();
        Ok(GetSignerCountersResponse {
            counters: request
                .signerids
                .iter()
                .map(|id| state.counters.get(id).copied().unwrap_or(0))
                .collect(),
            index: state.chain.latest().index as u64,
        })
    }

    fn address(&self) -> &str {
        "mock://conode"
    }
}
