//! # Instruction
//!
//! One spawn, invoke or delete against a single instance.
//!
//! An instruction moves through three states. The state is part of the type,
//! so signing without counters or encoding without signatures does not
//! compile.
//!
//! | State | Has counters | Has signatures | Can be encoded |
//! |-------|--------------|----------------|----------------|
//! | [`Unsigned`] | no | no | no |
//! | [`Countered`] | yes | no | no |
//! | [`Signed`] | yes | yes | yes |

use std::fmt;
use std::marker::PhantomData;

use bc_01_darc_identity::{Identity, Signer};
use shared_types::{Hash, InstanceId, Version, CURRENT_VERSION};
use tracing::debug;

use super::argument::Arguments;
use super::errors::TransactionError;
use crate::algorithms::hashing;
use crate::ports::outbound::CounterSource;

// =============================================================================
// ACTION
// =============================================================================

/// What the instruction does. Exactly one per instruction.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Create a new instance of `contract_id`.
    Spawn {
        /// Contract to instantiate.
        contract_id: String,
        /// Constructor arguments.
        args: Arguments,
    },
    /// Call `command` on an existing instance.
    Invoke {
        /// Contract of the instance.
        contract_id: String,
        /// Method name.
        command: String,
        /// Call arguments.
        args: Arguments,
    },
    /// Remove an instance.
    Delete {
        /// Contract of the instance.
        contract_id: String,
    },
}

impl Action {
    /// Discriminant byte hashed into the instruction.
    pub fn type_byte(&self) -> u8 {
        match self {
            Action::Spawn { .. } => 0,
            Action::Invoke { .. } => 1,
            Action::Delete { .. } => 2,
        }
    }

    /// Contract the action targets.
    pub fn contract_id(&self) -> &str {
        match self {
            Action::Spawn { contract_id, .. }
            | Action::Invoke { contract_id, .. }
            | Action::Delete { contract_id } => contract_id,
        }
    }

    /// Arguments, if the action takes any.
    pub fn args(&self) -> Option<&Arguments> {
        match self {
            Action::Spawn { args, .. } | Action::Invoke { args, .. } => Some(args),
            Action::Delete { .. } => None,
        }
    }

    /// DARC rule string: `spawn:<cid>`, `invoke:<cid>.<command>` or `delete:<cid>`.
    pub fn rule(&self) -> String {
        match self {
            Action::Spawn { contract_id, .. } => format!("spawn:{contract_id}"),
            Action::Invoke {
                contract_id,
                command,
                ..
            } => format!("invoke:{contract_id}.{command}"),
            Action::Delete { contract_id } => format!("delete:{contract_id}"),
        }
    }
}

// =============================================================================
// STATES
// =============================================================================

mod sealed {
    pub trait Sealed {}
}

/// Lifecycle state of an instruction or transaction.
pub trait InstructionState: sealed::Sealed + Clone + fmt::Debug + PartialEq + Send + Sync {}

/// Freshly built, no signers bound.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Unsigned;

/// Signer identities and counters bound, not yet signed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Countered;

/// One signature per bound identity. Ready to submit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Signed;

impl sealed::Sealed for Unsigned {}
impl sealed::Sealed for Countered {}
impl sealed::Sealed for Signed {}
impl InstructionState for Unsigned {}
impl InstructionState for Countered {}
impl InstructionState for Signed {}

// =============================================================================
// INSTRUCTION
// =============================================================================

/// A single state-changing operation.
#[derive(Clone, Debug, PartialEq)]
pub struct Instruction<S: InstructionState = Unsigned> {
    instance_id: InstanceId,
    action: Action,
    version: Version,
    signer_identities: Vec<Identity>,
    signer_counters: Vec<u64>,
    signatures: Vec<Vec<u8>>,
    _state: PhantomData<S>,
}

impl<S: InstructionState> Instruction<S> {
    fn into_state<T: InstructionState>(self) -> Instruction<T> {
        Instruction {
            instance_id: self.instance_id,
            action: self.action,
            version: self.version,
            signer_identities: self.signer_identities,
            signer_counters: self.signer_counters,
            signatures: self.signatures,
            _state: PhantomData,
        }
    }

    /// Target instance.
    pub fn instance_id(&self) -> &InstanceId {
        &self.instance_id
    }

    /// The spawn, invoke or delete payload.
    pub fn operation(&self) -> &Action {
        &self.action
    }

    /// DARC rule this instruction is checked against.
    pub fn action(&self) -> String {
        self.action.rule()
    }

    /// Contract the instruction targets.
    pub fn contract_id(&self) -> &str {
        self.action.contract_id()
    }

    /// Protocol version used for hashing.
    pub fn version(&self) -> Version {
        self.version
    }

    /// Bound signer identities.
    pub fn signer_identities(&self) -> &[Identity] {
        &self.signer_identities
    }

    /// Bound signer counters, parallel to the identities.
    pub fn signer_counters(&self) -> &[u64] {
        &self.signer_counters
    }

    /// Signatures, parallel to the identities.
    pub fn signatures(&self) -> &[Vec<u8>] {
        &self.signatures
    }

    /// Identities in `<type>:<hex>` form.
    pub fn identity_strings(&self) -> Vec<String> {
        self.signer_identities.iter().map(|id| id.to_string()).collect()
    }

    /// Canonical hash. Signatures do not contribute.
    pub fn hash(&self) -> Hash {
        hashing::instruction_hash(
            &self.instance_id,
            &self.action,
            self.version,
            &self.signer_counters,
            &self.signer_identities,
        )
    }

    /// Instance id derived from this instruction and `what`.
    ///
    /// A spawn creates its instance at `derive_id("")`. The signatures are part
    /// of the derivation, so the id of a signed instruction differs from the
    /// id of the same instruction before signing unless it has no signers.
    pub fn derive_id(&self, what: &str) -> InstanceId {
        hashing::derive_id(&self.hash(), &self.signatures, what)
    }
}

impl Instruction<Unsigned> {
    fn build(instance_id: InstanceId, action: Action) -> Self {
        Self {
            instance_id,
            action,
            version: CURRENT_VERSION,
            signer_identities: Vec::new(),
            signer_counters: Vec::new(),
            signatures: Vec::new(),
            _state: PhantomData,
        }
    }

    /// Spawn `contract_id` under the darc or container `instance_id`.
    pub fn create_spawn(
        instance_id: InstanceId,
        contract_id: impl Into<String>,
        args: Arguments,
    ) -> Self {
        Self::build(
            instance_id,
            Action::Spawn {
                contract_id: contract_id.into(),
                args,
            },
        )
    }

    /// Invoke `command` on `instance_id`.
    pub fn create_invoke(
        instance_id: InstanceId,
        contract_id: impl Into<String>,
        command: impl Into<String>,
        args: Arguments,
    ) -> Self {
        Self::build(
            instance_id,
            Action::Invoke {
                contract_id: contract_id.into(),
                command: command.into(),
                args,
            },
        )
    }

    /// Delete `instance_id`.
    pub fn create_delete(instance_id: InstanceId, contract_id: impl Into<String>) -> Self {
        Self::build(
            instance_id,
            Action::Delete {
                contract_id: contract_id.into(),
            },
        )
    }

    /// Hash with the rules of `version` instead of the current one.
    pub fn with_version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    /// Bind signer identities and their counters.
    pub fn bind_counters(
        &self,
        identities: Vec<Identity>,
        counters: Vec<u64>,
    ) -> Result<Instruction<Countered>, TransactionError> {
        if identities.len() != counters.len() {
            return Err(TransactionError::CounterBindingMismatch {
                identities: identities.len(),
                counters: counters.len(),
            });
        }
        let mut out = self.clone();
        out.signer_identities = identities;
        out.signer_counters = counters;
        Ok(out.into_state())
    }

    /// Fetch the next counter of every signer and bind them.
    pub async fn update_counters(
        &self,
        source: &dyn CounterSource,
        signers: &[&dyn Signer],
    ) -> Result<Instruction<Countered>, TransactionError> {
        let identities: Vec<Identity> = signers.iter().map(|s| s.identity()).collect();
        if identities.is_empty() {
            return self.bind_counters(identities, Vec::new());
        }
        let counters = source.get_signer_counters(&identities, 1).await?;
        if counters.len() != identities.len() {
            return Err(TransactionError::CounterResponseMismatch {
                requested: identities.len(),
                received: counters.len(),
            });
        }
        debug!(instance = %self.instance_id, ?counters, "bound signer counters");
        self.bind_counters(identities, counters)
    }
}

impl Instruction<Countered> {
    /// Sign `message` with every signer, in the order the identities were bound.
    ///
    /// `message` is the hash of the enclosing transaction. The countered
    /// instruction is left as is; signing it again reuses the same counters.
    pub fn sign_with(
        &self,
        message: &[u8],
        signers: &[&dyn Signer],
    ) -> Result<Instruction<Signed>, TransactionError> {
        if signers.len() != self.signer_identities.len() {
            return Err(TransactionError::SignerIdentityCountMismatch);
        }
        if signers.len() != self.signer_counters.len() {
            return Err(TransactionError::SignerCounterCountMismatch);
        }
        let mut signatures = Vec::with_capacity(signers.len());
        for (signer, bound) in signers.iter().zip(&self.signer_identities) {
            if &signer.identity() != bound {
                return Err(TransactionError::SignerIdentityMismatch);
            }
            signatures.push(signer.sign(message)?);
        }
        let mut out = self.clone();
        out.signatures = signatures;
        Ok(out.into_state())
    }
}

impl Instruction<Signed> {
    /// Reassemble a signed instruction from its parts.
    pub(crate) fn from_parts(
        instance_id: InstanceId,
        action: Action,
        version: Version,
        signer_identities: Vec<Identity>,
        signer_counters: Vec<u64>,
        signatures: Vec<Vec<u8>>,
    ) -> Result<Self, TransactionError> {
        if signer_identities.len() != signer_counters.len()
            || signer_identities.len() != signatures.len()
        {
            return Err(TransactionError::MalformedSigners {
                identities: signer_identities.len(),
                counters: signer_counters.len(),
                signatures: signatures.len(),
            });
        }
        Ok(Self {
            instance_id,
            action,
            version,
            signer_identities,
            signer_counters,
            signatures,
            _state: PhantomData,
        })
    }

    /// Identities whose signature on `message` verifies.
    pub fn verify_signatures(&self, message: &[u8]) -> Vec<Identity> {
        self.signer_identities
            .iter()
            .zip(&self.signatures)
            .filter(|(id, sig)| id.verify(message, sig))
            .map(|(id, _)| id.clone())
            .collect()
    }
}

impl<S: InstructionState> fmt::Display for Instruction<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- instruction:")?;
        writeln!(f, "-- hash: {}", hex::encode(self.hash()))?;
        writeln!(f, "-- instID: {}", self.instance_id)?;
        writeln!(f, "-- action: {}", self.action())?;
        writeln!(f, "-- identities: {:?}", self.identity_strings())?;
        writeln!(f, "-- counters: {:?}", self.signer_counters)?;
        write!(f, "-- signatures: {}", self.signatures.len())?;
        if let Some(args) = self.action.args() {
            for arg in args {
                write!(f, "\n--- {}: {}", arg.name(), hex::encode(arg.value()))?;
            }
        }
        Ok(())
    }
}
