//! # Client Transaction
//!
//! An ordered list of instructions the ledger applies atomically: either
//! every instruction succeeds or none of them is applied.
//!
//! All instructions are signed over the same message, the transaction hash,
//! which binds them together.

use std::collections::HashMap;

use bc_01_darc_identity::{Identity, Signer};
use shared_types::{Hash, Version};
use tracing::debug;

use super::errors::TransactionError;
use super::instruction::{Countered, Instruction, InstructionState, Signed, Unsigned};
use crate::algorithms::hashing;
use crate::ports::outbound::CounterSource;

/// Atomic batch of instructions.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientTransaction<S: InstructionState = Unsigned> {
    instructions: Vec<Instruction<S>>,
}

impl<S: InstructionState> ClientTransaction<S> {
    /// The instructions in order.
    pub fn instructions(&self) -> &[Instruction<S>] {
        &self.instructions
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// True if there are no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// SHA-256 over all instruction hashes. This is the message every signer signs.
    pub fn hash(&self) -> Hash {
        hashing::transaction_hash(self.instructions.iter().map(|i| i.hash()))
    }

    /// Hash that also covers the signatures.
    pub fn hash_with_signatures(&self) -> Hash {
        hashing::transaction_hash_with_signatures(
            self.instructions.iter().map(|i| (i.hash(), i.signatures())),
        )
    }
}

impl ClientTransaction<Unsigned> {
    /// Transaction hashed with the current protocol version.
    pub fn make(instructions: Vec<Instruction<Unsigned>>) -> Self {
        Self { instructions }
    }

    /// Transaction hashed with the rules of `version`.
    pub fn new(version: Version, instructions: Vec<Instruction<Unsigned>>) -> Self {
        Self {
            instructions: instructions
                .into_iter()
                .map(|i| i.with_version(version))
                .collect(),
        }
    }

    /// Append an instruction.
    pub fn push(&mut self, instruction: Instruction<Unsigned>) {
        self.instructions.push(instruction);
    }

    /// Fetch and bind counters for every instruction.
    ///
    /// The counters of all distinct signers are requested in a single call.
    /// A signer that signs several instructions gets consecutive counters,
    /// one per instruction, in instruction order.
    pub async fn update_counters(
        &self,
        source: &dyn CounterSource,
        signers_per_instruction: &[Vec<&dyn Signer>],
    ) -> Result<ClientTransaction<Countered>, TransactionError> {
        self.check_signer_sets(signers_per_instruction)?;

        let mut unique: Vec<Identity> = Vec::new();
        for signers in signers_per_instruction {
            for s in signers {
                let id = s.identity();
                if !unique.contains(&id) {
                    unique.push(id);
                }
            }
        }
        if unique.is_empty() {
            return self.bind_all(signers_per_instruction, HashMap::new());
        }

        let counters = source.get_signer_counters(&unique, 1).await?;
        if counters.len() != unique.len() {
            return Err(TransactionError::CounterResponseMismatch {
                requested: unique.len(),
                received: counters.len(),
            });
        }
        debug!(signers = unique.len(), "fetched signer counters");
        self.bind_all(signers_per_instruction, unique.into_iter().zip(counters).collect())
    }

    /// [`update_counters`](Self::update_counters) followed by
    /// [`sign_with`](ClientTransaction::<Countered>::sign_with).
    pub async fn update_counters_and_sign(
        &self,
        source: &dyn CounterSource,
        signers_per_instruction: &[Vec<&dyn Signer>],
    ) -> Result<ClientTransaction<Signed>, TransactionError> {
        self.update_counters(source, signers_per_instruction)
            .await?
            .sign_with(signers_per_instruction)
    }

    /// Bind the same signers to every instruction and sign.
    ///
    /// `next_counters[i]` is the counter `signers[i]` uses on the first
    /// instruction; it advances by one for each following instruction.
    pub fn fill_signers_and_sign_with(
        &self,
        next_counters: &[u64],
        signers: &[&dyn Signer],
    ) -> Result<ClientTransaction<Signed>, TransactionError> {
        if next_counters.len() != signers.len() {
            return Err(TransactionError::SignerCounterCountMismatch);
        }
        let sets: Vec<Vec<&dyn Signer>> = vec![signers.to_vec(); self.instructions.len()];
        let next = signers
            .iter()
            .map(|s| s.identity())
            .zip(next_counters.iter().copied())
            .collect();
        self.bind_all(&sets, next)?.sign_with(&sets)
    }

    fn check_signer_sets(&self, sets: &[Vec<&dyn Signer>]) -> Result<(), TransactionError> {
        if sets.len() != self.instructions.len() {
            return Err(TransactionError::SignerSetCountMismatch {
                instructions: self.instructions.len(),
                signer_sets: sets.len(),
            });
        }
        Ok(())
    }

    /// Assign counters from `next`, advancing each signer after every
    /// instruction it appears in.
    fn bind_all(
        &self,
        sets: &[Vec<&dyn Signer>],
        next: HashMap<Identity, u64>,
    ) -> Result<ClientTransaction<Countered>, TransactionError> {
        self.check_signer_sets(sets)?;
        // `None` once a counter has run past `u64::MAX`.
        let mut next: HashMap<Identity, Option<u64>> =
            next.into_iter().map(|(id, c)| (id, Some(c))).collect();
        let mut instructions = Vec::with_capacity(self.instructions.len());
        for (instr, signers) in self.instructions.iter().zip(sets) {
            let identities: Vec<Identity> = signers.iter().map(|s| s.identity()).collect();
            let counters = identities
                .iter()
                .map(|id| match next.get(id) {
                    Some(Some(c)) => Ok(*c),
                    Some(None) => Err(TransactionError::CounterOverflow),
                    None => Ok(0),
                })
                .collect::<Result<Vec<_>, _>>()?;
            let mut advanced: Vec<&Identity> = Vec::new();
            for id in &identities {
                if !advanced.contains(&id) {
                    if let Some(c) = next.get_mut(id) {
                        *c = c.and_then(|c| c.checked_add(1));
                    }
                    advanced.push(id);
                }
            }
            instructions.push(instr.bind_counters(identities.clone(), counters)?);
        }
        Ok(ClientTransaction { instructions })
    }
}

impl ClientTransaction<Countered> {
    /// Sign every instruction over the transaction hash with its signer set.
    pub fn sign_with(
        &self,
        signers_per_instruction: &[Vec<&dyn Signer>],
    ) -> Result<ClientTransaction<Signed>, TransactionError> {
        if signers_per_instruction.len() != self.instructions.len() {
            return Err(TransactionError::SignerSetCountMismatch {
                instructions: self.instructions.len(),
                signer_sets: signers_per_instruction.len(),
            });
        }
        let digest = self.hash();
        let instructions = self
            .instructions
            .iter()
            .zip(signers_per_instruction)
            .map(|(instr, signers)| instr.sign_with(&digest, signers))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(tx = %hex::encode(digest), "signed client transaction");
        Ok(ClientTransaction { instructions })
    }
}

impl ClientTransaction<Signed> {
    pub(crate) fn from_signed(instructions: Vec<Instruction<Signed>>) -> Self {
        Self { instructions }
    }

    /// True if every signature verifies against the transaction hash.
    pub fn verify_signatures(&self) -> bool {
        let digest = self.hash();
        self.instructions
            .iter()
            .all(|i| i.verify_signatures(&digest).len() == i.signatures().len())
    }
}
