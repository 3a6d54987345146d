//! # Canonical Hashing
//!
//! The byte layout hashed here must match the conodes exactly, otherwise
//! every signature is rejected.
//!
//! ## Instruction hash
//!
//! ```text
//! SHA-256(
//!     instance_id                                  32 bytes
//!     type                                         1 byte: 0 spawn, 1 invoke, 2 delete
//!     contract_id                                  utf-8
//!     command                                      utf-8, invoke only, version >= 1
//!     for each argument:
//!         u64le(len(name)) || name || u64le(len(value)) || value
//!     for each counter:   u64le(counter)
//!     for each identity:  u64le(len(pub)) || pub
//! )
//! ```
//!
//! Signatures are not hashed; they are attached afterwards.

use bc_01_darc_identity::Identity;
use shared_crypto::Sha256Hasher;
use shared_types::{Hash, InstanceId, Version};

use crate::domain::instruction::Action;

/// Hash of one instruction.
pub fn instruction_hash(
    instance_id: &InstanceId,
    action: &Action,
    version: Version,
    counters: &[u64],
    identities: &[Identity],
) -> Hash {
    let mut h = Sha256Hasher::new();
    h.update(instance_id.as_bytes());
    h.update([action.type_byte()]);
    h.update(action.contract_id().as_bytes());
    if let Action::Invoke { command, .. } = action {
        if version.hashes_invoke_command() {
            h.update(command.as_bytes());
        }
    }
    if let Some(args) = action.args() {
        for arg in args {
            h.update_len_prefixed(arg.name().as_bytes());
            h.update_len_prefixed(arg.value());
        }
    }
    for counter in counters {
        h.update_u64_le(*counter);
    }
    for id in identities {
        h.update_len_prefixed(id.public_bytes());
    }
    h.finalize()
}

/// Instance id derived from an instruction.
///
/// `SHA-256(hash || u32le(#sigs) || for each sig: u32le(len) || sig || what)`.
/// A spawned instance lives at `derive_id(.., "")`.
pub fn derive_id(instruction_hash: &Hash, signatures: &[Vec<u8>], what: &str) -> InstanceId {
    let mut h = Sha256Hasher::new();
    h.update(instruction_hash);
    h.update_u32_le(signatures.len() as u32);
    for sig in signatures {
        h.update_u32_le(sig.len() as u32);
        h.update(sig);
    }
    h.update(what.as_bytes());
    InstanceId::new(h.finalize())
}

/// SHA-256 over the concatenated instruction hashes.
pub fn transaction_hash<I>(instruction_hashes: I) -> Hash
where
    I: IntoIterator<Item = Hash>,
{
    let mut h = Sha256Hasher::new();
    for ih in instruction_hashes {
        h.update(ih);
    }
    h.finalize()
}

/// Like [`transaction_hash`] but each instruction hash is followed by its signatures.
pub fn transaction_hash_with_signatures<'a, I>(instructions: I) -> Hash
where
    I: IntoIterator<Item = (Hash, &'a [Vec<u8>])>,
{
    let mut h = Sha256Hasher::new();
    for (ih, sigs) in instructions {
        h.update(ih);
        for sig in sigs {
            h.update(sig);
        }
    }
    h.finalize()
}
