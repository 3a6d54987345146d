//! # BC-03 State Proofs
//!
//! Verifies what a conode claims about the global state.
//!
//! ## Purpose
//!
//! A [`Proof`] bundles three things:
//! - an [`InclusionProof`]: the path from the trie root to the leaf or empty
//!   node where a key lives or would live
//! - the latest skipblock, whose `DataHeader` commits to the trie root
//! - the forward links from the genesis block to that latest block
//!
//! A key that is not in the trie is a valid answer (`Ok(false)`). A proof
//! whose hashes do not line up is an error and must not be trusted.
//!
//! ## Module Structure
//!
//! ```text
//! bc-03-state-proof/
//! ├── domain/          # Trie nodes, Proof, chain records, leaf values, errors
//! ├── algorithms/      # Key bits, node hashing, the proof walk
//! ├── ports/           # ForwardLinkVerifier
//! ├── wire.rs          # Protobuf records for proofs and trie nodes
//! └── testing.rs       # MemoryTrie + TestChain (feature "testing")
//! ```

pub mod algorithms;
pub mod domain;
pub mod ports;
pub mod wire;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Re-exports
pub use algorithms::{hash_empty, hash_interior, hash_leaf, key_to_bits, pack_bits};
pub use domain::chain::{ByzcoinSig, ForwardLink, Roster, ServerIdentity, SkipBlock};
pub use domain::errors::{ChainError, ProofError};
pub use domain::instance::Instance;
pub use domain::nodes::{EmptyNode, InclusionProof, InteriorNode, LeafNode};
pub use domain::proof::Proof;
pub use domain::values::{ChainConfig, DataHeader, StateAction, StateChangeBody, CONFIG_CONTRACT_ID};
pub use ports::outbound::{ForwardLinkVerifier, SchnorrLinkVerifier};
