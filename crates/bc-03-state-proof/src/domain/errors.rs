//! # Proof Errors
//!
//! A key that is absent from the trie is not an error. Every variant here
//! means the proof is malformed, corrupted or does not answer the question
//! asked, and must not be trusted.

use shared_types::InstanceId;
use thiserror::Error;

/// Errors raised while checking or reading a proof.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProofError {
    /// Lookup key is empty
    #[error("key is nil")]
    KeyIsNil,

    /// Proof has no interior node
    #[error("no interior node")]
    NoInteriorNode,

    /// An interior node does not hash to the reference held by its parent
    #[error("invalid interior node")]
    InvalidInteriorNode,

    /// Path is longer than the 256 bits of a key hash
    #[error("path of {0} interior nodes is longer than the key hash")]
    PathTooLong(usize),

    /// Leaf reached but its prefix is not the walked path
    #[error("invalid prefix in leaf node")]
    InvalidLeafPrefix,

    /// Empty node reached but its prefix is not the walked path
    #[error("invalid prefix in empty node")]
    InvalidEmptyPrefix,

    /// Last reference matches neither the leaf nor the empty node
    #[error("no corresponding leaf/empty node with respect to the interior nodes")]
    NoCorrespondingNode,

    /// Accessor called on a proof whose leaf is not proven
    #[error("this is a proof of absence")]
    Absence,

    /// Instance is not proven by this proof
    #[error("instance {0} is not in the proof")]
    InstanceNotFound(InstanceId),

    /// Instance exists but belongs to another contract
    #[error("contract mismatch: expected {expected}, got {actual}")]
    ContractMismatch {
        /// Contract asked for
        expected: String,
        /// Contract in the leaf
        actual: String,
    },

    /// Leaf holds an unknown state action
    #[error("unknown state action: {0}")]
    UnknownStateAction(i32),

    /// Protobuf decoding failed
    #[error("decode error: {0}")]
    Decode(String),

    /// Proof is not anchored in the trusted chain
    #[error(transparent)]
    Chain(#[from] ChainError),
}

/// Failures linking a proof to the trusted skipchain.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChainError {
    /// Latest block contents do not hash to its id
    #[error("invalid block: hash does not match")]
    BlockHashMismatch,

    /// Latest block does not commit to the root of the inclusion proof
    #[error("root of trie is not in skipblock")]
    RootNotInBlock,

    /// Latest block data is not a `DataHeader`
    #[error("invalid data header: {0}")]
    InvalidHeader(String),

    /// Proof carries no forward link at all
    #[error("proof has no forward links")]
    NoLinks,

    /// A link is unsigned, wrongly signed or starts at the wrong block
    #[error("stored skipblock is not properly evolved from genesis block")]
    NotEvolved,

    /// Links end somewhere other than the latest block
    #[error("last forward link does not point to the latest block")]
    LatestMismatch,
}
