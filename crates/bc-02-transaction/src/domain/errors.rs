//! # Transaction Errors
//!
//! Local validation failures while building, counting, signing or decoding
//! instructions and transactions.

use bc_01_darc_identity::IdentityError;
use thiserror::Error;

/// Errors raised by instructions and client transactions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransactionError {
    /// Signer list and bound identities differ in length
    #[error("the number of signers does not match the number of identities")]
    SignerIdentityCountMismatch,

    /// Signer list and bound counters differ in length
    #[error("the number of signers does not match the number of counters")]
    SignerCounterCountMismatch,

    /// A signer is not the identity bound at its position
    #[error("signer identity is not set correctly")]
    SignerIdentityMismatch,

    /// Identities and counters passed to `bind_counters` differ in length
    #[error("got {identities} identities but {counters} counters")]
    CounterBindingMismatch {
        /// Number of identities
        identities: usize,
        /// Number of counters
        counters: usize,
    },

    /// Number of signer sets differs from the number of instructions
    #[error("got {signer_sets} signer sets for {instructions} instructions")]
    SignerSetCountMismatch {
        /// Number of instructions
        instructions: usize,
        /// Number of signer sets
        signer_sets: usize,
    },

    /// Counter source answered with the wrong number of counters
    #[error("requested {requested} counters, received {received}")]
    CounterResponseMismatch {
        /// Number of identities asked for
        requested: usize,
        /// Number of counters received
        received: usize,
    },

    /// A signer counter would exceed `u64::MAX`
    #[error("signer counter overflow")]
    CounterOverflow,

    /// Counter source failed
    #[error("counter source failed: {0}")]
    CounterSource(String),

    /// Decoded instruction has zero or several actions set
    #[error("instruction must have exactly one of spawn, invoke or delete set")]
    InvalidAction,

    /// Decoded instruction has mismatched counter/identity/signature lists
    #[error("malformed instruction: {identities} identities, {counters} counters, {signatures} signatures")]
    MalformedSigners {
        /// Number of identities
        identities: usize,
        /// Number of counters
        counters: usize,
        /// Number of signatures
        signatures: usize,
    },

    /// Decoded instance id is not 32 bytes
    #[error("invalid instance id length: {0}")]
    InvalidInstanceId(usize),

    /// Signing or identity decoding failed
    #[error(transparent)]
    Identity(#[from] IdentityError),

    /// Protobuf decoding failed
    #[error("decode error: {0}")]
    Decode(String),
}
