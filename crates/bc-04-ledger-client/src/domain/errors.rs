//! # Client Errors
//!
//! Remote failures are passed through as they are. Nothing is retried.

use bc_02_transaction::TransactionError;
use bc_03_state_proof::ProofError;
use shared_types::{TypesError, Version};
use thiserror::Error;

/// Errors raised by the ledger client.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    /// Conode answered with another protocol version
    #[error("version mismatch: expected {expected}, got {actual}")]
    VersionMismatch {
        /// Version the client speaks
        expected: Version,
        /// Version in the response
        actual: Version,
    },

    /// No skipchain id configured
    #[error("skipchain id is not set")]
    MissingSkipchainId,

    /// Conode refused the request
    #[error("conode refused the request: {0}")]
    Refused(String),

    /// Conode could not be reached
    #[error("network error: {0}")]
    Network(String),

    /// Response carries no proof
    #[error("response carries no proof")]
    MissingProof,

    /// Message is not part of the service
    #[error(transparent)]
    Registry(#[from] TypesError),

    /// Transaction could not be built or signed
    #[error(transparent)]
    Transaction(#[from] TransactionError),

    /// Proof is invalid or does not show the instance
    #[error(transparent)]
    Proof(#[from] ProofError),
}
