//! # Identity Errors

use shared_crypto::CryptoError;
use thiserror::Error;

/// Errors raised by identities and signers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityError {
    /// `sign` was called with an empty message
    #[error("nothing to sign, message is empty")]
    EmptyMessage,

    /// String form is not `<type>:<hex>`
    #[error("invalid identity string: {0}")]
    InvalidFormat(String),

    /// Unknown identity type prefix
    #[error("unknown identity type: {0}")]
    UnknownType(String),

    /// Wire identity has none of its variants set
    #[error("identity has no variant set")]
    MissingVariant,

    /// Key material did not decode
    #[error("invalid key material: {0}")]
    Crypto(#[from] CryptoError),
}
