//! # Error Types
//!
//! Errors raised while building shared identifiers or looking up messages.

use thiserror::Error;

/// Errors for shared types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    /// A fixed-size identifier got the wrong number of bytes.
    #[error("invalid {what} length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Which identifier.
        what: &'static str,
        /// Expected byte length.
        expected: usize,
        /// Actual byte length.
        actual: usize,
    },

    /// Hex decoding failed.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Message name is not part of the registry.
    #[error("unknown message: {0}")]
    UnknownMessage(String),

    /// Request is registered with another response than the one decoded.
    #[error("request {request} is answered by {registered}, not {expected}")]
    ReplyMismatch {
        /// The request name.
        request: String,
        /// Response the caller decodes.
        expected: String,
        /// Response in the registry.
        registered: String,
    },

    /// Message is known but not the kind the caller expected.
    #[error("unexpected message {name}: expected a {expected:?}")]
    UnexpectedKind {
        /// The registered name.
        name: String,
        /// What the caller wanted.
        expected: crate::registry::MessageKind,
    },
}
