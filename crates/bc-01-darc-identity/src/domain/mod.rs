//! # Domain Layer
//!
//! Identities and signers. No I/O.

pub mod errors;
pub mod identity;
pub mod signer;
