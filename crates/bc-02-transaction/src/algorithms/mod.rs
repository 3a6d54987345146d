//! # Algorithms
//!
//! Canonical hashing shared by the client and the conodes.

pub mod hashing;

pub use hashing::{derive_id, instruction_hash, transaction_hash, transaction_hash_with_signatures};
