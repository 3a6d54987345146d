//! # Shared Crypto - Curve Suite and Signatures
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | SHA-256 | Instruction, transaction and trie hashes |
//! | `suite` | Edwards25519 | Injectable point/scalar arithmetic |
//! | `schnorr` | Schnorr over a `Suite` | Ed25519 identities (kyber format) |
//! | `ecdsa` | secp256k1 | TSM identities |
//!
//! ## Security Properties
//!
//! - **Schnorr**: fresh random nonce per signature, signature is `R || s`
//! - **secp256k1**: RFC 6979 deterministic nonces, SHA-256 prehash
//! - Secret scalars are zeroized on drop

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ecdsa;
pub mod errors;
pub mod hashing;
pub mod schnorr;
pub mod suite;

// Re-exports
pub use ecdsa::{Secp256k1KeyPair, Secp256k1PublicKey, Secp256k1Signature};
pub use errors::CryptoError;
pub use hashing::{sha256, sha256_many, Sha256Hasher};
pub use suite::{Edwards25519Suite, Suite};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
