//! # DARC Identities and Signers (BC-01)
//!
//! Who may sign a ByzCoin instruction, and how.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): `Identity`, the `Signer` capability and
//!   its Ed25519 / TSM implementations
//! - **Wire** (`wire.rs`): protobuf records for the darc `Identity` message
//!
//! ## Identity Kinds
//!
//! | Kind | String form | Verifies with |
//! |------|-------------|---------------|
//! | Ed25519 | `ed25519:<hex point>` | Schnorr over Edwards25519 |
//! | DARC | `darc:<hex id>` | never (delegates to another DARC) |
//! | TSM | `tsm:<hex key>` | ECDSA over secp256k1 |

pub mod domain;
pub mod wire;

// Re-export public API
pub use domain::errors::IdentityError;
pub use domain::identity::{Ed25519Identity, Identity};
pub use domain::signer::{Ed25519Signer, Signer, TsmSigner};
