//! # Instructions and Client Transactions (BC-02)
//!
//! Builds, counts and signs the state-changing operations a client submits
//! to a ByzCoin ledger.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): `Argument`, `Instruction<S>`, `ClientTransaction<S>`
//! - **Algorithms** (`algorithms/`): canonical instruction and transaction hashing
//! - **Ports Layer** (`ports/`): the `CounterSource` the conodes provide
//! - **Wire** (`wire.rs`): protobuf records and validated conversions
//!
//! ## Lifecycle
//!
//! ```text
//! Unsigned --update_counters--> Countered --sign_with--> Signed --encode--> wire
//! ```
//!
//! Only `Signed` values can be encoded, so a transaction with unset counters
//! or missing signatures never leaves the client.
//!
//! ## Replay Protection
//!
//! Every signer carries a counter one above the last counter the ledger
//! accepted for it. Signing twice from the same `Countered` value reuses the
//! counter, and the conode rejects the second submission.

pub mod algorithms;
pub mod domain;
pub mod ports;
pub mod wire;

// Re-export public API
pub use domain::argument::{Argument, Arguments};
pub use domain::errors::TransactionError;
pub use domain::instruction::{Action, Countered, Instruction, InstructionState, Signed, Unsigned};
pub use domain::transaction::ClientTransaction;
pub use ports::outbound::{CounterSource, MockCounterSource};
