//! # Shared Types Crate
//!
//! Identifiers and protocol constants shared across the ByzCoin client crates.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `InstanceId`, `DarcId` and `SkipBlockId` are
//!   defined once here and reused by the transaction and proof crates.
//! - **Explicit codec table**: wire message names live in a
//!   [`MessageRegistry`] that is built once and passed by reference. There is
//!   no process-wide mutable registration.

pub mod entities;
pub mod errors;
pub mod registry;
pub mod version;

pub use entities::*;
pub use errors::*;
pub use registry::{MessageKind, MessageRegistry};
pub use version::{Version, CURRENT_VERSION};
