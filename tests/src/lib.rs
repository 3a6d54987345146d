//! # ByzCoin Client Test Suite
//!
//! Cross-crate scenarios that no single crate can test on its own.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── ledger_flows.rs   # Transactions against the in-memory conode
//!     └── proof_flows.rs    # Proof walking and chain anchoring
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p bc-tests
//!
//! # By category
//! cargo test -p bc-tests integration::ledger_flows::
//! cargo test -p bc-tests integration::proof_flows::
//!
//! # Benchmarks
//! cargo bench -p bc-tests
//! ```

pub mod integration;
