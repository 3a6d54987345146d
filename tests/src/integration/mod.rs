//! # Integration Tests
//!
//! End-to-end flows across the identity, transaction, proof and client crates.

pub mod ledger_flows;
pub mod proof_flows;
