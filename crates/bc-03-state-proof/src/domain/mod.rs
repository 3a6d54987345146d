//! # Domain Layer
//!
//! Proof structures and the values stored in trie leaves.

pub mod chain;
pub mod errors;
pub mod instance;
pub mod nodes;
pub mod proof;
pub mod values;
