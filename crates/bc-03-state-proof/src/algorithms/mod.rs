//! # Algorithms
//!
//! Trie hashing and proof walking. Pure functions.

pub mod bits;
pub mod node_hash;
pub mod walk;

pub use bits::{key_to_bits, pack_bits};
pub use node_hash::{hash_empty, hash_interior, hash_leaf};
pub use walk::walk;
