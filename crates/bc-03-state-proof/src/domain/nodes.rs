//! # Trie Nodes
//!
//! The nodes an inclusion proof carries. Interior nodes hold the hashes of
//! their two children; the walk ends on exactly one leaf or empty node, the
//! other one is left at its default.

use serde::{Deserialize, Serialize};
use shared_types::Hash;

use super::errors::ProofError;
use crate::algorithms::{self, node_hash};

/// Interior node: references to both children.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteriorNode {
    /// Hash of the left child (set bit)
    pub left: Vec<u8>,
    /// Hash of the right child (clear bit)
    pub right: Vec<u8>,
}

impl InteriorNode {
    /// Create an interior node.
    pub fn new(left: impl Into<Vec<u8>>, right: impl Into<Vec<u8>>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }

    /// `SHA-256(left || right)`
    pub fn hash(&self) -> Hash {
        node_hash::hash_interior(&self.left, &self.right)
    }
}

/// Leaf node: a key and its value at the end of `prefix`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafNode {
    /// Path bits from the root
    pub prefix: Vec<bool>,
    /// Stored key
    pub key: Vec<u8>,
    /// Stored value
    pub value: Vec<u8>,
}

/// Empty node: no key lives below `prefix`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyNode {
    /// Path bits from the root
    pub prefix: Vec<bool>,
}

/// Path from the trie root to where a key lives or would live.
///
/// For an absence proof the leaf may hold a different key that shares the
/// path, or the walk ends on the empty node.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InclusionProof {
    /// Interior nodes, root first
    pub interiors: Vec<InteriorNode>,
    /// Terminal leaf, default if the walk ends on an empty node
    pub leaf: LeafNode,
    /// Terminal empty node, default if the walk ends on a leaf
    pub empty: EmptyNode,
    /// Per-trie salt of leaf and empty hashes
    pub nonce: Vec<u8>,
}

impl InclusionProof {
    /// Does the proof show `key` is present? The root is taken from the
    /// proof itself.
    pub fn exists(&self, key: &[u8]) -> Result<bool, ProofError> {
        algorithms::walk(self, key, None)
    }

    /// Like [`exists`](Self::exists) but the walk must start at `root`.
    pub fn exists_under(&self, key: &[u8], root: &[u8]) -> Result<bool, ProofError> {
        algorithms::walk(self, key, Some(root))
    }

    /// Root hash the proof claims.
    pub fn root(&self) -> Result<Hash, ProofError> {
        algorithms::walk::claimed_root(self)
    }

    /// Key in the leaf. For an absence proof this is not the key asked for.
    pub fn key(&self) -> &[u8] {
        &self.leaf.key
    }

    /// Value in the leaf.
    pub fn value(&self) -> &[u8] {
        &self.leaf.value
    }

    /// Hash of the leaf as the parent references it.
    pub fn leaf_hash(&self) -> Hash {
        node_hash::hash_leaf(&self.nonce, &self.leaf.prefix, &self.leaf.key, &self.leaf.value)
    }

    /// Hash of the empty node as the parent references it.
    pub fn empty_hash(&self) -> Hash {
        node_hash::hash_empty(&self.nonce, &self.empty.prefix)
    }
}
