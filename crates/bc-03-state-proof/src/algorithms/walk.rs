//! # Proof Walk
//!
//! Follow the path of `key` from the root down through the interior nodes.
//! At depth `i`, a set bit `i` of the key hash takes the left child. After
//! the last interior node the expected reference must be the hash of either
//! the leaf or the empty node carried by the proof, and that node's prefix
//! must be exactly the path walked so far.

use tracing::trace;

use super::bits::{key_to_bits, KEY_BITS};
use super::node_hash::{hash_empty, hash_interior, hash_leaf};
use crate::domain::errors::ProofError;
use crate::domain::nodes::InclusionProof;

/// Walk `proof` for `key`.
///
/// The first expected hash is `root` if given, otherwise the hash of the
/// first interior node. Returns `Ok(true)` when the leaf holds `key`,
/// `Ok(false)` when the proof shows `key` is absent.
pub fn walk(proof: &InclusionProof, key: &[u8], root: Option<&[u8]>) -> Result<bool, ProofError> {
    if key.is_empty() {
        return Err(ProofError::KeyIsNil);
    }
    let first = proof.interiors.first().ok_or(ProofError::NoInteriorNode)?;
    if proof.interiors.len() > KEY_BITS {
        return Err(ProofError::PathTooLong(proof.interiors.len()));
    }

    let bits = key_to_bits(key);
    let mut expected: Vec<u8> = match root {
        Some(r) => r.to_vec(),
        None => first.hash().to_vec(),
    };

    for (i, interior) in proof.interiors.iter().enumerate() {
        if expected != interior.hash() {
            return Err(ProofError::InvalidInteriorNode);
        }
        expected = if bits[i] {
            interior.left.clone()
        } else {
            interior.right.clone()
        };
    }

    let depth = proof.interiors.len();
    let path = &bits[..depth];

    let leaf = &proof.leaf;
    if expected == hash_leaf(&proof.nonce, &leaf.prefix, &leaf.key, &leaf.value) {
        if leaf.prefix != path {
            return Err(ProofError::InvalidLeafPrefix);
        }
        trace!(depth, "walk ended on leaf");
        return Ok(leaf.key == key);
    }

    if expected == hash_empty(&proof.nonce, &proof.empty.prefix) {
        if proof.empty.prefix != path {
            return Err(ProofError::InvalidEmptyPrefix);
        }
        trace!(depth, "walk ended on empty node");
        return Ok(false);
    }

    Err(ProofError::NoCorrespondingNode)
}

/// Hash of the first interior node, the root the proof claims.
pub fn claimed_root(proof: &InclusionProof) -> Result<[u8; 32], ProofError> {
    proof
        .interiors
        .first()
        .map(|n| hash_interior(&n.left, &n.right))
        .ok_or(ProofError::NoInteriorNode)
}
