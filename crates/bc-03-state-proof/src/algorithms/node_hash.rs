//! # Node Hashing
//!
//! ```text
//! interior = SHA-256(left || right)
//! leaf     = SHA-256(0x03 || nonce || pack(prefix) || u32le(len(prefix)) || key || value)
//! empty    = SHA-256(0x02 || nonce || pack(prefix) || u32le(len(prefix)))
//! ```
//!
//! The nonce is chosen once per trie and salts leaf and empty hashes.

use shared_crypto::Sha256Hasher;
use shared_types::Hash;

use super::bits::pack_bits;

/// Type byte of a leaf node.
pub const LEAF_TYPE: u8 = 3;
/// Type byte of an empty node.
pub const EMPTY_TYPE: u8 = 2;

/// Hash of an interior node from its child references.
pub fn hash_interior(left: &[u8], right: &[u8]) -> Hash {
    let mut h = Sha256Hasher::new();
    h.update(left).update(right);
    h.finalize()
}

/// Hash of a leaf node.
pub fn hash_leaf(nonce: &[u8], prefix: &[bool], key: &[u8], value: &[u8]) -> Hash {
    let mut h = Sha256Hasher::new();
    h.update([LEAF_TYPE])
        .update(nonce)
        .update(pack_bits(prefix))
        .update_u32_le(prefix.len() as u32)
        .update(key)
        .update(value);
    h.finalize()
}

/// Hash of an empty node.
pub fn hash_empty(nonce: &[u8], prefix: &[bool]) -> Hash {
    let mut h = Sha256Hasher::new();
    h.update([EMPTY_TYPE])
        .update(nonce)
        .update(pack_bits(prefix))
        .update_u32_le(prefix.len() as u32);
    h.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_crypto::sha256;

    #[test]
    fn test_leaf_layout() {
        let mut buf = vec![3u8];
        buf.extend_from_slice(b"nonce");
        buf.push(0xC0);
        buf.extend_from_slice(&2u32.to_le_bytes());
        buf.extend_from_slice(b"k");
        buf.extend_from_slice(b"v");
        assert_eq!(hash_leaf(b"nonce", &[true, true], b"k", b"v"), sha256(&buf));
    }

    #[test]
    fn test_empty_layout() {
        let mut buf = vec![2u8];
        buf.extend_from_slice(b"n");
        buf.push(0x00);
        buf.extend_from_slice(&1u32.to_le_bytes());
        assert_eq!(hash_empty(b"n", &[false]), sha256(&buf));
    }

    #[test]
    fn test_prefix_length_is_hashed() {
        // Same packed bytes, different lengths.
        assert_ne!(hash_empty(b"n", &[false]), hash_empty(b"n", &[false, false]));
    }

    #[test]
    fn test_leaf_and_empty_are_domain_separated() {
        assert_ne!(hash_leaf(b"n", &[], b"", b""), hash_empty(b"n", &[]));
    }
}
