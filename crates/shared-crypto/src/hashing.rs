//! # SHA-256 Hashing
//!
//! Every digest on the ledger (instruction hashes, transaction hashes, trie
//! nodes, derived instance ids) is SHA-256.

use sha2::{Digest, Sha256};

/// SHA-256 output (256-bit).
pub type Hash = [u8; 32];

/// Stateful SHA-256 hasher with little-endian length helpers.
#[derive(Clone, Default)]
pub struct Sha256Hasher {
    inner: Sha256,
}

impl Sha256Hasher {
    /// Create new hasher.
    pub fn new() -> Self {
        Self {
            inner: Sha256::new(),
        }
    }

    /// Update with data.
    pub fn update(&mut self, data: impl AsRef<[u8]>) -> &mut Self {
        self.inner.update(data.as_ref());
        self
    }

    /// Append `v` as 8 little-endian bytes.
    pub fn update_u64_le(&mut self, v: u64) -> &mut Self {
        self.inner.update(v.to_le_bytes());
        self
    }

    /// Append `v` as 4 little-endian bytes.
    pub fn update_u32_le(&mut self, v: u32) -> &mut Self {
        self.inner.update(v.to_le_bytes());
        self
    }

    /// Append `u64-LE(len(data)) || data`.
    pub fn update_len_prefixed(&mut self, data: impl AsRef<[u8]>) -> &mut Self {
        let data = data.as_ref();
        self.update_u64_le(data.len() as u64);
        self.inner.update(data);
        self
    }

    /// Finalize and return hash.
    pub fn finalize(self) -> Hash {
        self.inner.finalize().into()
    }
}

/// Hash data with SHA-256 (one-shot).
pub fn sha256(data: &[u8]) -> Hash {
    Sha256::digest(data).into()
}

/// Hash the concatenation of multiple inputs.
pub fn sha256_many(inputs: &[&[u8]]) -> Hash {
    let mut hasher = Sha256Hasher::new();
    for input in inputs {
        hasher.update(input);
    }
    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_vector() {
        assert_eq!(
            hex::encode(sha256(b"abc")),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_streaming_matches_oneshot() {
        let mut hasher = Sha256Hasher::new();
        hasher.update(b"hello ").update(b"world");
        assert_eq!(hasher.finalize(), sha256(b"hello world"));
        assert_eq!(sha256_many(&[b"hello ", b"world"]), sha256(b"hello world"));
    }

    #[test]
    fn test_len_prefixed() {
        let mut a = Sha256Hasher::new();
        a.update_len_prefixed(b"ab");
        let mut b = Sha256Hasher::new();
        b.update([2, 0, 0, 0, 0, 0, 0, 0]).update(b"ab");
        assert_eq!(a.finalize(), b.finalize());
    }

    #[test]
    fn test_u32_le() {
        let mut a = Sha256Hasher::new();
        a.update_u32_le(0x0102_0304);
        assert_eq!(a.finalize(), sha256(&[4, 3, 2, 1]));
    }
}
