//! # Key Bits
//!
//! A key's position in the trie is given by the bits of `SHA-256(key)`,
//! most significant bit of the first byte first. A set bit goes left.

use shared_crypto::sha256;

/// Number of bits in a key hash, and so the maximum trie depth.
pub const KEY_BITS: usize = 256;

/// The 256 path bits of `key`.
pub fn key_to_bits(key: &[u8]) -> Vec<bool> {
    let h = sha256(key);
    (0..KEY_BITS)
        .map(|i| (h[i >> 3] << (i % 8)) & 0x80 != 0)
        .collect()
}

/// Pack bits MSB-first into bytes, zero-padding the last byte.
pub fn pack_bits(bits: &[bool]) -> Vec<u8> {
    let mut buf = vec![0u8; (bits.len() + 7) / 8];
    for (i, bit) in bits.iter().enumerate() {
        if *bit {
            buf[i >> 3] |= 0x80 >> (i % 8);
        }
    }
    buf
}
