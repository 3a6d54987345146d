//! # ECDSA Signatures (secp256k1)
//!
//! Keys behind `tsm:` identities.
//!
//! ## Security Properties
//!
//! - RFC 6979 deterministic nonces (no RNG dependency for signing)
//! - Messages are prehashed with SHA-256
//! - Signatures are 64-byte `r || s`

use crate::CryptoError;
use k256::ecdsa::{
    signature::{Signer, Verifier},
    Signature, SigningKey, VerifyingKey,
};
use zeroize::Zeroize;

/// Length of a compressed secp256k1 public key.
pub const SECP256K1_PUBLIC_KEY_LEN: usize = 33;

/// Length of an `r || s` signature.
pub const SECP256K1_SIGNATURE_LEN: usize = 64;

/// Compressed secp256k1 public key (33 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Secp256k1PublicKey([u8; SECP256K1_PUBLIC_KEY_LEN]);

impl Secp256k1PublicKey {
    /// Create from compressed bytes (33 bytes, starting with 0x02 or 0x03).
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let arr: [u8; SECP256K1_PUBLIC_KEY_LEN] =
            bytes.try_into().map_err(|_| CryptoError::InvalidKeyLength {
                expected: SECP256K1_PUBLIC_KEY_LEN,
                actual: bytes.len(),
            })?;
        VerifyingKey::from_sec1_bytes(&arr).map_err(|_| CryptoError::InvalidPublicKey)?;
        Ok(Self(arr))
    }

    /// Get raw compressed bytes.
    pub fn as_bytes(&self) -> &[u8; SECP256K1_PUBLIC_KEY_LEN] {
        &self.0
    }

    /// Verify a signature given as raw bytes.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> Result<(), CryptoError> {
        let verifying_key =
            VerifyingKey::from_sec1_bytes(&self.0).map_err(|_| CryptoError::InvalidPublicKey)?;

        let sig = Signature::from_slice(signature).map_err(|_| CryptoError::InvalidSignature)?;

        verifying_key
            .verify(message, &sig)
            .map_err(|_| CryptoError::SignatureVerificationFailed)
    }
}

/// ECDSA signature (64 bytes, r||s format).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Secp256k1Signature([u8; SECP256K1_SIGNATURE_LEN]);

impl Secp256k1Signature {
    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; SECP256K1_SIGNATURE_LEN] {
        &self.0
    }

    /// Owned bytes.
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

/// secp256k1 ECDSA keypair.
pub struct Secp256k1KeyPair {
    signing_key: SigningKey,
}

impl Secp256k1KeyPair {
    /// Generate random keypair.
    pub fn generate() -> Self {
        let signing_key = SigningKey::random(&mut rand::thread_rng());
        Self { signing_key }
    }

    /// Create from secret key bytes (32 bytes).
    pub fn from_bytes(bytes: [u8; 32]) -> Result<Self, CryptoError> {
        let signing_key =
            SigningKey::from_bytes((&bytes).into()).map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(Self { signing_key })
    }

    /// Get public key (compressed, 33 bytes).
    pub fn public_key(&self) -> Secp256k1PublicKey {
        // SEC1 compressed encoding is always 33 bytes.
        let sec1_bytes = self.signing_key.verifying_key().to_sec1_bytes();
        let mut bytes = [0u8; SECP256K1_PUBLIC_KEY_LEN];
        bytes.copy_from_slice(&sec1_bytes[..SECP256K1_PUBLIC_KEY_LEN]);
        Secp256k1PublicKey(bytes)
    }

    /// Sign a message (deterministic RFC 6979).
    pub fn sign(&self, message: &[u8]) -> Secp256k1Signature {
        let sig: Signature = self.signing_key.sign(message);
        Secp256k1Signature(sig.to_bytes().into())
    }

    /// Secret key bytes. The caller owns zeroizing the copy.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.signing_key.to_bytes().into()
    }
}

impl Drop for Secp256k1KeyPair {
    fn drop(&mut self) {
        let mut bytes: [u8; 32] = self.signing_key.to_bytes().into();
        bytes.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_verify() {
        let keypair = Secp256k1KeyPair::generate();
        let message = b"Hello, secp256k1!";

        let signature = keypair.sign(message);
        let result = keypair.public_key().verify(message, signature.as_bytes());

        assert!(result.is_ok());
    }

    #[test]
    fn test_wrong_message_fails() {
        let keypair = Secp256k1KeyPair::generate();

        let signature = keypair.sign(b"message1");
        let result = keypair.public_key().verify(b"message2", signature.as_bytes());

        assert_eq!(result, Err(CryptoError::SignatureVerificationFailed));
    }

    #[test]
    fn test_deterministic_signatures() {
        let keypair = Secp256k1KeyPair::from_bytes([0xABu8; 32]).unwrap();
        let message = b"deterministic test";

        assert_eq!(keypair.sign(message), keypair.sign(message));
    }

    #[test]
    fn test_public_key_from_slice() {
        let keypair = Secp256k1KeyPair::generate();
        let pk = keypair.public_key();
        assert_eq!(Secp256k1PublicKey::from_slice(pk.as_bytes()).unwrap(), pk);
        assert!(Secp256k1PublicKey::from_slice(&pk.as_bytes()[..32]).is_err());
        assert!(Secp256k1PublicKey::from_slice(&[0x05; 33]).is_err());
    }

    #[test]
    fn test_roundtrip_bytes() {
        let original = Secp256k1KeyPair::generate();
        let bytes = original.to_bytes();
        let restored = Secp256k1KeyPair::from_bytes(bytes).unwrap();

        assert_eq!(original.public_key(), restored.public_key());
    }
}
