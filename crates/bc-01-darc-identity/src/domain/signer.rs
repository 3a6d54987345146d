//! # Signers
//!
//! An identity plus the private key needed to sign for it. Private material
//! stays in memory and is zeroized on drop.

use curve25519_dalek::scalar::Scalar;
use shared_crypto::{schnorr, Edwards25519Suite, Secp256k1KeyPair, Suite};
use zeroize::{Zeroize, Zeroizing};

use super::errors::IdentityError;
use super::identity::Identity;

/// Capability to sign on behalf of an [`Identity`].
pub trait Signer: Send + Sync {
    /// The identity this signer signs for.
    fn identity(&self) -> Identity;

    /// Sign `message`. Empty messages are refused.
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, IdentityError>;

    /// Encoded private key.
    fn private_bytes(&self) -> Zeroizing<Vec<u8>>;
}

// =============================================================================
// ED25519
// =============================================================================

/// Schnorr signer over Edwards25519, compatible with kyber's `schnorr.Sign`.
pub struct Ed25519Signer {
    suite: Edwards25519Suite,
    secret: Scalar,
    identity: Identity,
}

impl Ed25519Signer {
    /// Signer for a known private scalar.
    pub fn new(secret: Scalar) -> Self {
        let suite = Edwards25519Suite;
        let identity = Identity::ed25519(suite.base_mul(&secret));
        Self {
            suite,
            secret,
            identity,
        }
    }

    /// Signer with a fresh random key.
    pub fn generate() -> Self {
        Self::new(Edwards25519Suite.random_scalar())
    }

    /// Signer from a 32-byte little-endian canonical scalar.
    pub fn from_private_bytes(bytes: &[u8]) -> Result<Self, IdentityError> {
        let secret = Edwards25519Suite.unmarshal_scalar(bytes)?;
        Ok(Self::new(secret))
    }

    /// The private scalar.
    pub fn secret(&self) -> &Scalar {
        &self.secret
    }
}

impl Signer for Ed25519Signer {
    fn identity(&self) -> Identity {
        self.identity.clone()
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, IdentityError> {
        if message.is_empty() {
            return Err(IdentityError::EmptyMessage);
        }
        Ok(schnorr::sign(&self.suite, &self.secret, message))
    }

    fn private_bytes(&self) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(self.suite.marshal_scalar(&self.secret))
    }
}

impl Drop for Ed25519Signer {
    fn drop(&mut self) {
        self.secret.zeroize();
    }
}

impl std::fmt::Debug for Ed25519Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ed25519Signer")
            .field("identity", &self.identity.to_string())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// TSM (secp256k1)
// =============================================================================

/// ECDSA signer over secp256k1 with SHA-256 prehashing.
pub struct TsmSigner {
    keypair: Secp256k1KeyPair,
    identity: Identity,
}

impl TsmSigner {
    /// Signer for an existing keypair.
    pub fn new(keypair: Secp256k1KeyPair) -> Self {
        let identity = Identity::Tsm(keypair.public_key());
        Self { keypair, identity }
    }

    /// Signer with a fresh random key.
    pub fn generate() -> Self {
        Self::new(Secp256k1KeyPair::generate())
    }

    /// Signer from a 32-byte secret key.
    pub fn from_private_bytes(bytes: &[u8]) -> Result<Self, IdentityError> {
        let mut arr: [u8; 32] =
            bytes
                .try_into()
                .map_err(|_| shared_crypto::CryptoError::InvalidKeyLength {
                    expected: 32,
                    actual: bytes.len(),
                })?;
        let keypair = Secp256k1KeyPair::from_bytes(arr);
        arr.zeroize();
        Ok(Self::new(keypair?))
    }
}

impl Signer for TsmSigner {
    fn identity(&self) -> Identity {
        self.identity.clone()
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, IdentityError> {
        if message.is_empty() {
            return Err(IdentityError::EmptyMessage);
        }
        Ok(self.keypair.sign(message).to_vec())
    }

    fn private_bytes(&self) -> Zeroizing<Vec<u8>> {
        let mut bytes = self.keypair.to_bytes();
        let out = Zeroizing::new(bytes.to_vec());
        bytes.zeroize();
        out
    }
}

impl std::fmt::Debug for TsmSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TsmSigner")
            .field("identity", &self.identity.to_string())
            .finish_non_exhaustive()
    }
}
