//! # Identity
//!
//! A public identity that can appear in a DARC rule and among the signers of
//! an instruction.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use curve25519_dalek::edwards::EdwardsPoint;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use shared_crypto::{schnorr, Edwards25519Suite, Secp256k1PublicKey, Suite};
use shared_types::DarcId;

use super::errors::IdentityError;

/// String prefix of Ed25519 identities.
pub const ED25519_PREFIX: &str = "ed25519";
/// String prefix of DARC identities.
pub const DARC_PREFIX: &str = "darc";
/// String prefix of TSM identities.
pub const TSM_PREFIX: &str = "tsm";

/// An Ed25519 public point together with its canonical encoding.
#[derive(Clone, Copy, Debug)]
pub struct Ed25519Identity {
    point: EdwardsPoint,
    bytes: [u8; 32],
}

impl Ed25519Identity {
    /// Wrap a point.
    pub fn from_point(point: EdwardsPoint) -> Self {
        Self {
            bytes: point.compress().to_bytes(),
            point,
        }
    }

    /// Decode a compressed point.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, IdentityError> {
        let point = Edwards25519Suite.unmarshal_point(bytes)?;
        Ok(Self::from_point(point))
    }

    /// The public point.
    pub fn point(&self) -> &EdwardsPoint {
        &self.point
    }

    /// Compressed encoding.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }
}

impl PartialEq for Ed25519Identity {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for Ed25519Identity {}

impl Hash for Ed25519Identity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bytes.hash(state);
    }
}

/// One of the identity kinds a DARC understands.
#[derive(Clone, Debug, PartialEq, Eq, Hash, SerializeDisplay, DeserializeFromStr)]
pub enum Identity {
    /// Holder of an Ed25519 key.
    Ed25519(Ed25519Identity),
    /// Anyone satisfying the rules of another DARC.
    Darc(DarcId),
    /// Holder of a secp256k1 key.
    Tsm(Secp256k1PublicKey),
}

impl Identity {
    /// Ed25519 identity for `point`.
    pub fn ed25519(point: EdwardsPoint) -> Self {
        Identity::Ed25519(Ed25519Identity::from_point(point))
    }

    /// DARC identity for `id`.
    pub fn darc(id: DarcId) -> Self {
        Identity::Darc(id)
    }

    /// Type prefix used in the string form.
    pub fn type_name(&self) -> &'static str {
        match self {
            Identity::Ed25519(_) => ED25519_PREFIX,
            Identity::Darc(_) => DARC_PREFIX,
            Identity::Tsm(_) => TSM_PREFIX,
        }
    }

    /// Raw bytes hashed into instructions.
    pub fn public_bytes(&self) -> Vec<u8> {
        match self {
            Identity::Ed25519(id) => id.as_bytes().to_vec(),
            Identity::Darc(id) => id.as_bytes().to_vec(),
            Identity::Tsm(pk) => pk.as_bytes().to_vec(),
        }
    }

    /// The public point of an Ed25519 identity.
    pub fn ed25519_point(&self) -> Option<&EdwardsPoint> {
        match self {
            Identity::Ed25519(id) => Some(id.point()),
            _ => None,
        }
    }

    /// True if `signature` is valid on `message` for this identity.
    ///
    /// A DARC identity has no key and never verifies.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        let result = match self {
            Identity::Ed25519(id) => {
                schnorr::verify(&Edwards25519Suite, id.point(), message, signature)
            }
            Identity::Darc(_) => return false,
            Identity::Tsm(pk) => pk.verify(message, signature),
        };
        if let Err(e) = &result {
            tracing::debug!(identity = %self, error = %e, "signature rejected");
        }
        result.is_ok()
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.type_name(), hex::encode(self.public_bytes()))
    }
}

impl FromStr for Identity {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, data) = s
            .split_once(':')
            .ok_or_else(|| IdentityError::InvalidFormat(s.to_string()))?;
        let bytes = hex::decode(data).map_err(|_| IdentityError::InvalidFormat(s.to_string()))?;
        match kind {
            ED25519_PREFIX => Ok(Identity::Ed25519(Ed25519Identity::from_bytes(&bytes)?)),
            DARC_PREFIX => Ok(Identity::Darc(DarcId::new(bytes))),
            TSM_PREFIX => Ok(Identity::Tsm(Secp256k1PublicKey::from_slice(&bytes)?)),
            other => Err(IdentityError::UnknownType(other.to_string())),
        }
    }
}
