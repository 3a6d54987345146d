//! # Wire Records
//!
//! Protobuf form of the darc `Identity` message. Exactly one field is set.

use shared_crypto::Secp256k1PublicKey;
use shared_types::DarcId;

use crate::domain::errors::IdentityError;
use crate::domain::identity::{Ed25519Identity, Identity};

/// The darc `Identity` message.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct IdentityProto {
    #[prost(message, optional, tag = "1")]
    pub darc: Option<IdentityDarc>,
    #[prost(message, optional, tag = "2")]
    pub ed25519: Option<IdentityEd25519>,
    #[prost(message, optional, tag = "7")]
    pub tsm: Option<IdentityTsm>,
}

/// Reference to another DARC.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct IdentityDarc {
    #[prost(bytes = "vec", tag = "1")]
    pub id: Vec<u8>,
}

/// Compressed Edwards25519 point.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct IdentityEd25519 {
    #[prost(bytes = "vec", tag = "1")]
    pub point: Vec<u8>,
}

/// Compressed secp256k1 key.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct IdentityTsm {
    #[prost(bytes = "vec", tag = "1")]
    pub publickey: Vec<u8>,
}

impl From<&Identity> for IdentityProto {
    fn from(id: &Identity) -> Self {
        let mut out = IdentityProto::default();
        match id {
            Identity::Ed25519(ed) => {
                out.ed25519 = Some(IdentityEd25519 {
                    point: ed.as_bytes().to_vec(),
                })
            }
            Identity::Darc(d) => {
                out.darc = Some(IdentityDarc {
                    id: d.as_bytes().to_vec(),
                })
            }
            Identity::Tsm(pk) => {
                out.tsm = Some(IdentityTsm {
                    publickey: pk.as_bytes().to_vec(),
                })
            }
        }
        out
    }
}

impl TryFrom<IdentityProto> for Identity {
    type Error = IdentityError;

    fn try_from(p: IdentityProto) -> Result<Self, Self::Error> {
        if let Some(ed) = p.ed25519 {
            return Ok(Identity::Ed25519(Ed25519Identity::from_bytes(&ed.point)?));
        }
        if let Some(d) = p.darc {
            return Ok(Identity::Darc(DarcId::new(d.id)));
        }
        if let Some(t) = p.tsm {
            return Ok(Identity::Tsm(Secp256k1PublicKey::from_slice(&t.publickey)?));
        }
        Err(IdentityError::MissingVariant)
    }
}
