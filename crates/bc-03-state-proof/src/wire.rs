//! # Wire Records
//!
//! Protobuf form of proofs as returned by `GetProofResponse`.
//!
//! ```text
//! byzcoin.Proof { 1: inclusionproof trie.Proof, 2: latest SkipBlock, 3: links repeated ForwardLink }
//! trie.Proof    { 1: interiors repeated InteriorNode, 2: leaf, 3: empty, 4: nonce }
//! ```
//!
//! Skipchain records are already protobuf messages and travel as they are.

use prost::Message;

use crate::domain::chain::{ForwardLink, SkipBlock};
use crate::domain::errors::ProofError;
use crate::domain::nodes::{EmptyNode, InclusionProof, InteriorNode, LeafNode};
use crate::domain::proof::Proof;

/// The `byzcoin.Proof` message.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProofProto {
    #[prost(message, optional, tag = "1")]
    pub inclusionproof: Option<InclusionProofProto>,
    #[prost(message, optional, tag = "2")]
    pub latest: Option<SkipBlock>,
    #[prost(message, repeated, tag = "3")]
    pub links: Vec<ForwardLink>,
}

/// The `trie.Proof` message.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct InclusionProofProto {
    #[prost(message, repeated, tag = "1")]
    pub interiors: Vec<InteriorNodeProto>,
    #[prost(message, optional, tag = "2")]
    pub leaf: Option<LeafNodeProto>,
    #[prost(message, optional, tag = "3")]
    pub empty: Option<EmptyNodeProto>,
    #[prost(bytes = "vec", tag = "4")]
    pub nonce: Vec<u8>,
}

/// The `trie.InteriorNode` message.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct InteriorNodeProto {
    #[prost(bytes = "vec", tag = "1")]
    pub left: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub right: Vec<u8>,
}

/// The `trie.LeafNode` message.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LeafNodeProto {
    #[prost(bool, repeated, tag = "1")]
    pub prefix: Vec<bool>,
    #[prost(bytes = "vec", tag = "2")]
    pub key: Vec<u8>,
    #[prost(bytes = "vec", tag = "3")]
    pub value: Vec<u8>,
}

/// The `trie.EmptyNode` message.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EmptyNodeProto {
    #[prost(bool, repeated, tag = "1")]
    pub prefix: Vec<bool>,
}

impl From<&InclusionProof> for InclusionProofProto {
    fn from(p: &InclusionProof) -> Self {
        Self {
            interiors: p
                .interiors
                .iter()
                .map(|n| InteriorNodeProto {
                    left: n.left.clone(),
                    right: n.right.clone(),
                })
                .collect(),
            leaf: Some(LeafNodeProto {
                prefix: p.leaf.prefix.clone(),
                key: p.leaf.key.clone(),
                value: p.leaf.value.clone(),
            }),
            empty: Some(EmptyNodeProto {
                prefix: p.empty.prefix.clone(),
            }),
            nonce: p.nonce.clone(),
        }
    }
}

impl From<InclusionProofProto> for InclusionProof {
    fn from(p: InclusionProofProto) -> Self {
        let leaf = p.leaf.unwrap_or_default();
        Self {
            interiors: p
                .interiors
                .into_iter()
                .map(|n| InteriorNode::new(n.left, n.right))
                .collect(),
            leaf: LeafNode {
                prefix: leaf.prefix,
                key: leaf.key,
                value: leaf.value,
            },
            empty: EmptyNode {
                prefix: p.empty.unwrap_or_default().prefix,
            },
            nonce: p.nonce,
        }
    }
}

impl From<&Proof> for ProofProto {
    fn from(p: &Proof) -> Self {
        Self {
            inclusionproof: Some(InclusionProofProto::from(&p.inclusion)),
            latest: Some(p.latest.clone()),
            links: p.links.clone(),
        }
    }
}

impl From<ProofProto> for Proof {
    fn from(p: ProofProto) -> Self {
        Proof::new(
            p.inclusionproof.map(InclusionProof::from).unwrap_or_default(),
            p.latest.unwrap_or_default(),
            p.links,
        )
    }
}

impl Proof {
    /// Wire form.
    pub fn to_wire(&self) -> ProofProto {
        ProofProto::from(self)
    }

    /// Protobuf encoding.
    pub fn encode(&self) -> Vec<u8> {
        self.to_wire().encode_to_vec()
    }

    /// Decode protobuf bytes. Nothing is checked until the proof is used.
    pub fn decode(buf: &[u8]) -> Result<Self, ProofError> {
        ProofProto::decode(buf)
            .map(Proof::from)
            .map_err(|e| ProofError::Decode(e.to_string()))
    }
}
