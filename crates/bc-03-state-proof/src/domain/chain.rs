//! # Skipchain Records
//!
//! The parts of skipchain blocks a client needs to anchor a proof: the
//! latest block, the rosters that sign each step and the forward links
//! that chain genesis to the latest block.

use shared_crypto::Sha256Hasher;
use shared_types::{Hash, SkipBlockId};

/// A conode taking part in the roster.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ServerIdentity {
    /// Marshalled public key
    #[prost(bytes = "vec", tag = "1")]
    pub public: Vec<u8>,
    #[prost(bytes = "vec", tag = "3")]
    pub id: Vec<u8>,
    #[prost(string, tag = "4")]
    pub address: String,
    #[prost(string, tag = "5")]
    pub description: String,
}

/// Set of conodes responsible for a block.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Roster {
    #[prost(bytes = "vec", tag = "1")]
    pub id: Vec<u8>,
    #[prost(message, repeated, tag = "2")]
    pub list: Vec<ServerIdentity>,
    /// Marshalled sum of all public keys
    #[prost(bytes = "vec", tag = "3")]
    pub aggregate: Vec<u8>,
}

/// Collective signature over a forward link.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ByzcoinSig {
    /// Signed message, the link hash
    #[prost(bytes = "vec", tag = "1")]
    pub msg: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub sig: Vec<u8>,
}

/// Signed pointer from one block to a later one.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ForwardLink {
    #[prost(bytes = "vec", tag = "1")]
    pub from: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub to: Vec<u8>,
    /// Roster taking over from `to` on, if it changed
    #[prost(message, optional, tag = "3")]
    pub new_roster: Option<Roster>,
    #[prost(message, optional, tag = "4")]
    pub signature: Option<ByzcoinSig>,
}

impl ForwardLink {
    /// `SHA-256(from || to || new_roster.id)`, the message the roster signs.
    pub fn hash(&self) -> Hash {
        let mut h = Sha256Hasher::new();
        h.update(&self.from).update(&self.to);
        if let Some(roster) = &self.new_roster {
            h.update(&roster.id);
        }
        h.finalize()
    }

    /// Block the link starts from.
    pub fn from_id(&self) -> SkipBlockId {
        SkipBlockId::new(self.from.clone())
    }

    /// Block the link points to.
    pub fn to_id(&self) -> SkipBlockId {
        SkipBlockId::new(self.to.clone())
    }
}

/// Skipchain block. Forward links travel separately in the proof.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SkipBlock {
    #[prost(sint32, tag = "1")]
    pub index: i32,
    #[prost(sint32, tag = "2")]
    pub height: i32,
    #[prost(sint32, tag = "3")]
    pub max_height: i32,
    #[prost(sint32, tag = "4")]
    pub base_height: i32,
    /// Ids of earlier blocks, one per height
    #[prost(bytes = "vec", repeated, tag = "5")]
    pub backlinks: Vec<Vec<u8>>,
    #[prost(bytes = "vec", repeated, tag = "6")]
    pub verifiers: Vec<Vec<u8>>,
    #[prost(bytes = "vec", tag = "7")]
    pub genesis: Vec<u8>,
    /// Encoded `DataHeader`
    #[prost(bytes = "vec", tag = "8")]
    pub data: Vec<u8>,
    #[prost(message, optional, tag = "9")]
    pub roster: Option<Roster>,
    #[prost(bytes = "vec", tag = "10")]
    pub hash: Vec<u8>,
    /// Not covered by the block hash
    #[prost(bytes = "vec", tag = "12")]
    pub payload: Vec<u8>,
    #[prost(uint32, tag = "13")]
    pub signature_scheme: u32,
}

impl SkipBlock {
    /// Block id.
    pub fn id(&self) -> SkipBlockId {
        SkipBlockId::new(self.hash.clone())
    }

    /// Hash of the block contents, which `hash` must equal.
    ///
    /// Heights as `i32` little endian, then backlinks, verifiers, genesis,
    /// data and the roster's public keys. The signature scheme is appended
    /// only when non-zero.
    pub fn compute_hash(&self) -> Hash {
        let mut h = Sha256Hasher::new();
        for n in [self.index, self.height, self.max_height, self.base_height] {
            h.update_u32_le(n as u32);
        }
        for backlink in &self.backlinks {
            h.update(backlink);
        }
        for verifier in &self.verifiers {
            h.update(verifier);
        }
        h.update(&self.genesis).update(&self.data);
        if let Some(roster) = &self.roster {
            for server in &roster.list {
                h.update(&server.public);
            }
        }
        if self.signature_scheme > 0 {
            h.update_u32_le(self.signature_scheme);
        }
        h.finalize()
    }

    /// True if `hash` is the hash of the block contents.
    pub fn hash_matches(&self) -> bool {
        self.compute_hash().as_slice() == self.hash.as_slice()
    }

    /// Skipchain id. The genesis block has no `genesis` field and is its own chain id.
    pub fn skipchain_id(&self) -> SkipBlockId {
        if self.genesis.is_empty() {
            self.id()
        } else {
            SkipBlockId::new(self.genesis.clone())
        }
    }
}
