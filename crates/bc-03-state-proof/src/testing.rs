//! # Test Fixtures
//!
//! An in-memory state trie and a skipchain signed by a single aggregate
//! key. Both produce real proofs, so they exercise the same verification
//! code a conode's answers go through.

use prost::Message;
use shared_crypto::{schnorr, sha256, Edwards25519Suite, Suite};
use shared_types::{Hash, SkipBlockId};

use crate::algorithms::{hash_empty, hash_interior, hash_leaf, key_to_bits};
use crate::domain::chain::{ByzcoinSig, ForwardLink, Roster, ServerIdentity, SkipBlock};
use crate::domain::nodes::{EmptyNode, InclusionProof, InteriorNode, LeafNode};
use crate::domain::proof::Proof;
use crate::domain::values::DataHeader;
use crate::ports::outbound::SchnorrLinkVerifier;

// =============================================================================
// MEMORY TRIE
// =============================================================================

#[derive(Clone, Debug)]
enum Node {
    Interior { left: Box<Node>, right: Box<Node> },
    Leaf { prefix: Vec<bool>, key: Vec<u8>, value: Vec<u8> },
    Empty { prefix: Vec<bool> },
}

impl Node {
    fn split(prefix: &[bool]) -> Node {
        let mut left = prefix.to_vec();
        left.push(true);
        let mut right = prefix.to_vec();
        right.push(false);
        Node::Interior {
            left: Box::new(Node::Empty { prefix: left }),
            right: Box::new(Node::Empty { prefix: right }),
        }
    }

    fn hash(&self, nonce: &[u8]) -> Hash {
        match self {
            Node::Interior { left, right } => hash_interior(&left.hash(nonce), &right.hash(nonce)),
            Node::Leaf { prefix, key, value } => hash_leaf(nonce, prefix, key, value),
            Node::Empty { prefix } => hash_empty(nonce, prefix),
        }
    }

    fn set(self, depth: usize, bits: &[bool], key: &[u8], value: &[u8]) -> Node {
        match self {
            Node::Empty { prefix } => Node::Leaf {
                prefix,
                key: key.to_vec(),
                value: value.to_vec(),
            },
            Node::Leaf { prefix, key: k, .. } if k == key => Node::Leaf {
                prefix,
                key: k,
                value: value.to_vec(),
            },
            Node::Leaf {
                prefix,
                key: k,
                value: v,
            } => {
                // Push the existing leaf one level down, then retry.
                let existing = key_to_bits(&k);
                Node::split(&prefix)
                    .set(depth, &existing, &k, &v)
                    .set(depth, bits, key, value)
            }
            Node::Interior { left, right } => {
                if bits[depth] {
                    Node::Interior {
                        left: Box::new(left.set(depth + 1, bits, key, value)),
                        right,
                    }
                } else {
                    Node::Interior {
                        left,
                        right: Box::new(right.set(depth + 1, bits, key, value)),
                    }
                }
            }
        }
    }

    fn delete(self, depth: usize, bits: &[bool], key: &[u8]) -> Node {
        match self {
            Node::Leaf { prefix, key: k, .. } if k == key => Node::Empty { prefix },
            Node::Interior { left, right } => {
                if bits[depth] {
                    Node::Interior {
                        left: Box::new(left.delete(depth + 1, bits, key)),
                        right,
                    }
                } else {
                    Node::Interior {
                        left,
                        right: Box::new(right.delete(depth + 1, bits, key)),
                    }
                }
            }
            other => other,
        }
    }
}

/// State trie held in memory.
#[derive(Clone, Debug)]
pub struct MemoryTrie {
    nonce: Vec<u8>,
    root: Node,
}

impl MemoryTrie {
    /// Empty trie salted with `nonce`.
    pub fn new(nonce: Vec<u8>) -> Self {
        Self {
            nonce,
            root: Node::split(&[]),
        }
    }

    /// Salt of leaf and empty hashes.
    pub fn nonce(&self) -> &[u8] {
        &self.nonce
    }

    /// Insert or overwrite `key`.
    pub fn set(&mut self, key: &[u8], value: &[u8]) {
        let bits = key_to_bits(key);
        let root = std::mem::replace(&mut self.root, Node::Empty { prefix: vec![] });
        self.root = root.set(0, &bits, key, value);
    }

    /// Remove `key` if present.
    pub fn delete(&mut self, key: &[u8]) {
        let bits = key_to_bits(key);
        let root = std::mem::replace(&mut self.root, Node::Empty { prefix: vec![] });
        self.root = root.delete(0, &bits, key);
    }

    /// Value stored under `key`.
    pub fn get(&self, key: &[u8]) -> Option<&[u8]> {
        let bits = key_to_bits(key);
        let mut node = &self.root;
        let mut depth = 0;
        loop {
            match node {
                Node::Interior { left, right } => {
                    node = if bits[depth] { left.as_ref() } else { right.as_ref() };
                    depth += 1;
                }
                Node::Leaf { key: k, value, .. } if k == key => return Some(value.as_slice()),
                _ => return None,
            }
        }
    }

    /// Root hash.
    pub fn root(&self) -> Hash {
        self.root.hash(&self.nonce)
    }

    /// Inclusion or absence proof for `key`.
    pub fn prove(&self, key: &[u8]) -> InclusionProof {
        let bits = key_to_bits(key);
        let mut proof = InclusionProof {
            nonce: self.nonce.clone(),
            ..Default::default()
        };
        let mut node = &self.root;
        let mut depth = 0;
        loop {
            match node {
                Node::Interior { left, right } => {
                    proof.interiors.push(InteriorNode::new(
                        left.hash(&self.nonce),
                        right.hash(&self.nonce),
                    ));
                    node = if bits[depth] { left.as_ref() } else { right.as_ref() };
                    depth += 1;
                }
                Node::Leaf { prefix, key, value } => {
                    proof.leaf = LeafNode {
                        prefix: prefix.clone(),
                        key: key.clone(),
                        value: value.clone(),
                    };
                    return proof;
                }
                Node::Empty { prefix } => {
                    proof.empty = EmptyNode {
                        prefix: prefix.clone(),
                    };
                    return proof;
                }
            }
        }
    }
}

// =============================================================================
// TEST CHAIN
// =============================================================================

/// Skipchain whose roster signs with one aggregate Ed25519 key.
pub struct TestChain {
    suite: Edwards25519Suite,
    secret: <Edwards25519Suite as Suite>::Scalar,
    roster: Roster,
    blocks: Vec<SkipBlock>,
    links: Vec<ForwardLink>,
}

impl TestChain {
    /// Chain of `blocks` blocks, genesis included (at least one).
    pub fn new(blocks: usize) -> Self {
        let suite = Edwards25519Suite;
        let secret = suite.random_scalar();
        let public = suite.marshal_point(&suite.base_mul(&secret));
        let roster = Roster {
            id: sha256(&public)[..16].to_vec(),
            list: vec![ServerIdentity {
                public: public.clone(),
                address: "tls://localhost:7770".into(),
                description: "test conode".into(),
                ..Default::default()
            }],
            aggregate: public,
        };

        let mut genesis = SkipBlock {
            max_height: 1,
            base_height: 1,
            data: DataHeader::default().encode_to_vec(),
            roster: Some(roster.clone()),
            ..Default::default()
        };
        genesis.hash = genesis.compute_hash().to_vec();
        let links = vec![ForwardLink {
            to: genesis.hash.clone(),
            new_roster: Some(roster.clone()),
            ..Default::default()
        }];

        let mut chain = Self {
            suite,
            secret,
            roster,
            blocks: vec![genesis],
            links,
        };
        for _ in 1..blocks {
            chain.append(&[]);
        }
        chain
    }

    /// Id of the genesis block.
    pub fn skipchain_id(&self) -> SkipBlockId {
        self.blocks[0].id()
    }

    /// Roster of every block.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Verifier for the links this chain signs.
    pub fn verifier(&self) -> SchnorrLinkVerifier<Edwards25519Suite> {
        SchnorrLinkVerifier::new(self.suite)
    }

    /// Latest block.
    pub fn latest(&self) -> &SkipBlock {
        &self.blocks[self.blocks.len() - 1]
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Always false, a chain has a genesis block.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Add a block committing to `trie_root` and link it.
    pub fn append(&mut self, trie_root: &[u8]) -> &SkipBlock {
        let (block, link) = self.next_block(trie_root);
        self.blocks.push(block);
        self.links.push(link);
        self.latest()
    }

    /// Proof for `key` anchored in this chain.
    ///
    /// Uses the latest block if it commits to the trie root, otherwise a new
    /// block on top of it that is not kept.
    pub fn proof(&self, trie: &MemoryTrie, key: &[u8]) -> Proof {
        let root = trie.root();
        let inclusion = trie.prove(key);
        let committed = DataHeader::decode(self.latest().data.as_slice())
            .map(|h| h.trieroot == root)
            .unwrap_or(false);
        if committed {
            return Proof::new(inclusion, self.latest().clone(), self.links.clone());
        }
        let (block, link) = self.next_block(&root);
        let mut links = self.links.clone();
        links.push(link);
        Proof::new(inclusion, block, links)
    }

    fn next_block(&self, trie_root: &[u8]) -> (SkipBlock, ForwardLink) {
        let prev = self.latest();
        let index = prev.index + 1;
        let data = DataHeader {
            trieroot: trie_root.to_vec(),
            timestamp: i64::from(index),
            ..Default::default()
        }
        .encode_to_vec();
        let mut block = SkipBlock {
            index,
            height: 1,
            max_height: 1,
            base_height: 1,
            backlinks: vec![prev.hash.clone()],
            genesis: self.blocks[0].hash.clone(),
            data,
            roster: Some(self.roster.clone()),
            ..Default::default()
        };
        block.hash = block.compute_hash().to_vec();
        let mut link = ForwardLink {
            from: prev.hash.clone(),
            to: block.hash.clone(),
            ..Default::default()
        };
        let msg = link.hash().to_vec();
        let sig = schnorr::sign(&self.suite, &self.secret, &msg);
        link.signature = Some(ByzcoinSig { msg, sig });
        (block, link)
    }
}
