//! # Proof
//!
//! A [`Proof`] shows that an instance is present or absent in the global
//! state and ties that answer to a block of the trusted skipchain:
//!
//! 1. the inclusion proof walks from the trie root to the instance
//! 2. the latest block's `DataHeader` commits to that trie root
//! 3. forward links chain the genesis block to the latest block
//!
//! The accessors read the instance stored in the leaf and fail with
//! [`ProofError::Absence`] unless the leaf is proven.

use std::fmt;

use shared_types::{DarcId, InstanceId, SkipBlockId};
use tracing::{debug, warn};

use super::chain::{ForwardLink, Roster, SkipBlock};
use super::errors::{ChainError, ProofError};
use super::nodes::InclusionProof;
use super::values::{DataHeader, StateChangeBody};
use crate::ports::outbound::ForwardLinkVerifier;

/// Inclusion proof anchored in a skipchain.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Proof {
    /// Path through the state trie
    pub inclusion: InclusionProof,
    /// Block committing to the trie root
    pub latest: SkipBlock,
    /// Links from genesis to `latest`. The first one only carries the genesis roster.
    pub links: Vec<ForwardLink>,
}

impl Proof {
    /// Assemble a proof.
    pub fn new(inclusion: InclusionProof, latest: SkipBlock, links: Vec<ForwardLink>) -> Self {
        Self {
            inclusion,
            latest,
            links,
        }
    }

    /// Header of the latest block.
    pub fn header(&self) -> Result<DataHeader, ChainError> {
        DataHeader::from_bytes(&self.latest.data)
    }

    /// Does the proof show `key` is present under the trie root of the latest block?
    pub fn exists(&self, key: &[u8]) -> Result<bool, ProofError> {
        let header = self.header()?;
        self.inclusion.exists_under(key, &header.trieroot)
    }

    /// True if the leaf carried by the proof is proven to be in the trie.
    ///
    /// A corrupted proof is not a match either; [`Proof::state_change_body`]
    /// and the other accessors report why.
    pub fn matches(&self) -> bool {
        self.leaf_proven().is_ok()
    }

    /// `Ok` if the leaf is proven, [`ProofError::Absence`] if the proof ends
    /// in an empty node, the walk error if it is corrupted.
    fn leaf_proven(&self) -> Result<(), ProofError> {
        let key = self.inclusion.key();
        if key.is_empty() {
            return Err(ProofError::Absence);
        }
        if self.exists(key)? {
            Ok(())
        } else {
            Err(ProofError::Absence)
        }
    }

    // =========================================================================
    // INSTANCE ACCESSORS
    // =========================================================================

    /// Decoded leaf value.
    pub fn state_change_body(&self) -> Result<StateChangeBody, ProofError> {
        self.leaf_proven()?;
        StateChangeBody::from_bytes(self.inclusion.value())
    }

    /// Contract of the instance.
    pub fn contract_id(&self) -> Result<String, ProofError> {
        Ok(self.state_change_body()?.contract_id())
    }

    /// DARC guarding the instance.
    pub fn darc_id(&self) -> Result<DarcId, ProofError> {
        Ok(DarcId::new(self.state_change_body()?.darcid))
    }

    /// Data of the instance.
    pub fn value(&self) -> Result<Vec<u8>, ProofError> {
        Ok(self.state_change_body()?.value)
    }

    /// Version of the instance, incremented on every update.
    pub fn version(&self) -> Result<u64, ProofError> {
        Ok(self.state_change_body()?.version)
    }

    /// Instance id in the leaf.
    pub fn key(&self) -> Result<&[u8], ProofError> {
        self.leaf_proven()?;
        Ok(self.inclusion.key())
    }

    /// `[value, contract id, darc id]` of the instance.
    pub fn values(&self) -> Result<[Vec<u8>; 3], ProofError> {
        let body = self.state_change_body()?;
        Ok([body.value, body.contractid, body.darcid])
    }

    /// True if the proof shows an instance of contract `cid`.
    pub fn match_contract(&self, cid: &str) -> bool {
        self.state_change_body()
            .map(|b| b.contractid == cid.as_bytes())
            .unwrap_or(false)
    }

    /// Check the proof shows instance `iid` of contract `cid`.
    pub fn match_or_fail(&self, iid: &InstanceId, cid: &str) -> Result<(), ProofError> {
        if self.inclusion.key() != iid.as_bytes() || !self.exists(iid.as_bytes())? {
            return Err(ProofError::InstanceNotFound(*iid));
        }
        let actual = self.contract_id()?;
        if actual != cid {
            return Err(ProofError::ContractMismatch {
                expected: cid.to_string(),
                actual,
            });
        }
        Ok(())
    }

    // =========================================================================
    // CHAIN LINKAGE
    // =========================================================================

    /// Check the proof against the skipchain `skipchain_id`.
    ///
    /// The latest block must hash to its id, its header must commit to the
    /// trie root, and the forward links must lead from `skipchain_id` to the latest block with
    /// each link signed by the roster in charge at that point.
    pub fn verify(
        &self,
        skipchain_id: &SkipBlockId,
        verifier: &dyn ForwardLinkVerifier,
    ) -> Result<(), ProofError> {
        if !self.latest.hash_matches() {
            warn!(block = %self.latest.id(), "latest block does not hash to its id");
            return Err(ChainError::BlockHashMismatch.into());
        }
        let header = self.header()?;
        if self.inclusion.root()?.as_slice() != header.trieroot.as_slice() {
            warn!(block = %self.latest.id(), "trie root not committed by latest block");
            return Err(ChainError::RootNotInBlock.into());
        }

        let (first, rest) = self.links.split_first().ok_or(ChainError::NoLinks)?;
        let mut roster: &Roster = first.new_roster.as_ref().ok_or_else(|| {
            warn!("first forward link carries no genesis roster");
            ChainError::NotEvolved
        })?;
        let mut current = skipchain_id.as_bytes();

        for (i, link) in rest.iter().enumerate() {
            if link.from.as_slice() != current {
                warn!(link = i + 1, "forward link starts at the wrong block");
                return Err(ChainError::NotEvolved.into());
            }
            if !verifier.verify_link(link, roster) {
                warn!(link = i + 1, "forward link signature rejected");
                return Err(ChainError::NotEvolved.into());
            }
            current = link.to.as_slice();
            if let Some(next) = &link.new_roster {
                roster = next;
            }
        }

        if current != self.latest.hash.as_slice() {
            warn!(block = %self.latest.id(), "forward links end before the latest block");
            return Err(ChainError::LatestMismatch.into());
        }
        debug!(links = self.links.len(), block = %self.latest.id(), "proof verified");
        Ok(())
    }
}

impl fmt::Display for Proof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let contract = self.contract_id().unwrap_or_default();
        write!(
            f,
            "Proof for contractID({}) for {}",
            contract,
            hex::encode(self.inclusion.key())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::values::StateAction;
    use crate::testing::{MemoryTrie, TestChain};
    use prost::Message;

    fn body(cid: &str, value: &[u8]) -> Vec<u8> {
        StateChangeBody::new(StateAction::Create, cid, value.to_vec(), 0, vec![5; 32]).encode_to_vec()
    }

    fn setup() -> (MemoryTrie, TestChain) {
        let mut trie = MemoryTrie::new(b"nonce".to_vec());
        trie.set(&[1u8; 32], &body("value", b"one"));
        trie.set(&[2u8; 32], &body("coin", b"two"));
        (trie, TestChain::new(3))
    }

    #[test]
    fn test_present_instance_accessors() {
        let (trie, chain) = setup();
        let proof = chain.proof(&trie, &[1u8; 32]);
        assert!(proof.matches());
        assert_eq!(proof.exists(&[1u8; 32]), Ok(true));
        assert_eq!(proof.contract_id().unwrap(), "value");
        assert_eq!(proof.value().unwrap(), b"one");
        assert_eq!(proof.darc_id().unwrap(), DarcId::new(vec![5; 32]));
        assert_eq!(proof.version().unwrap(), 0);
        assert_eq!(proof.key().unwrap(), &[1u8; 32]);
        let [v, c, d] = proof.values().unwrap();
        assert_eq!((v, c, d), (b"one".to_vec(), b"value".to_vec(), vec![5; 32]));
        assert!(proof.match_contract("value"));
        assert!(!proof.match_contract("coin"));
        assert_eq!(proof.verify(&chain.skipchain_id(), &chain.verifier()), Ok(()));
    }

    #[test]
    fn test_absence_accessors_fail() {
        let (trie, chain) = setup();
        let proof = chain.proof(&trie, &[9u8; 32]);
        assert_eq!(proof.exists(&[9u8; 32]), Ok(false));
        assert_eq!(proof.contract_id(), Err(ProofError::Absence));
        assert_eq!(proof.value(), Err(ProofError::Absence));
        assert_eq!(proof.key(), Err(ProofError::Absence));
        assert!(!proof.match_contract("value"));
        // Absence proofs verify against the chain like any other.
        assert_eq!(proof.verify(&chain.skipchain_id(), &chain.verifier()), Ok(()));
    }

    #[test]
    fn test_corrupted_leaf_is_not_absence() {
        let (trie, chain) = setup();
        let mut proof = chain.proof(&trie, &[1u8; 32]);
        proof.inclusion.leaf.value[0] ^= 0x01;

        assert_eq!(proof.exists(&[1u8; 32]), Err(ProofError::NoCorrespondingNode));
        assert!(!proof.matches());
        assert_eq!(proof.state_change_body(), Err(ProofError::NoCorrespondingNode));
        assert_eq!(proof.value(), Err(ProofError::NoCorrespondingNode));
        assert_eq!(proof.key(), Err(ProofError::NoCorrespondingNode));
        assert_eq!(
            proof.match_or_fail(&InstanceId::new([1u8; 32]), "value"),
            Err(ProofError::NoCorrespondingNode)
        );
    }

    #[test]
    fn test_forged_latest_data_rejected() {
        let (trie, chain) = setup();
        let mut proof = chain.proof(&trie, &[1u8; 32]);

        let mut forged = trie.clone();
        forged.set(&[1u8; 32], &body("value", b"EVIL"));
        let header = DataHeader {
            trieroot: forged.root().to_vec(),
            ..DataHeader::from_bytes(&proof.latest.data).unwrap()
        };
        proof.latest.data = header.encode_to_vec();
        proof.inclusion = forged.prove(&[1u8; 32]);

        assert_eq!(proof.value(), Ok(b"EVIL".to_vec()));
        assert_eq!(
            proof.verify(&chain.skipchain_id(), &chain.verifier()),
            Err(ProofError::Chain(ChainError::BlockHashMismatch))
        );
    }

    #[test]
    fn test_match_or_fail() {
        let (trie, chain) = setup();
        let proof = chain.proof(&trie, &[2u8; 32]);
        let iid = InstanceId::new([2u8; 32]);
        assert_eq!(proof.match_or_fail(&iid, "coin"), Ok(()));
        assert_eq!(
            proof.match_or_fail(&iid, "value"),
            Err(ProofError::ContractMismatch {
                expected: "value".into(),
                actual: "coin".into()
            })
        );
        let other = InstanceId::new([1u8; 32]);
        assert_eq!(
            proof.match_or_fail(&other, "coin"),
            Err(ProofError::InstanceNotFound(other))
        );
    }

    #[test]
    fn test_inclusion_and_absence_are_disjoint() {
        let (trie, chain) = setup();
        for b in 0u8..8 {
            let key = [b; 32];
            let proof = chain.proof(&trie, &key);
            assert_eq!(proof.exists(&key).unwrap(), trie.get(&key).is_some());
        }
    }

    #[test]
    fn test_root_not_in_block() {
        let (mut trie, chain) = setup();
        let proof = chain.proof(&trie, &[1u8; 32]);
        trie.set(&[3u8; 32], &body("value", b"three"));
        let newer = chain.proof(&trie, &[1u8; 32]);
        let mixed = Proof::new(newer.inclusion, proof.latest, proof.links);
        assert_eq!(
            mixed.verify(&chain.skipchain_id(), &chain.verifier()),
            Err(ProofError::Chain(ChainError::RootNotInBlock))
        );
    }

    #[test]
    fn test_wrong_skipchain_not_evolved() {
        let (trie, chain) = setup();
        let proof = chain.proof(&trie, &[1u8; 32]);
        assert_eq!(
            proof.verify(&SkipBlockId::new(vec![0; 32]), &chain.verifier()),
            Err(ProofError::Chain(ChainError::NotEvolved))
        );
    }

    #[test]
    fn test_foreign_roster_not_evolved() {
        let (trie, chain) = setup();
        let other = TestChain::new(3);
        let proof = chain.proof(&trie, &[1u8; 32]);
        let mut forged = proof.clone();
        forged.links[0] = other.proof(&trie, &[1u8; 32]).links[0].clone();
        assert_eq!(
            forged.verify(&chain.skipchain_id(), &chain.verifier()),
            Err(ProofError::Chain(ChainError::NotEvolved))
        );
    }

    #[test]
    fn test_missing_links() {
        let (trie, chain) = setup();
        let mut proof = chain.proof(&trie, &[1u8; 32]);
        proof.links.clear();
        assert_eq!(
            proof.verify(&chain.skipchain_id(), &chain.verifier()),
            Err(ProofError::Chain(ChainError::NoLinks))
        );
    }

    #[test]
    fn test_truncated_links_latest_mismatch() {
        let (trie, chain) = setup();
        let mut proof = chain.proof(&trie, &[1u8; 32]);
        proof.links.pop();
        assert_eq!(
            proof.verify(&chain.skipchain_id(), &chain.verifier()),
            Err(ProofError::Chain(ChainError::LatestMismatch))
        );
    }

    #[test]
    fn test_display() {
        let (trie, chain) = setup();
        let proof = chain.proof(&trie, &[2u8; 32]);
        assert_eq!(
            proof.to_string(),
            format!("Proof for contractID(coin) for {}", hex::encode([2u8; 32]))
        );
    }
}
