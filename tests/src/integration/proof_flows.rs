//! # Proof Flows
//!
//! Proofs produced by a real trie and a signed test chain, checked the way a
//! client checks what a conode sends back.
//!
//! ## Flows Tested:
//!
//! 1. **Absence**: a fresh trie proves any key absent without error
//! 2. **Corrupted leaf**: a flipped key or value bit breaks the path to the
//!    leaf and is never reported as absence
//! 3. **Wire**: a decoded proof still verifies against the chain
//! 4. **Hash determinism**: instruction hashes depend on every signed field

#[cfg(test)]
mod tests {
    use bc_01_darc_identity::{Ed25519Signer, Signer};
    use bc_02_transaction::{Arguments, ClientTransaction, Instruction};
    use bc_03_state_proof::testing::{MemoryTrie, TestChain};
    use bc_03_state_proof::{ChainError, Proof, ProofError};
    use proptest::prelude::*;
    use shared_crypto::sha256;
    use shared_types::{InstanceId, SkipBlockId};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn populated_trie(nonce: &SkipBlockId) -> MemoryTrie {
        let mut trie = MemoryTrie::new(nonce.as_bytes().to_vec());
        for i in 0u8..16 {
            trie.set(&sha256(&[i]), &[i; 8]);
        }
        trie
    }

    // =============================================================================
    // ABSENCE
    // =============================================================================

    #[test]
    fn test_absence_in_fresh_trie() {
        let chain = TestChain::new(2);
        let trie = MemoryTrie::new(chain.skipchain_id().as_bytes().to_vec());
        let key = [0x5a; 32];

        let proof = chain.proof(&trie, &key);
        assert_eq!(proof.exists(&key), Ok(false));
        assert!(!proof.matches());
        assert_eq!(proof.value(), Err(ProofError::Absence));
        proof
            .verify(&chain.skipchain_id(), &chain.verifier())
            .unwrap();
    }

    #[test]
    fn test_absence_next_to_present_keys() {
        let chain = TestChain::new(1);
        let trie = populated_trie(&chain.skipchain_id());
        let missing = sha256(b"not inserted");

        let proof = chain.proof(&trie, &missing);
        assert_eq!(proof.exists(&missing), Ok(false));
        assert_eq!(
            proof.match_or_fail(&InstanceId::new(missing), "value"),
            Err(ProofError::InstanceNotFound(InstanceId::new(missing)))
        );
    }

    // =============================================================================
    // CORRUPTED LEAF
    // =============================================================================

    #[test]
    fn test_flipped_leaf_key_bit_detected() {
        let chain = TestChain::new(1);
        let trie = populated_trie(&chain.skipchain_id());
        let key = sha256(&[3u8]);

        let mut proof = chain.proof(&trie, &key);
        assert_eq!(proof.exists(&key), Ok(true));

        proof.inclusion.leaf.key[0] ^= 0x01;
        let err = proof.exists(&key).unwrap_err();
        assert_eq!(err, ProofError::NoCorrespondingNode);
        assert!(err.to_string().contains("no corresponding leaf"));
        assert_eq!(
            proof.inclusion.exists(&key),
            Err(ProofError::NoCorrespondingNode)
        );
    }

    #[test]
    fn test_flipped_leaf_value_is_not_absence() {
        let chain = TestChain::new(1);
        let trie = populated_trie(&chain.skipchain_id());
        let key = sha256(&[5u8]);

        let mut proof = chain.proof(&trie, &key);
        proof.inclusion.leaf.value[0] ^= 0x80;
        assert_eq!(proof.value(), Err(ProofError::NoCorrespondingNode));
        assert_eq!(
            proof.match_or_fail(&InstanceId::new(key), "value"),
            Err(ProofError::NoCorrespondingNode)
        );
    }

    #[test]
    fn test_proof_for_other_trie_not_in_block() {
        let chain = TestChain::new(1);
        let trie = populated_trie(&chain.skipchain_id());
        let key = sha256(&[7u8]);
        let mut proof = chain.proof(&trie, &key);

        let mut other = trie.clone();
        other.set(&key, b"rewritten");
        proof.inclusion = other.prove(&key);
        assert_eq!(
            proof.verify(&chain.skipchain_id(), &chain.verifier()),
            Err(ProofError::Chain(ChainError::RootNotInBlock))
        );
    }

    // =============================================================================
    // WIRE
    // =============================================================================

    #[test]
    fn test_decoded_proof_still_verifies() {
        let mut chain = TestChain::new(1);
        let trie = populated_trie(&chain.skipchain_id());
        chain.append(&trie.root());
        let key = sha256(&[9u8]);

        let proof = Proof::decode(&chain.proof(&trie, &key).encode()).unwrap();
        proof
            .verify(&chain.skipchain_id(), &chain.verifier())
            .unwrap();
        assert_eq!(proof.key(), Ok(&key[..]));
        assert_eq!(proof.value(), Ok(vec![9u8; 8]));
    }

    // =============================================================================
    // HASH DETERMINISM
    // =============================================================================

    proptest! {
        #[test]
        fn prop_instruction_hash_covers_signed_fields(
            iid in prop::array::uniform32(any::<u8>()),
            value in prop::collection::vec(any::<u8>(), 0..64),
            counter in 1u64..u64::MAX,
        ) {
            let signer = Ed25519Signer::generate();
            let build = |v: &[u8], c: u64| {
                Instruction::create_invoke(
                    InstanceId::new(iid),
                    "value",
                    "update",
                    Arguments::new().with("value", v),
                )
                .bind_counters(vec![signer.identity()], vec![c])
                .unwrap()
            };

            let a = build(&value, counter);
            prop_assert_eq!(a.hash(), build(&value, counter).hash());
            prop_assert_ne!(a.hash(), build(&value, counter - 1).hash());

            let mut changed = value.clone();
            changed.push(0);
            prop_assert_ne!(a.hash(), build(&changed, counter).hash());
        }

        #[test]
        fn prop_transaction_hash_ignores_signatures(
            value in prop::collection::vec(any::<u8>(), 1..32),
        ) {
            let alice = Ed25519Signer::generate();
            let tx = ClientTransaction::make(vec![Instruction::create_spawn(
                InstanceId::new([1; 32]),
                "value",
                Arguments::new().with("value", &value),
            )]);
            let first = tx.fill_signers_and_sign_with(&[1], &[&alice]).unwrap();
            let second = tx.fill_signers_and_sign_with(&[1], &[&alice]).unwrap();
            prop_assert_eq!(first.hash(), second.hash());
            prop_assert!(first.verify_signatures());
            prop_assert!(second.verify_signatures());
        }
    }
}
