//! # Ledger Flows
//!
//! Transactions built and signed by the client crates, sent through
//! [`LedgerClient`] to the in-memory conode, and read back through verified
//! proofs.
//!
//! ## Flows Tested:
//!
//! 1. **Spawn then invoke**: the invoke targets the id derived from the spawn
//! 2. **Replay**: a transaction or counter that was already accepted is refused
//! 3. **Atomicity**: one failing instruction leaves the ledger untouched
//! 4. **Multi-signer counters**: one counter fetch, consecutive per-signer counters

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bc_01_darc_identity::{Ed25519Signer, Signer};
    use bc_02_transaction::algorithms::transaction_hash;
    use bc_02_transaction::{
        Arguments, ClientTransaction, Instruction, MockCounterSource, Signed,
    };
    use bc_04_ledger_client::{ClientError, LedgerClient, LedgerClientApi, LedgerClientConfig, MockConode};
    use shared_types::{InstanceId, MessageRegistry};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn ledger() -> (LedgerClient<MockConode>, Arc<MockConode>) {
        let conode = Arc::new(MockConode::new());
        let config = LedgerClientConfig::for_testing().with_skipchain_id(conode.skipchain_id());
        let verifier = conode.verifier();
        let client = LedgerClient::new(
            config,
            conode.clone(),
            Arc::new(MessageRegistry::byzcoin()),
            Arc::new(verifier),
        );
        (client, conode)
    }

    async fn spawn_value(
        client: &LedgerClient<MockConode>,
        signer: &Ed25519Signer,
        value: &[u8],
    ) -> ClientTransaction<Signed> {
        let darc = client.conode().genesis_darc();
        let tx = ClientTransaction::make(vec![Instruction::create_spawn(
            darc,
            "value",
            Arguments::new().with("value", value),
        )]);
        let signers: Vec<&dyn Signer> = vec![signer];
        tx.update_counters_and_sign(client, &[signers]).await.unwrap()
    }

    // =============================================================================
    // SPAWN + INVOKE
    // =============================================================================

    /// An unsigned spawn derives the same id before and after signing, so a
    /// second instruction of the same transaction can target it.
    #[tokio::test]
    async fn test_spawn_and_invoke_derived_instance_in_one_transaction() {
        let alice = Ed25519Signer::generate();
        let darc = InstanceId::new([0xda; 32]);

        let spawn = Instruction::create_spawn(darc, "X", Arguments::new());
        let target = spawn.derive_id("");
        let tx = ClientTransaction::make(vec![
            spawn,
            Instruction::create_invoke(target, "X", "touch", Arguments::new()),
        ]);

        let no_signers: Vec<&dyn Signer> = Vec::new();
        let invokers: Vec<&dyn Signer> = vec![&alice];
        let signed = tx
            .update_counters_and_sign(&MockCounterSource::default(), &[no_signers, invokers])
            .await
            .unwrap();

        let instructions = signed.instructions();
        assert_eq!(instructions[1].instance_id(), &instructions[0].derive_id(""));
        assert!(instructions[0].signatures().is_empty());
        assert_eq!(instructions[1].signer_counters(), &[1]);
        assert_eq!(
            signed.hash(),
            transaction_hash(instructions.iter().map(|i| i.hash()))
        );
        assert!(signed.verify_signatures());
    }

    #[tokio::test]
    async fn test_spawn_then_update_through_client() {
        let (client, conode) = ledger();
        let alice = Ed25519Signer::generate();

        let spawned = spawn_value(&client, &alice, b"first").await;
        client.send_transaction_and_wait(&spawned, 10).await.unwrap();
        let iid = spawned.instructions()[0].derive_id("");

        let update = ClientTransaction::make(vec![Instruction::create_invoke(
            iid,
            "value",
            "update",
            Arguments::new().with("value", b"second"),
        )]);
        let signers: Vec<&dyn Signer> = vec![&alice];
        let signed = update
            .update_counters_and_sign(&client, &[signers])
            .await
            .unwrap();
        assert_eq!(signed.instructions()[0].signer_counters(), &[2]);
        client.send_transaction_and_wait(&signed, 10).await.unwrap();

        let instance = client.get_verified_instance(&iid, "value").await.unwrap();
        assert_eq!(instance.data, b"second");
        assert_eq!(instance.version, 1);
        assert_eq!(conode.counter(&alice.identity()), 2);
        assert_eq!(conode.block_count(), 4);
    }

    // =============================================================================
    // REPLAY PROTECTION
    // =============================================================================

    #[tokio::test]
    async fn test_resent_transaction_refused() {
        let (client, conode) = ledger();
        let alice = Ed25519Signer::generate();

        let signed = spawn_value(&client, &alice, b"v").await;
        client.send_transaction_and_wait(&signed, 0).await.unwrap();
        let blocks = conode.block_count();

        let replay = client.send_transaction_and_wait(&signed, 0).await;
        assert_eq!(
            replay,
            Err(ClientError::Refused("got counter=1, but need 2".into()))
        );
        assert_eq!(conode.block_count(), blocks);
    }

    /// Signing the same countered transaction twice reuses its counters, so
    /// only the first of the two signed copies is accepted.
    #[tokio::test]
    async fn test_signing_twice_reuses_stale_counter() {
        let (client, _conode) = ledger();
        let alice = Ed25519Signer::generate();
        let darc = client.conode().genesis_darc();

        let tx = ClientTransaction::make(vec![Instruction::create_spawn(
            darc,
            "value",
            Arguments::new().with("value", b"v"),
        )]);
        let signers: Vec<&dyn Signer> = vec![&alice];
        let countered = tx.update_counters(&client, &[signers.clone()]).await.unwrap();
        let first = countered.sign_with(&[signers.clone()]).unwrap();
        let second = countered.sign_with(&[signers]).unwrap();
        assert_eq!(
            first.instructions()[0].signer_counters(),
            second.instructions()[0].signer_counters()
        );

        client.send_transaction_and_wait(&first, 0).await.unwrap();
        assert!(matches!(
            client.send_transaction_and_wait(&second, 0).await,
            Err(ClientError::Refused(msg)) if msg.contains("counter")
        ));
    }

    #[tokio::test]
    async fn test_fixed_counter_below_ledger_refused() {
        let (client, _conode) = ledger();
        let alice = Ed25519Signer::generate();
        let first = spawn_value(&client, &alice, b"a").await;
        client.send_transaction_and_wait(&first, 0).await.unwrap();

        let darc = client.conode().genesis_darc();
        let stale = ClientTransaction::make(vec![Instruction::create_spawn(
            darc,
            "value",
            Arguments::new().with("value", b"b"),
        )])
        .fill_signers_and_sign_with(&[1], &[&alice])
        .unwrap();
        assert_eq!(
            client.send_transaction_and_wait(&stale, 0).await,
            Err(ClientError::Refused("got counter=1, but need 2".into()))
        );
    }

    // =============================================================================
    // ATOMICITY
    // =============================================================================

    #[tokio::test]
    async fn test_failing_instruction_rejects_whole_transaction() {
        let (client, conode) = ledger();
        let alice = Ed25519Signer::generate();
        let darc = client.conode().genesis_darc();
        let blocks = conode.block_count();

        let tx = ClientTransaction::make(vec![
            Instruction::create_spawn(darc, "value", Arguments::new().with("value", b"v")),
            Instruction::create_invoke(
                InstanceId::new([0x77; 32]),
                "value",
                "update",
                Arguments::new(),
            ),
        ]);
        let signers: Vec<&dyn Signer> = vec![&alice];
        let signed = tx
            .update_counters_and_sign(&client, &[signers.clone(), signers])
            .await
            .unwrap();
        assert_eq!(signed.instructions()[0].signer_counters(), &[1]);
        assert_eq!(signed.instructions()[1].signer_counters(), &[2]);

        assert!(matches!(
            client.send_transaction_and_wait(&signed, 0).await,
            Err(ClientError::Refused(_))
        ));
        assert_eq!(conode.block_count(), blocks);
        assert_eq!(conode.counter(&alice.identity()), 0);

        let spawned = signed.instructions()[0].derive_id("");
        assert!(conode.instance(&spawned).is_none());
        let proof = client.get_proof(&spawned).await.unwrap();
        assert_eq!(proof.exists(spawned.as_bytes()), Ok(false));
    }

    // =============================================================================
    // MULTI-SIGNER COUNTERS
    // =============================================================================

    #[tokio::test]
    async fn test_signer_sets_differ_per_instruction() {
        let (client, conode) = ledger();
        let alice = Ed25519Signer::generate();
        let bob = Ed25519Signer::generate();
        let darc = client.conode().genesis_darc();

        let tx = ClientTransaction::make(vec![
            Instruction::create_spawn(darc, "value", Arguments::new().with("value", b"one")),
            Instruction::create_spawn(darc, "value", Arguments::new().with("value", b"two")),
        ]);
        let first: Vec<&dyn Signer> = vec![&alice];
        let second: Vec<&dyn Signer> = vec![&alice, &bob];
        let signed = tx
            .update_counters_and_sign(&client, &[first, second])
            .await
            .unwrap();
        assert_eq!(signed.instructions()[0].signer_counters(), &[1]);
        assert_eq!(signed.instructions()[1].signer_counters(), &[2, 1]);

        client.send_transaction_and_wait(&signed, 0).await.unwrap();
        assert_eq!(conode.counter(&alice.identity()), 2);
        assert_eq!(conode.counter(&bob.identity()), 1);
        assert_eq!(
            client
                .signer_counters(&[alice.identity(), bob.identity()])
                .await
                .unwrap(),
            vec![2, 1]
        );

        for instr in signed.instructions() {
            let iid = instr.derive_id("");
            let instance = client.get_verified_instance(&iid, "value").await.unwrap();
            assert_eq!(instance.darc_id.as_bytes(), darc.as_bytes().as_slice());
        }
    }
}
