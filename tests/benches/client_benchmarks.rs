//! # ByzCoin Client Benchmarks
//!
//! | Area | Operation |
//! |------|-----------|
//! | bc-02 Transaction | Instruction hash, transaction signing |
//! | bc-03 State Proof | Inclusion walk, full proof verification |

use std::time::Duration;

use bc_01_darc_identity::{Ed25519Signer, Signer};
use bc_02_transaction::{Arguments, ClientTransaction, Instruction};
use bc_03_state_proof::testing::{MemoryTrie, TestChain};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use shared_crypto::sha256;
use shared_types::InstanceId;

// ============================================================================
// BC-02: Transaction hashing and signing
// ============================================================================

fn bench_instruction_hash(c: &mut Criterion) {
    let mut group = c.benchmark_group("bc-02-transaction");
    let signer = Ed25519Signer::generate();

    for arg_len in [32usize, 1024, 16 * 1024] {
        let instr = Instruction::create_invoke(
            InstanceId::new([1; 32]),
            "value",
            "update",
            Arguments::new().with("value", vec![0xab; arg_len]),
        )
        .bind_counters(vec![signer.identity()], vec![1])
        .unwrap();

        group.throughput(Throughput::Bytes(arg_len as u64));
        group.bench_with_input(
            BenchmarkId::new("instruction_hash", arg_len),
            &instr,
            |b, instr| b.iter(|| black_box(instr.hash())),
        );
    }

    for count in [1usize, 10, 50] {
        let tx = ClientTransaction::make(
            (0..count)
                .map(|i| {
                    Instruction::create_delete(InstanceId::new([i as u8; 32]), "value")
                })
                .collect(),
        );
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("sign_transaction", count), &tx, |b, tx| {
            b.iter(|| black_box(tx.fill_signers_and_sign_with(&[1], &[&signer]).unwrap()))
        });
    }

    group.finish();
}

// ============================================================================
// BC-03: Proof verification
// ============================================================================

fn bench_proof_verification(c: &mut Criterion) {
    let mut group = c.benchmark_group("bc-03-state-proof");
    group.measurement_time(Duration::from_secs(5));

    for size in [16u32, 256, 4096] {
        let mut chain = TestChain::new(4);
        let mut trie = MemoryTrie::new(chain.skipchain_id().as_bytes().to_vec());
        for i in 0..size {
            trie.set(&sha256(&i.to_le_bytes()), &i.to_le_bytes());
        }
        chain.append(&trie.root());

        let key = sha256(&(size / 2).to_le_bytes());
        let proof = chain.proof(&trie, &key);
        let skipchain_id = chain.skipchain_id();
        let verifier = chain.verifier();

        group.bench_with_input(BenchmarkId::new("inclusion_walk", size), &proof, |b, proof| {
            b.iter(|| black_box(proof.exists(&key).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("verify_chain", size), &proof, |b, proof| {
            b.iter(|| black_box(proof.verify(&skipchain_id, &verifier).is_ok()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_instruction_hash, bench_proof_verification);
criterion_main!(benches);
