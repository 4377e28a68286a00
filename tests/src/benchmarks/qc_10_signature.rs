//! # QC-10 Signature Benchmarks
//!
//! Seal primitives on the sealing hot path:
//! - Recoverable ECDSA signing (proposer and committed seals)
//! - Address recovery (one per committed seal on import)
//! - BLS signing and single verification (BLS committed seals)

use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use k256::ecdsa::SigningKey;
use qc_10_signature_verification::{
    bls_keygen, bls_public_key, keccak256, recover_address, sign_bls, sign_prehash, verify_bls,
    EcdsaSignature,
};
use std::time::Duration;

fn random_digest() -> [u8; 32] {
    let mut bytes = [0u8; 32];
    rand::RngCore::fill_bytes(&mut rand::thread_rng(), &mut bytes);
    keccak256(&bytes)
}

pub fn brutal_ecdsa_seal(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-10/brutal/ecdsa_seal");
    group.measurement_time(Duration::from_secs(10));

    let signing_key = SigningKey::random(&mut rand::thread_rng());
    let digest = random_digest();
    let signature = sign_prehash(&digest, &signing_key).unwrap();

    group.bench_function("sign_prehash", |b| {
        b.iter(|| black_box(sign_prehash(black_box(&digest), &signing_key).unwrap()))
    });

    group.bench_function("recover_address", |b| {
        b.iter(|| black_box(recover_address(black_box(&digest), &signature).unwrap()))
    });

    // Brutal: recover a full committed seal list sequentially
    for count in [4usize, 16, 64, 100] {
        let seals: Vec<([u8; 32], EcdsaSignature)> = (0..count)
            .map(|_| {
                let key = SigningKey::random(&mut rand::thread_rng());
                let digest = random_digest();
                (digest, sign_prehash(&digest, &key).unwrap())
            })
            .collect();

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(
            BenchmarkId::new("recover_batch", count),
            &seals,
            |b, seals| {
                b.iter(|| {
                    let recovered = seals
                        .iter()
                        .filter(|(digest, sig)| recover_address(digest, sig).is_ok())
                        .count();
                    black_box(recovered)
                })
            },
        );
    }

    group.finish();
}

pub fn brutal_bls_seal(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-10/brutal/bls_seal");
    group.measurement_time(Duration::from_secs(10));

    let mut ikm = [0u8; 32];
    rand::RngCore::fill_bytes(&mut rand::thread_rng(), &mut ikm);
    let secret_key = bls_keygen(&ikm).unwrap();
    let public_key = bls_public_key(&secret_key);
    let digest = random_digest();
    let signature = sign_bls(&secret_key, &digest);

    group.bench_function("sign_bls", |b| {
        b.iter(|| black_box(sign_bls(&secret_key, black_box(&digest))))
    });

    group.bench_function("verify_bls", |b| {
        b.iter(|| black_box(verify_bls(black_box(&digest), &signature, &public_key)))
    });

    group.finish();
}
