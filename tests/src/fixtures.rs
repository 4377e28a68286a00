//! # Shared Test Fixtures
//!
//! Validator keys and helpers that drive headers through the full sealing
//! lifecycle.

use k256::ecdsa::SigningKey;
use qc_08_ibft_signer::{
    EcdsaKeyManager, IbftSigner, IbftSignerApi, KeyManager, ValidatorSet,
};
use shared_types::{Address, Header};
use std::collections::HashMap;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Route signer logs to the test output. Filter with `RUST_LOG`, e.g.
/// `RUST_LOG=qc_08_ibft_signer=debug`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Generate `count` random ECDSA validator keys.
pub fn ecdsa_keys(count: usize) -> Vec<Arc<EcdsaKeyManager>> {
    (0..count)
        .map(|_| Arc::new(EcdsaKeyManager::new(SigningKey::random(&mut rand::thread_rng()))))
        .collect()
}

/// Validator set made of the given keys, in order.
pub fn ecdsa_validator_set(keys: &[Arc<EcdsaKeyManager>]) -> ValidatorSet {
    ValidatorSet::ecdsa(keys.iter().map(|k| k.address()).collect())
        .expect("generated keys are unique")
}

/// Header at `number` on top of `parent`, with a fresh IBFT extra.
pub fn create_ibft_header<K: KeyManager>(
    signer: &IbftSigner<K>,
    number: u64,
    parent: &Header,
    validators: &ValidatorSet,
) -> Header {
    let mut header = Header {
        number,
        parent_hash: parent.hash,
        timestamp: 1_700_000_000 + number * 2,
        gas_limit: 30_000_000,
        ..Default::default()
    };
    signer
        .init_ibft_extra(&mut header, parent, validators)
        .expect("init ibft extra");
    header
}

/// Committed seal of every key over `header`.
pub fn collect_committed_seals<K: KeyManager>(
    header: &Header,
    keys: &[Arc<K>],
) -> HashMap<Address, Vec<u8>> {
    keys.iter()
        .map(|key| {
            let signer = IbftSigner::new(Arc::clone(key));
            let seal = signer
                .create_committed_seal(header)
                .expect("create committed seal");
            (key.address(), seal)
        })
        .collect()
}

/// Build a chain of `length` finalized headers after genesis. `signer`
/// proposes every block; every key in `keys` commits.
pub fn build_chain(
    signer: &IbftSigner<EcdsaKeyManager>,
    keys: &[Arc<EcdsaKeyManager>],
    length: u64,
) -> Vec<Header> {
    let validators = ecdsa_validator_set(keys);
    let mut parent = Header::default();
    let mut chain = Vec::new();

    for number in 1..=length {
        let header = create_ibft_header(signer, number, &parent, &validators);
        let header = signer.write_seal(header).expect("write seal");
        let seals = collect_committed_seals(&header, keys);
        let header = signer
            .write_committed_seals(header, seals)
            .expect("write committed seals")
            .compute_hash(&signer.header_hasher())
            .expect("compute hash");

        parent = header.clone();
        chain.push(header);
    }

    chain
}
