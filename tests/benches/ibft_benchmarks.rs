//! # Quantum-Chain IBFT Benchmarks
//!
//! | Subsystem | Path | Operation |
//! |-----------|------|-----------|
//! | qc-08 IBFT Signer | proposer | `write_seal`, `create_committed_seal` |
//! | qc-08 IBFT Signer | import | header hashing, `verify_committed_seals` |
//! | qc-10 Signature Verification | both | ECDSA sign/recover, BLS sign/verify |

use criterion::{criterion_group, criterion_main};
use qc_tests::benchmarks::{qc_08_ibft_signer, qc_10_signature};

criterion_group!(
    benches,
    qc_10_signature::brutal_ecdsa_seal,
    qc_10_signature::brutal_bls_seal,
    qc_08_ibft_signer::brutal_header_hashing,
    qc_08_ibft_signer::brutal_sealing,
    qc_08_ibft_signer::brutal_committed_seal_verification,
);

criterion_main!(benches);
