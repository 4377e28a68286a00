//! Fuzz target for BLS committed seal verification.
//!
//! ## Running
//!
//! ```bash
//! cd crates/qc-10-signature-verification
//! cargo +nightly fuzz run fuzz_bls_verify
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use qc_10_signature_verification::{verify_bls, BlsPublicKey, BlsSignature};

#[derive(Debug, arbitrary::Arbitrary)]
struct FuzzInput {
    message: Vec<u8>,
    signature: Vec<u8>,
    public_key: Vec<u8>,
}

fuzz_target!(|input: FuzzInput| {
    let (Ok(signature), Ok(public_key)) = (
        BlsSignature::from_slice(&input.signature),
        BlsPublicKey::from_slice(&input.public_key),
    ) else {
        return;
    };

    // Garbage points must be rejected, never accepted or panicking.
    let _ = verify_bls(&input.message, &signature, &public_key);
});
