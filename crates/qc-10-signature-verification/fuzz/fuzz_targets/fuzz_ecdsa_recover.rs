//! Fuzz target for ECDSA public key recovery.
//!
//! ## Running
//!
//! ```bash
//! cd crates/qc-10-signature-verification
//! cargo +nightly fuzz run fuzz_ecdsa_recover
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use qc_10_signature_verification::{recover_address, EcdsaSignature};

fuzz_target!(|data: &[u8]| {
    if data.len() < 32 {
        return;
    }

    let mut message_hash = [0u8; 32];
    message_hash.copy_from_slice(&data[..32]);

    // Arbitrary seal bytes: must never panic, only fail to parse or recover.
    let Ok(signature) = EcdsaSignature::from_slice(&data[32..]) else {
        return;
    };

    let first = recover_address(&message_hash, &signature);
    let second = recover_address(&message_hash, &signature);
    assert_eq!(first, second);
});
