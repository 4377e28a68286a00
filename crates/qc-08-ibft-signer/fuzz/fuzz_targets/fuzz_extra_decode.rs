//! Fuzz target for the Istanbul extra codec.
//!
//! ## Running
//!
//! ```bash
//! cd crates/qc-08-ibft-signer
//! cargo +nightly fuzz run fuzz_extra_decode
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use qc_08_ibft_signer::{IstanbulExtra, SchemeTag};

fuzz_target!(|data: &[u8]| {
    for scheme in [SchemeTag::Ecdsa, SchemeTag::Bls] {
        // Arbitrary bytes must never panic. Anything accepted is canonical,
        // so it re-encodes to exactly the input.
        if let Ok(extra) = IstanbulExtra::decode(data, scheme) {
            assert_eq!(extra.rlp_encode(), data);
            assert_eq!(extra.scheme(), scheme);
        }
    }
});
