//! # Signature Verification Subsystem (QC-10)
//!
//! Signing, public key recovery and aggregation primitives used by the IBFT
//! signer for proposer seals and committed seals.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): Pure cryptographic logic, no I/O
//!
//! Key custody and the seal-level API live in `qc-08-ibft-signer`, which
//! wraps these functions behind its `KeyManager` port.
//!
//! ## Security Notes
//!
//! - **Malleability Prevention (EIP-2)**: Signatures with high S values are rejected
//! - **Recoverable Seals**: ECDSA seals are 65 bytes `r || s || v` with `v` in `{0, 1}`
//! - **BLS**: `min_sig` variant, 48-byte G1 signatures and 96-byte G2 public keys

pub mod domain;

// Re-export public API
pub use domain::bls::{
    aggregate_bls_public_keys, bls_keygen, bls_public_key, sign_bls, verify_bls,
};
pub use domain::ecdsa::{address_from_pubkey, recover_address, sign_prehash, verify_ecdsa_signer};
pub use domain::entities::{BlsPublicKey, BlsSignature, EcdsaSignature, ECDSA_SIGNATURE_LENGTH};
pub use domain::errors::SignatureError;
pub use shared_types::keccak256;
