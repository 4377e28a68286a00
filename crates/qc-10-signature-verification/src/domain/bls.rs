//! # BLS Signatures (BLS12-381)
//!
//! Pure domain logic for BLS committed seals.
//!
//! ## Implementation Details
//!
//! - Signatures are on G1 (48 bytes compressed)
//! - Public keys are on G2 (96 bytes compressed)
//!
//! This uses blst's `min_sig` variant for smaller signatures, which keeps the
//! committed seal list in the header compact.

use super::entities::{BlsPublicKey, BlsSignature};
use super::errors::SignatureError;
use blst::min_sig::{AggregatePublicKey, PublicKey, SecretKey, Signature};
use blst::BLST_ERROR;

/// Domain Separation Tag for `min_sig` BLS signatures (hash to G1).
const DST: &[u8] = b"BLS_SIG_BLS12381G1_XMD:SHA-256_SSWU_RO_POP_";

/// Derive a secret key from at least 32 bytes of input key material.
///
/// # Errors
/// * `InvalidKey` if `ikm` is shorter than 32 bytes
pub fn bls_keygen(ikm: &[u8]) -> Result<SecretKey, SignatureError> {
    SecretKey::key_gen(ikm, &[]).map_err(|_| SignatureError::InvalidKey)
}

/// Compressed public key of `secret_key`.
pub fn bls_public_key(secret_key: &SecretKey) -> BlsPublicKey {
    BlsPublicKey {
        bytes: secret_key.sk_to_pk().to_bytes(),
    }
}

/// Sign `message` with `secret_key`.
pub fn sign_bls(secret_key: &SecretKey, message: &[u8]) -> BlsSignature {
    BlsSignature {
        bytes: secret_key.sign(message, DST, &[]).to_bytes(),
    }
}

/// Verify a single BLS signature.
///
/// # Returns
/// * `true` if signature is valid, `false` otherwise (including unparsable
///   points)
pub fn verify_bls(message: &[u8], signature: &BlsSignature, public_key: &BlsPublicKey) -> bool {
    let Ok(sig) = Signature::from_bytes(&signature.bytes) else {
        return false;
    };

    let Ok(pk) = PublicKey::from_bytes(&public_key.bytes) else {
        return false;
    };

    let result = sig.verify(true, message, DST, &[], &pk, true);
    result == BLST_ERROR::BLST_SUCCESS
}

/// Aggregate multiple BLS public keys into one.
///
/// # Errors
/// * `EmptyAggregation` if the input list is empty
/// * `InvalidFormat` if any public key cannot be parsed
pub fn aggregate_bls_public_keys(
    public_keys: &[BlsPublicKey],
) -> Result<BlsPublicKey, SignatureError> {
    if public_keys.is_empty() {
        return Err(SignatureError::EmptyAggregation);
    }

    let pks = public_keys
        .iter()
        .map(|pk| PublicKey::from_bytes(&pk.bytes).map_err(|_| SignatureError::InvalidFormat))
        .collect::<Result<Vec<PublicKey>, SignatureError>>()?;
    let pk_refs: Vec<&PublicKey> = pks.iter().collect();

    let aggregate = AggregatePublicKey::aggregate(&pk_refs, true)
        .map_err(|_| SignatureError::BlsPairingFailed)?;

    Ok(BlsPublicKey {
        bytes: aggregate.to_public_key().to_bytes(),
    })
}
