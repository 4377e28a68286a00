//! # ECDSA Signing and Recovery (secp256k1)
//!
//! Pure domain logic for recoverable ECDSA signatures over 32-byte digests.
//!
//! ## Security Notes
//!
//! - **Malleability Prevention (EIP-2)**: S must not exceed SECP256K1_HALF_ORDER
//! - **Scalar Range Validation**: R and S must be in [1, n-1]
//! - **Constant-Time Operations**: Uses `subtle` crate for side-channel resistance
//! - Uses k256 crate for cryptographic operations

use super::entities::EcdsaSignature;
use super::errors::SignatureError;
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use shared_types::{keccak256, Address, Hash};
use subtle::{Choice, ConstantTimeEq};
use tracing::debug;

/// secp256k1 curve order n
/// n = 0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141
const SECP256K1_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
    0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
];

/// Half of the secp256k1 curve order (for malleability check).
const SECP256K1_HALF_ORDER: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B, 0x20, 0xA0,
];

// =============================================================================
// CORE FUNCTIONS
// =============================================================================

/// Sign a 32-byte digest, producing a low-S recoverable signature with
/// `v` in `{0, 1}`.
pub fn sign_prehash(
    message_hash: &Hash,
    signing_key: &SigningKey,
) -> Result<EcdsaSignature, SignatureError> {
    let (sig, recid) = signing_key
        .sign_prehash_recoverable(message_hash)
        .map_err(|e| SignatureError::SigningFailed(e.to_string()))?;

    let sig_bytes = sig.to_bytes();
    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&sig_bytes[..32]);
    s.copy_from_slice(&sig_bytes[32..]);

    // Normalize S to low value (EIP-2); inverting S flips the y parity.
    let (s, v) = if is_low_s(&s) {
        (s, recid.to_byte() & 1)
    } else {
        (invert_s(&s), (recid.to_byte() & 1) ^ 1)
    };

    Ok(EcdsaSignature { r, s, v })
}

/// Recover the signer's Ethereum address from a signature.
///
/// Security validations performed before recovery:
/// 1. R and S are in valid range [1, n-1] per SEC1 standard
/// 2. S is in lower half per EIP-2 malleability protection
/// 3. Recovery ID (v) is valid (0, 1, 27, or 28)
pub fn recover_address(
    message_hash: &Hash,
    signature: &EcdsaSignature,
) -> Result<Address, SignatureError> {
    use zeroize::Zeroize;

    if !is_valid_scalar(&signature.r) || !is_valid_scalar(&signature.s) {
        return Err(SignatureError::InvalidFormat);
    }

    if !is_low_s(&signature.s) {
        debug!(message_hash = %hex::encode(&message_hash[..4]), "Rejected high-S signature");
        return Err(SignatureError::MalleableSignature);
    }

    let recovery_id = parse_recovery_id(signature.v)?;

    let mut sig_bytes = [0u8; 64];
    sig_bytes[..32].copy_from_slice(&signature.r);
    sig_bytes[32..].copy_from_slice(&signature.s);

    let sig = Signature::from_slice(&sig_bytes);
    sig_bytes.zeroize();
    let sig = sig.map_err(|_| SignatureError::InvalidFormat)?;

    let recovered_key = VerifyingKey::recover_from_prehash(message_hash, &sig, recovery_id)
        .map_err(|_| SignatureError::RecoveryFailed)?;

    Ok(address_from_pubkey(&recovered_key))
}

/// Recover the signer and check that it matches `expected`.
pub fn verify_ecdsa_signer(
    message_hash: &Hash,
    signature: &EcdsaSignature,
    expected: Address,
) -> Result<(), SignatureError> {
    let actual = recover_address(message_hash, signature)?;

    if actual != expected {
        debug!(
            expected = %hex::encode(expected),
            actual = %hex::encode(actual),
            "Recovered signer does not match"
        );
        return Err(SignatureError::SignerMismatch { expected, actual });
    }

    Ok(())
}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Derive Ethereum address from public key.
pub fn address_from_pubkey(public_key: &VerifyingKey) -> Address {
    let pubkey_bytes = public_key.to_encoded_point(false);
    let pubkey_slice = pubkey_bytes.as_bytes();

    // Keccak256 hash of public key (without 0x04 prefix)
    let hash = keccak256(&pubkey_slice[1..]);

    // Take last 20 bytes as address
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}

/// Check that S is at most half the curve order (EIP-2 malleability protection).
///
/// Constant time: no early return on the first differing byte.
fn is_low_s(s: &[u8; 32]) -> bool {
    let mut less = Choice::from(0u8);
    let mut greater = Choice::from(0u8);

    for i in 0..32 {
        let s_byte = s[i];
        let h_byte = SECP256K1_HALF_ORDER[i];

        let not_decided = !(less | greater);
        let byte_less = Choice::from((s_byte < h_byte) as u8);
        let byte_greater = Choice::from((s_byte > h_byte) as u8);

        less |= not_decided & byte_less;
        greater |= not_decided & byte_greater;
    }

    // s == n/2 leaves both unset and is still low
    (!greater).into()
}

/// Check if a scalar value is in valid range [1, n-1] for ECDSA.
fn is_valid_scalar(scalar: &[u8; 32]) -> bool {
    let mut is_zero = Choice::from(1u8);
    for &byte in scalar {
        is_zero &= byte.ct_eq(&0u8);
    }

    let mut less = Choice::from(0u8);
    let mut greater = Choice::from(0u8);

    for i in 0..32 {
        let s_byte = scalar[i];
        let n_byte = SECP256K1_ORDER[i];

        let not_decided = !(less | greater);
        let byte_less = Choice::from((s_byte < n_byte) as u8);
        let byte_greater = Choice::from((s_byte > n_byte) as u8);

        less |= not_decided & byte_less;
        greater |= not_decided & byte_greater;
    }

    (!is_zero & less).into()
}

/// Parse recovery ID from v value.
///
/// Valid v values: 0, 1, 27, 28
fn parse_recovery_id(v: u8) -> Result<RecoveryId, SignatureError> {
    let id = match v {
        0 | 27 => 0,
        1 | 28 => 1,
        _ => return Err(SignatureError::InvalidRecoveryId(v)),
    };

    RecoveryId::try_from(id).map_err(|_| SignatureError::InvalidRecoveryId(v))
}

/// Invert S value: s' = n - s
fn invert_s(s: &[u8; 32]) -> [u8; 32] {
    let mut result = [0u8; 32];
    let mut borrow: i32 = 0;

    for i in (0..32).rev() {
        let diff = (SECP256K1_ORDER[i] as i32) - (s[i] as i32) - borrow;
        if diff < 0 {
            result[i] = (diff + 256) as u8;
            borrow = 1;
        } else {
            result[i] = diff as u8;
            borrow = 0;
        }
    }

    result
}
