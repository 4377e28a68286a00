//! # Domain Entities
//!
//! Wire representations of the signatures and keys carried in IBFT seals.

use super::errors::SignatureError;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};

/// Length of a recoverable secp256k1 signature: `r (32) || s (32) || v (1)`.
pub const ECDSA_SIGNATURE_LENGTH: usize = 65;

/// Length of a compressed BLS signature (G1, `min_sig`).
pub const BLS_SIGNATURE_LENGTH: usize = 48;

/// Length of a compressed BLS public key (G2, `min_sig`).
pub const BLS_PUBLIC_KEY_LENGTH: usize = 96;

// =============================================================================
// ECDSA Types (secp256k1)
// =============================================================================

/// Recoverable ECDSA signature on the secp256k1 curve.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcdsaSignature {
    /// R component (32 bytes)
    pub r: [u8; 32],
    /// S component (32 bytes)
    pub s: [u8; 32],
    /// Recovery ID (0, 1, 27, or 28)
    pub v: u8,
}

impl EcdsaSignature {
    /// Encode as the 65-byte seal form `r || s || v`.
    pub fn to_bytes(&self) -> [u8; ECDSA_SIGNATURE_LENGTH] {
        let mut out = [0u8; ECDSA_SIGNATURE_LENGTH];
        out[..32].copy_from_slice(&self.r);
        out[32..64].copy_from_slice(&self.s);
        out[64] = self.v;
        out
    }

    /// Parse the 65-byte seal form.
    ///
    /// # Errors
    /// * `InvalidFormat` if `bytes` is not exactly 65 bytes long
    pub fn from_slice(bytes: &[u8]) -> Result<Self, SignatureError> {
        if bytes.len() != ECDSA_SIGNATURE_LENGTH {
            return Err(SignatureError::InvalidFormat);
        }

        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..64]);

        Ok(Self { r, s, v: bytes[64] })
    }
}

// =============================================================================
// BLS Types (BLS12-381)
// =============================================================================

/// BLS signature (G1 point, compressed).
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlsSignature {
    /// G1 point (48 bytes compressed)
    #[serde_as(as = "Bytes")]
    pub bytes: [u8; BLS_SIGNATURE_LENGTH],
}

impl BlsSignature {
    /// Parse a compressed signature, checking only its length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, SignatureError> {
        let bytes = bytes
            .try_into()
            .map_err(|_| SignatureError::InvalidFormat)?;
        Ok(Self { bytes })
    }
}

/// BLS public key (G2 point, compressed).
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlsPublicKey {
    /// G2 point (96 bytes compressed)
    #[serde_as(as = "Bytes")]
    pub bytes: [u8; BLS_PUBLIC_KEY_LENGTH],
}

impl BlsPublicKey {
    /// Parse a compressed public key, checking only its length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, SignatureError> {
        let bytes = bytes
            .try_into()
            .map_err(|_| SignatureError::InvalidFormat)?;
        Ok(Self { bytes })
    }
}
