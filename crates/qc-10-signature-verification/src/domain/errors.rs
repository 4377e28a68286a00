//! # Signature Errors
//!
//! Error types for signing and signature verification operations.

use shared_types::Address;
use thiserror::Error;

/// Errors that can occur during signing or signature verification.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// The signature format is invalid (wrong length, invalid encoding)
    #[error("Invalid signature format")]
    InvalidFormat,

    /// The key material could not be parsed or generated
    #[error("Invalid key material")]
    InvalidKey,

    /// Signature verification failed (signature doesn't match message/signer)
    #[error("Signature verification failed")]
    VerificationFailed,

    /// Signature has high S value (EIP-2 malleability protection)
    #[error("Malleable signature (high S value)")]
    MalleableSignature,

    /// Invalid recovery ID (v must be 0, 1, 27, or 28)
    #[error("Invalid recovery ID: {0}")]
    InvalidRecoveryId(u8),

    /// Failed to recover public key from signature
    #[error("Failed to recover public key")]
    RecoveryFailed,

    /// The signing backend refused to produce a signature
    #[error("Signing failed: {0}")]
    SigningFailed(String),

    /// blst refused to aggregate the given points
    #[error("BLS aggregation failed")]
    BlsPairingFailed,

    /// Cannot aggregate an empty list of public keys
    #[error("Cannot aggregate empty public key list")]
    EmptyAggregation,

    /// Recovered signer does not match expected signer
    #[error("Signer mismatch: expected {expected:?}, got {actual:?}")]
    SignerMismatch { expected: Address, actual: Address },
}
