//! Error types for the IBFT signer subsystem
//!
//! Every decode and verification failure surfaces as a typed error. A header
//! whose extra data fails to decode must be rejected as a whole.

use super::SchemeTag;
use qc_10_signature_verification::SignatureError;
use shared_types::Address;

/// IBFT signer error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IbftError {
    // ---------------------------------------------------------------------
    // Encoding
    // ---------------------------------------------------------------------
    #[error("Invalid validator set encoding: {0}")]
    InvalidSetEncoding(String),

    #[error("Malformed seal list: {0}")]
    MalformedSealList(String),

    #[error("Malformed istanbul extra: {0}")]
    MalformedExtra(String),

    #[error("Validator scheme mismatch: expected {expected}, got tag {actual}")]
    SchemeMismatch { expected: SchemeTag, actual: u8 },

    #[error("Duplicate validator in set: {0:?}")]
    DuplicateValidator(Address),

    #[error("Extra data too short: {size} bytes, vanity needs {required}")]
    ExtraDataTooShort { size: usize, required: usize },

    #[error("Extra data too large: {size} bytes > {limit} bytes")]
    ExtraDataTooLarge { size: usize, limit: usize },

    #[error("Failed to decode IBFT extra of block {number}: {source}")]
    ExtraDecodeError {
        number: u64,
        #[source]
        source: Box<IbftError>,
    },

    // ---------------------------------------------------------------------
    // Signing
    // ---------------------------------------------------------------------
    #[error("Signing failed: {0}")]
    SigningError(SignatureError),

    // ---------------------------------------------------------------------
    // Verification
    // ---------------------------------------------------------------------
    #[error("Insufficient committed seals: {got}, quorum requires {required}")]
    InsufficientQuorum { got: usize, required: usize },

    #[error("Not enough committed seals to write: {got}, quorum requires {required}")]
    EmptyQuorum { got: usize, required: usize },

    #[error("Committed seal list is empty")]
    EmptyCommittedSeal,

    #[error("Seal signed by non-validator: {0:?}")]
    UnknownSigner(Address),

    #[error("Duplicate committed seal from validator: {0:?}")]
    DuplicateSigner(Address),

    #[error("Committed seal from {current:?} is out of order after {previous:?}")]
    UnorderedCommittedSeal { previous: Address, current: Address },

    #[error("Too many committed seals: {got} for {validators} validators")]
    TooManyCommittedSeals { got: usize, validators: usize },

    #[error("Invalid seal: {0}")]
    InvalidSeal(SignatureError),

    // ---------------------------------------------------------------------
    // State
    // ---------------------------------------------------------------------
    #[error("Invalid header state for block {number}: {reason}")]
    StateError { number: u64, reason: &'static str },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<rlp::DecoderError> for IbftError {
    fn from(err: rlp::DecoderError) -> Self {
        IbftError::MalformedExtra(err.to_string())
    }
}

/// Result type for IBFT signer operations
pub type IbftResult<T> = Result<T, IbftError>;
