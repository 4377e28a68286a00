//! # Header Hashing
//!
//! Keccak-256 and the header hashing strategy consumed by [`Header::compute_hash`].
//!
//! [`Header::compute_hash`]: crate::entities::Header::compute_hash

use crate::entities::{Hash, Header};
use crate::errors::HeaderError;
use sha3::{Digest, Keccak256};

/// Keccak256 hash function.
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Strategy used to derive a header's `hash`.
///
/// Consensus engines implement this to exclude their own in-progress
/// signatures from the chain identity hash.
pub trait HeaderHasher: Send + Sync {
    /// Compute the identity hash of `header`.
    fn header_hash(&self, header: &Header) -> Result<Hash, HeaderError>;
}

/// Plain Keccak-256 over the full header encoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeccakHeaderHasher;

impl HeaderHasher for KeccakHeaderHasher {
    fn header_hash(&self, header: &Header) -> Result<Hash, HeaderError> {
        Ok(header.keccak_hash())
    }
}
