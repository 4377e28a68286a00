//! Header hashing for IBFT
//!
//! Three hashes are derived from a header:
//!
//! - [`hash`]: Keccak-256 over the full header, extra data exactly as set.
//! - [`signing_hash`]: the same, after clearing the proposer seal and/or the
//!   committed seals in a copy of the header.
//! - [`calculate_header_hash`]: the chain identity hash. Both seals are
//!   cleared, so the hash is fixed before sealing and the proposer can sign
//!   it. The parent committed seals stay covered.
//!
//! Committed seals sign [`commit_digest`], which covers the proposer seal so
//! a commit is bound to one specific proposal.

use super::error::IbftResult;
use super::extra::pack_field_into_extra;
use super::seal::SerializedSeal;
use super::validators::SchemeTag;
use shared_types::{keccak256, Hash, Header, HeaderError, HeaderHasher};

/// Domain separation tag appended to the signing hash for committed seals.
pub const COMMIT_TAG: u8 = 0x02;

/// Keccak-256 over the full header.
pub fn hash(header: &Header) -> Hash {
    header.keccak_hash()
}

/// Hash of a copy of `header` with the selected seal fields cleared.
pub fn signing_hash(
    header: &Header,
    scheme: SchemeTag,
    exclude_seal: bool,
    exclude_committed_seal: bool,
) -> IbftResult<Hash> {
    let mut copy = header.clone();

    pack_field_into_extra(&mut copy, scheme, |mut extra| {
        if exclude_seal {
            extra.seal = Vec::new();
        }
        if exclude_committed_seal {
            extra.committed_seal = SerializedSeal::default();
        }
        extra
    })?;

    Ok(hash(&copy))
}

/// Chain identity hash: seal and committed seals excluded.
pub fn calculate_header_hash(header: &Header, scheme: SchemeTag) -> IbftResult<Hash> {
    signing_hash(header, scheme, true, true)
}

/// Message whose hash validators sign as their committed seal.
pub fn commit_message(header: &Header, scheme: SchemeTag) -> IbftResult<Vec<u8>> {
    let hash = signing_hash(header, scheme, false, true)?;

    let mut message = Vec::with_capacity(hash.len() + 1);
    message.extend_from_slice(&hash);
    message.push(COMMIT_TAG);
    Ok(message)
}

/// Digest signed by a committed seal.
pub fn commit_digest(header: &Header, scheme: SchemeTag) -> IbftResult<Hash> {
    Ok(keccak256(&commit_message(header, scheme)?))
}

/// [`HeaderHasher`] computing the IBFT chain identity hash.
#[derive(Debug, Clone, Copy, Default)]
pub struct IbftHeaderHasher {
    scheme: SchemeTag,
}

impl IbftHeaderHasher {
    pub fn new(scheme: SchemeTag) -> Self {
        Self { scheme }
    }
}

impl HeaderHasher for IbftHeaderHasher {
    fn header_hash(&self, header: &Header) -> Result<Hash, HeaderError> {
        calculate_header_hash(header, self.scheme).map_err(|e| HeaderError::HashStrategy {
            number: header.number,
            reason: e.to_string(),
        })
    }
}
