//! Istanbul extra data
//!
//! Layout of `Header::extra_data`:
//!
//! ```text
//! vanity (32 bytes) || rlp([validators, validators_extra, seal,
//!                           committed_seal, parent_committed_seal])
//! ```
//!
//! Decoding is strict: the encoding must be canonical and nothing may follow
//! the list. A header whose extra data fails any check is rejected whole.

use super::codec;
use super::error::{IbftError, IbftResult};
use super::seal::SerializedSeal;
use super::validators::{SchemeTag, ValidatorSet};
use rlp::{Encodable, RlpStream};
use shared_types::Header;

/// Length of the vanity prefix preceding the encoded extra.
pub const IBFT_EXTRA_VANITY: usize = 32;

/// Number of fields in the encoded extra list.
const EXTRA_FIELDS: usize = 5;

/// Consensus data carried in a header's extra data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IstanbulExtra {
    pub validators: ValidatorSet,
    /// Scheme-specific auxiliary bytes (aggregated BLS public key for BLS
    /// sets, empty for ECDSA).
    pub validators_extra: Vec<u8>,
    /// Proposer seal, empty before sealing.
    pub seal: Vec<u8>,
    /// Committed seals, empty until quorum is collected.
    pub committed_seal: SerializedSeal,
    /// Committed seals of the parent block, empty for the first block.
    pub parent_committed_seal: SerializedSeal,
}

impl IstanbulExtra {
    /// Typed zero value for `scheme`. Decoding into it expects that scheme.
    pub fn empty(scheme: SchemeTag) -> Self {
        Self {
            validators: ValidatorSet::empty(scheme),
            validators_extra: Vec::new(),
            seal: Vec::new(),
            committed_seal: SerializedSeal::default(),
            parent_committed_seal: SerializedSeal::default(),
        }
    }

    pub fn scheme(&self) -> SchemeTag {
        self.validators.scheme()
    }

    /// RLP encoding without the vanity prefix.
    pub fn rlp_encode(&self) -> Vec<u8> {
        rlp::encode(self).to_vec()
    }

    /// Decode `data` into `self`. The scheme of `self.validators` selects the
    /// expected validator variant; `self` is left untouched on error.
    pub fn unmarshal_rlp(&mut self, data: &[u8]) -> IbftResult<()> {
        let rlp = codec::single_item(data)?;
        let fields = codec::list_items(&rlp)?;
        if fields.len() != EXTRA_FIELDS {
            return Err(IbftError::MalformedExtra(format!(
                "expected {EXTRA_FIELDS} fields, got {}",
                fields.len()
            )));
        }

        let decoded = IstanbulExtra {
            validators: ValidatorSet::decode_rlp(&fields[0], self.scheme())?,
            validators_extra: codec::bytes(&fields[1])?,
            seal: codec::bytes(&fields[2])?,
            committed_seal: SerializedSeal::decode_rlp(&fields[3])?,
            parent_committed_seal: SerializedSeal::decode_rlp(&fields[4])?,
        };

        if decoded.rlp_encode() != data {
            return Err(IbftError::MalformedExtra(
                "non-canonical encoding".to_string(),
            ));
        }

        *self = decoded;
        Ok(())
    }

    /// Decode an RLP-encoded extra (no vanity) for `scheme`.
    pub fn decode(data: &[u8], scheme: SchemeTag) -> IbftResult<Self> {
        let mut extra = Self::empty(scheme);
        extra.unmarshal_rlp(data)?;
        Ok(extra)
    }
}

impl Encodable for IstanbulExtra {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(EXTRA_FIELDS);
        s.append(&self.validators);
        s.append(&self.validators_extra);
        s.append(&self.seal);
        s.append(&self.committed_seal);
        s.append(&self.parent_committed_seal);
    }
}

/// Decode the extra carried by `header`.
pub fn get_ibft_extra(header: &Header, scheme: SchemeTag) -> IbftResult<IstanbulExtra> {
    if header.extra_data.len() < IBFT_EXTRA_VANITY {
        return Err(IbftError::ExtraDataTooShort {
            size: header.extra_data.len(),
            required: IBFT_EXTRA_VANITY,
        });
    }

    IstanbulExtra::decode(&header.extra_data[IBFT_EXTRA_VANITY..], scheme)
}

/// Overwrite `header.extra_data` with its current vanity followed by
/// `extra`. A short vanity is right-padded with zeros.
pub fn put_ibft_extra(header: &mut Header, extra: &IstanbulExtra) {
    let mut extra_data = vanity_of(&header.extra_data).to_vec();
    extra_data.extend_from_slice(&extra.rlp_encode());
    header.extra_data = extra_data;
}

/// Decode the header's extra, hand it to `mutate` by value and write back
/// the result. The vanity is carried over verbatim.
pub fn pack_field_into_extra<F>(header: &mut Header, scheme: SchemeTag, mutate: F) -> IbftResult<()>
where
    F: FnOnce(IstanbulExtra) -> IstanbulExtra,
{
    let extra = get_ibft_extra(header, scheme)?;
    put_ibft_extra(header, &mutate(extra));
    Ok(())
}

/// First `IBFT_EXTRA_VANITY` bytes of `extra_data`, zero padded.
pub fn vanity_of(extra_data: &[u8]) -> [u8; IBFT_EXTRA_VANITY] {
    let mut vanity = [0u8; IBFT_EXTRA_VANITY];
    let len = extra_data.len().min(IBFT_EXTRA_VANITY);
    vanity[..len].copy_from_slice(&extra_data[..len]);
    vanity
}
