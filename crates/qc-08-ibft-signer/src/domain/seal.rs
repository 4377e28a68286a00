//! Serialized seal list
//!
//! An ordered list of raw signatures, encoded as an RLP list of byte strings.
//! Order is significant: two lists holding the same signatures in a different
//! order encode, and therefore hash, differently.

use super::codec;
use super::error::{IbftError, IbftResult};
use rlp::{Encodable, Rlp, RlpStream};

/// Ordered sequence of raw seal signatures.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SerializedSeal(pub Vec<Vec<u8>>);

impl SerializedSeal {
    pub fn new(seals: Vec<Vec<u8>>) -> Self {
        Self(seals)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vec<u8>> {
        self.0.iter()
    }

    pub fn push(&mut self, seal: Vec<u8>) {
        self.0.push(seal);
    }

    pub fn rlp_encode(&self) -> Vec<u8> {
        rlp::encode(self).to_vec()
    }

    /// Decode a full byte string; trailing bytes are rejected.
    pub fn decode(data: &[u8]) -> IbftResult<Self> {
        let rlp = codec::single_item(data).map_err(seal_error)?;
        Self::decode_rlp(&rlp)
    }

    pub(crate) fn decode_rlp(rlp: &Rlp<'_>) -> IbftResult<Self> {
        let items = codec::list_items(rlp).map_err(seal_error)?;
        let seals = items
            .iter()
            .map(codec::bytes)
            .collect::<Result<Vec<_>, _>>()
            .map_err(seal_error)?;
        Ok(Self(seals))
    }
}

impl From<Vec<Vec<u8>>> for SerializedSeal {
    fn from(seals: Vec<Vec<u8>>) -> Self {
        Self(seals)
    }
}

impl Encodable for SerializedSeal {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(self.0.len());
        for seal in &self.0 {
            s.append(seal);
        }
    }
}

fn seal_error(err: rlp::DecoderError) -> IbftError {
    IbftError::MalformedSealList(err.to_string())
}
