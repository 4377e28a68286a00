//! Strict RLP helpers shared by the extra-data codecs.
//!
//! `rlp::Rlp::iter` stops silently at the first malformed element, which
//! would let a truncated list decode as a shorter valid one. These helpers
//! walk list payloads explicitly and fail on any element that overruns its
//! parent.

use rlp::{DecoderError, Rlp};

/// Split a list item into its elements, rejecting truncated elements.
pub(crate) fn list_items<'a>(rlp: &Rlp<'a>) -> Result<Vec<Rlp<'a>>, DecoderError> {
    if !rlp.is_list() {
        return Err(DecoderError::RlpExpectedToBeList);
    }

    let info = rlp.payload_info()?;
    let raw: &'a [u8] = rlp.as_raw();
    let payload = &raw[info.header_len..info.header_len + info.value_len];

    let mut items = Vec::new();
    let mut offset = 0;
    while offset < payload.len() {
        let rest = &payload[offset..];
        let item_info = Rlp::new(rest).payload_info()?;
        let total = item_info.header_len + item_info.value_len;
        items.push(Rlp::new(&rest[..total]));
        offset += total;
    }

    Ok(items)
}

/// Decode a byte-string item.
pub(crate) fn bytes(rlp: &Rlp<'_>) -> Result<Vec<u8>, DecoderError> {
    if rlp.is_list() {
        return Err(DecoderError::RlpExpectedToBeData);
    }
    Ok(rlp.data()?.to_vec())
}

/// Decode a byte-string item of exactly `N` bytes.
pub(crate) fn fixed_bytes<const N: usize>(rlp: &Rlp<'_>) -> Result<[u8; N], DecoderError> {
    bytes(rlp)?
        .as_slice()
        .try_into()
        .map_err(|_| DecoderError::Custom("unexpected byte length"))
}

/// Parse `data` as exactly one RLP item with nothing trailing.
pub(crate) fn single_item(data: &[u8]) -> Result<Rlp<'_>, DecoderError> {
    if data.is_empty() {
        return Err(DecoderError::RlpIsTooShort);
    }

    let rlp = Rlp::new(data);
    let info = rlp.payload_info()?;
    if info.header_len + info.value_len != data.len() {
        return Err(DecoderError::RlpInconsistentLengthAndData);
    }

    Ok(rlp)
}
