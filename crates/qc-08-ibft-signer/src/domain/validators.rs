//! Validator set entities
//!
//! A validator set is a closed enum over the supported signature schemes.
//! Every variant keeps validators in insertion order, which is the canonical
//! order for proposer selection and encoding.
//!
//! ## Encoding
//!
//! ```text
//! rlp([scheme_tag, [entry, ...]])
//!   ECDSA entry: address (20 bytes)
//!   BLS entry:   [address (20 bytes), bls_public_key (96 bytes)]
//! ```

use super::codec;
use super::error::{IbftError, IbftResult};
use qc_10_signature_verification::BlsPublicKey;
use rlp::{Encodable, Rlp, RlpStream};
use serde::{Deserialize, Serialize};
use shared_types::Address;
use std::collections::HashMap;
use std::fmt;

/// Signature scheme of a validator set, encoded first so the decoder can
/// check it against the expected variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum SchemeTag {
    #[default]
    Ecdsa = 0,
    Bls = 1,
}

impl SchemeTag {
    /// Wire tag
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Parse a wire tag
    pub fn from_u8(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(SchemeTag::Ecdsa),
            1 => Some(SchemeTag::Bls),
            _ => None,
        }
    }
}

impl fmt::Display for SchemeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemeTag::Ecdsa => write!(f, "ecdsa"),
            SchemeTag::Bls => write!(f, "bls"),
        }
    }
}

/// A BLS validator: its ECDSA identity plus the key its committed seals
/// verify against.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlsValidator {
    pub address: Address,
    pub bls_public_key: BlsPublicKey,
}

impl BlsValidator {
    pub fn new(address: Address, bls_public_key: BlsPublicKey) -> Self {
        Self {
            address,
            bls_public_key,
        }
    }
}

fn build_lookup(addresses: impl Iterator<Item = Address>) -> IbftResult<HashMap<Address, usize>> {
    let mut lookup = HashMap::new();
    for (index, address) in addresses.enumerate() {
        if lookup.insert(address, index).is_some() {
            return Err(IbftError::DuplicateValidator(address));
        }
    }
    Ok(lookup)
}

/// Address-only validator set (ECDSA committed seals).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EcdsaValidatorSet {
    validators: Vec<Address>,
    /// Quick lookup by address
    lookup: HashMap<Address, usize>,
}

impl EcdsaValidatorSet {
    pub fn new(validators: Vec<Address>) -> IbftResult<Self> {
        let lookup = build_lookup(validators.iter().copied())?;
        Ok(Self { validators, lookup })
    }

    pub fn validators(&self) -> &[Address] {
        &self.validators
    }
}

/// Validator set whose committed seals are BLS signatures.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlsValidatorSet {
    validators: Vec<BlsValidator>,
    /// Quick lookup by address
    lookup: HashMap<Address, usize>,
}

impl BlsValidatorSet {
    pub fn new(validators: Vec<BlsValidator>) -> IbftResult<Self> {
        let lookup = build_lookup(validators.iter().map(|v| v.address))?;
        Ok(Self { validators, lookup })
    }

    pub fn validators(&self) -> &[BlsValidator] {
        &self.validators
    }

    /// BLS public key of a member
    pub fn public_key(&self, address: &Address) -> Option<&BlsPublicKey> {
        self.lookup
            .get(address)
            .map(|&idx| &self.validators[idx].bls_public_key)
    }

    pub fn public_keys(&self) -> Vec<BlsPublicKey> {
        self.validators
            .iter()
            .map(|v| v.bls_public_key.clone())
            .collect()
    }
}

/// Validator set, polymorphic over the committed-seal scheme.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidatorSet {
    Ecdsa(EcdsaValidatorSet),
    Bls(BlsValidatorSet),
}

impl ValidatorSet {
    /// ECDSA set from addresses; fails on duplicates.
    pub fn ecdsa(addresses: Vec<Address>) -> IbftResult<Self> {
        EcdsaValidatorSet::new(addresses).map(ValidatorSet::Ecdsa)
    }

    /// BLS set from validators; fails on duplicate addresses.
    pub fn bls(validators: Vec<BlsValidator>) -> IbftResult<Self> {
        BlsValidatorSet::new(validators).map(ValidatorSet::Bls)
    }

    /// Typed zero value for `scheme`.
    pub fn empty(scheme: SchemeTag) -> Self {
        match scheme {
            SchemeTag::Ecdsa => ValidatorSet::Ecdsa(EcdsaValidatorSet::default()),
            SchemeTag::Bls => ValidatorSet::Bls(BlsValidatorSet::default()),
        }
    }

    pub fn scheme(&self) -> SchemeTag {
        match self {
            ValidatorSet::Ecdsa(_) => SchemeTag::Ecdsa,
            ValidatorSet::Bls(_) => SchemeTag::Bls,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ValidatorSet::Ecdsa(set) => set.validators.len(),
            ValidatorSet::Bls(set) => set.validators.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup(&self) -> &HashMap<Address, usize> {
        match self {
            ValidatorSet::Ecdsa(set) => &set.lookup,
            ValidatorSet::Bls(set) => &set.lookup,
        }
    }

    /// Check if an address is in the set
    pub fn contains(&self, address: &Address) -> bool {
        self.lookup().contains_key(address)
    }

    /// Position of an address in canonical order
    pub fn index_of(&self, address: &Address) -> Option<usize> {
        self.lookup().get(address).copied()
    }

    /// Address at a position in canonical order
    pub fn at(&self, index: usize) -> Option<Address> {
        match self {
            ValidatorSet::Ecdsa(set) => set.validators.get(index).copied(),
            ValidatorSet::Bls(set) => set.validators.get(index).map(|v| v.address),
        }
    }

    /// Addresses in canonical order
    pub fn addresses(&self) -> Vec<Address> {
        match self {
            ValidatorSet::Ecdsa(set) => set.validators.clone(),
            ValidatorSet::Bls(set) => set.validators.iter().map(|v| v.address).collect(),
        }
    }

    /// Minimum number of distinct seals for byzantine safety with
    /// `n = 3f + 1`: `floor(2n / 3) + 1`.
    pub fn quorum_size(&self) -> usize {
        2 * self.len() / 3 + 1
    }

    /// Round-robin proposer for `height` and `round`.
    pub fn proposer(&self, height: u64, round: u64) -> Option<Address> {
        if self.is_empty() {
            return None;
        }
        let seed = u128::from(height) + u128::from(round);
        self.at((seed % self.len() as u128) as usize)
    }

    /// Round-robin proposer that continues after the previous block's
    /// proposer. Without a previous proposer (first block) the round alone
    /// picks the index.
    pub fn calc_proposer(&self, round: u64, last_proposer: Option<&Address>) -> Option<Address> {
        if self.is_empty() {
            return None;
        }

        let seed = match last_proposer {
            None => u128::from(round),
            Some(last) => {
                let offset = self.index_of(last).unwrap_or(0) as u128;
                offset + u128::from(round) + 1
            }
        };

        self.at((seed % self.len() as u128) as usize)
    }

    /// RLP encoding
    pub fn rlp_encode(&self) -> Vec<u8> {
        rlp::encode(self).to_vec()
    }

    /// Decode a full byte string; trailing bytes are rejected.
    pub fn decode(data: &[u8], expected: SchemeTag) -> IbftResult<Self> {
        let rlp = codec::single_item(data).map_err(set_error)?;
        Self::decode_rlp(&rlp, expected)
    }

    pub(crate) fn decode_rlp(rlp: &Rlp<'_>, expected: SchemeTag) -> IbftResult<Self> {
        let fields = codec::list_items(rlp).map_err(set_error)?;
        if fields.len() != 2 {
            return Err(IbftError::InvalidSetEncoding(format!(
                "expected [tag, validators], got {} fields",
                fields.len()
            )));
        }

        let tag: u8 = fields[0].as_val().map_err(set_error)?;
        if SchemeTag::from_u8(tag) != Some(expected) {
            return Err(IbftError::SchemeMismatch {
                expected,
                actual: tag,
            });
        }

        let entries = codec::list_items(&fields[1]).map_err(set_error)?;
        let set = match expected {
            SchemeTag::Ecdsa => {
                let addresses = entries
                    .iter()
                    .map(codec::fixed_bytes::<20>)
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(set_error)?;
                ValidatorSet::ecdsa(addresses)
            }
            SchemeTag::Bls => {
                let validators = entries
                    .iter()
                    .map(decode_bls_validator)
                    .collect::<IbftResult<Vec<_>>>()?;
                ValidatorSet::bls(validators)
            }
        };

        set.map_err(|e| IbftError::InvalidSetEncoding(e.to_string()))
    }
}

fn decode_bls_validator(rlp: &Rlp<'_>) -> IbftResult<BlsValidator> {
    let fields = codec::list_items(rlp).map_err(set_error)?;
    if fields.len() != 2 {
        return Err(IbftError::InvalidSetEncoding(format!(
            "expected [address, bls_public_key], got {} fields",
            fields.len()
        )));
    }

    let address = codec::fixed_bytes::<20>(&fields[0]).map_err(set_error)?;
    let public_key = codec::bytes(&fields[1]).map_err(set_error)?;
    let bls_public_key = BlsPublicKey::from_slice(&public_key)
        .map_err(|e| IbftError::InvalidSetEncoding(e.to_string()))?;

    Ok(BlsValidator::new(address, bls_public_key))
}

fn set_error(err: rlp::DecoderError) -> IbftError {
    IbftError::InvalidSetEncoding(err.to_string())
}

impl Encodable for ValidatorSet {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(2);
        s.append(&self.scheme().as_u8());
        match self {
            ValidatorSet::Ecdsa(set) => {
                s.begin_list(set.validators.len());
                for address in &set.validators {
                    s.append(&address.to_vec());
                }
            }
            ValidatorSet::Bls(set) => {
                s.begin_list(set.validators.len());
                for validator in &set.validators {
                    s.begin_list(2);
                    s.append(&validator.address.to_vec());
                    s.append(&validator.bls_public_key.bytes.to_vec());
                }
            }
        }
    }
}
