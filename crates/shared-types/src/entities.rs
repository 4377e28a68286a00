//! # Core Chain Entities
//!
//! The block header and the fixed-width primitives it is built from.
//!
//! ## Header Lifecycle
//!
//! A block producer fills the plain fields, a consensus engine writes its
//! metadata into `extra_data`, and finally [`Header::compute_hash`] derives
//! `hash` using whichever [`HeaderHasher`] the engine provides. `hash` is
//! never written anywhere else.

use crate::errors::HeaderError;
use crate::hashing::{keccak256, HeaderHasher};
use rlp::RlpStream;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};

/// A 32-byte Keccak-256 hash.
pub type Hash = [u8; 32];

/// A 20-byte Ethereum-style address.
pub type Address = [u8; 20];

/// A 256-byte logs bloom filter.
pub type Bloom = [u8; 256];

/// The all-zero hash.
pub const ZERO_HASH: Hash = [0u8; 32];

/// The all-zero address.
pub const ZERO_ADDRESS: Address = [0u8; 20];

/// Keccak-256 of the RLP encoding of an empty list (no uncles).
pub const EMPTY_UNCLE_HASH: Hash = [
    0x1d, 0xcc, 0x4d, 0xe8, 0xde, 0xc7, 0x5d, 0x7a, 0xab, 0x85, 0xb5, 0x67, 0xb6, 0xcc, 0xd4, 0x1a,
    0xd3, 0x12, 0x45, 0x1b, 0x94, 0x8a, 0x74, 0x13, 0xf0, 0xa1, 0x42, 0xfd, 0x40, 0xd4, 0x93, 0x47,
];

/// Block header.
///
/// `Clone` produces a deep, independent copy: every field is owned.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Hash of the parent block (creates the chain linkage).
    pub parent_hash: Hash,
    /// Hash of the uncles list; always the empty-list hash under BFT.
    pub sha3_uncles: Hash,
    /// Beneficiary of the block reward.
    pub miner: Address,
    /// Root hash of the state trie after applying this block.
    pub state_root: Hash,
    /// Root hash of the transactions in this block.
    pub tx_root: Hash,
    /// Root hash of the receipts of this block.
    pub receipts_root: Hash,
    /// Bloom filter over the logs of this block.
    #[serde_as(as = "Bytes")]
    pub logs_bloom: Bloom,
    /// Block difficulty.
    pub difficulty: u64,
    /// Block height in the chain.
    pub number: u64,
    /// Gas limit of this block.
    pub gas_limit: u64,
    /// Gas consumed by this block.
    pub gas_used: u64,
    /// Unix timestamp when the block was proposed.
    pub timestamp: u64,
    /// Consensus specific payload.
    pub extra_data: Vec<u8>,
    /// Mix digest.
    pub mix_hash: Hash,
    /// Block nonce.
    pub nonce: [u8; 8],
    /// Derived hash, set by [`Header::compute_hash`].
    pub hash: Hash,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            parent_hash: ZERO_HASH,
            sha3_uncles: EMPTY_UNCLE_HASH,
            miner: ZERO_ADDRESS,
            state_root: ZERO_HASH,
            tx_root: ZERO_HASH,
            receipts_root: ZERO_HASH,
            logs_bloom: [0u8; 256],
            difficulty: 0,
            number: 0,
            gas_limit: 0,
            gas_used: 0,
            timestamp: 0,
            extra_data: Vec::new(),
            mix_hash: ZERO_HASH,
            nonce: [0u8; 8],
            hash: ZERO_HASH,
        }
    }
}

impl Header {
    /// RLP encoding of every field except `hash`, in Ethereum header order.
    pub fn rlp_encode(&self) -> Vec<u8> {
        let mut stream = RlpStream::new_list(15);
        stream.append(&self.parent_hash.to_vec());
        stream.append(&self.sha3_uncles.to_vec());
        stream.append(&self.miner.to_vec());
        stream.append(&self.state_root.to_vec());
        stream.append(&self.tx_root.to_vec());
        stream.append(&self.receipts_root.to_vec());
        stream.append(&self.logs_bloom.to_vec());
        stream.append(&self.difficulty);
        stream.append(&self.number);
        stream.append(&self.gas_limit);
        stream.append(&self.gas_used);
        stream.append(&self.timestamp);
        stream.append(&self.extra_data);
        stream.append(&self.mix_hash.to_vec());
        stream.append(&self.nonce.to_vec());
        stream.out().to_vec()
    }

    /// Keccak-256 over [`Header::rlp_encode`], with the extra data exactly as
    /// currently set.
    pub fn keccak_hash(&self) -> Hash {
        keccak256(&self.rlp_encode())
    }

    /// Derive `hash` with the given strategy and return the updated header.
    pub fn compute_hash(mut self, hasher: &dyn HeaderHasher) -> Result<Self, HeaderError> {
        self.hash = hasher.header_hash(&self)?;
        Ok(self)
    }

    /// Check if this is a genesis header
    pub fn is_genesis(&self) -> bool {
        self.number == 0
    }
}
