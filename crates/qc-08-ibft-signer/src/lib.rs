//! # qc-08-ibft-signer
//!
//! IBFT header signer for Quantum-Chain.
//!
//! ## Architecture
//!
//! This subsystem owns the consensus payload carried in a header's extra
//! data and the signatures over it:
//!
//! ```text
//! extra_data = vanity (32) || rlp([validators, validators_extra, seal,
//!                                  committed_seal, parent_committed_seal])
//! ```
//!
//! A header moves through three states:
//!
//! ```text
//! Unsealed ──write_seal──→ Sealed ──write_committed_seals──→ CommitQuorumReached
//! ```
//!
//! - The proposer signs the chain identity hash, which excludes both seals.
//! - Each validator signs the commit digest, which covers the proposer seal.
//! - The next header copies the committed seals as its parent committed
//!   seals, so they become part of its identity hash.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use qc_08_ibft_signer::{EcdsaKeyManager, IbftSigner, IbftSignerApi, ValidatorSet};
//!
//! let signer = IbftSigner::new(Arc::new(EcdsaKeyManager::new(signing_key)));
//!
//! signer.init_ibft_extra(&mut header, &parent, &validators)?;
//! let header = signer.write_seal(header)?;
//! let header = signer.write_committed_seals(header, seals)?;
//! let header = header.compute_hash(&signer.header_hasher())?;
//!
//! signer.verify_committed_seals(&header, &validators)?;
//! ```
//!
//! ## Security
//!
//! - Every decode is strict: truncated, non-canonical or trailing input fails
//! - Committed seals are rejected for non-members, duplicates and short quorum
//! - Committed seals are written in address order, so equal quorums encode
//!   identically

pub mod adapters;
pub mod domain;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-export main types
pub use adapters::{BlsKeyManager, EcdsaKeyManager};
pub use domain::{
    BlsValidator, IbftConfig, IbftError, IbftHeaderHasher, IbftResult, IstanbulExtra, SchemeTag,
    SerializedSeal, ValidatorSet, COMMIT_TAG, IBFT_EXTRA_VANITY,
};
pub use ports::{IbftSignerApi, KeyManager};
pub use service::{IbftSigner, SealState};
