//! Domain layer for the IBFT signer
//!
//! Pure codecs and hash functions, no key material:
//! - validators: validator sets, quorum and proposer selection
//! - seal: ordered seal lists
//! - extra: the `IstanbulExtra` codec and header extra-data accessors
//! - hash: header identity, signing and commit hashes

mod codec;
mod config;
mod error;
mod extra;
mod hash;
mod seal;
mod validators;

pub use config::*;
pub use error::*;
pub use extra::*;
pub use hash::*;
pub use seal::*;
pub use validators::*;
