//! Driving ports (Inbound API)

use crate::domain::{IbftResult, IstanbulExtra, ValidatorSet};
use shared_types::{Address, Header};
use std::collections::HashMap;

/// Primary IBFT signer API
///
/// Drives a header through `Unsealed → Sealed → CommitQuorumReached`.
pub trait IbftSignerApi: Send + Sync {
    /// Write a fresh extra into `header`: the given validators, no seals,
    /// and the parent's committed seals (empty when the parent is genesis).
    fn init_ibft_extra(
        &self,
        header: &mut Header,
        parent: &Header,
        validators: &ValidatorSet,
    ) -> IbftResult<()>;

    /// Decode the extra of `header`
    fn get_ibft_extra(&self, header: &Header) -> IbftResult<IstanbulExtra>;

    /// Sign the identity hash and store the proposer seal
    fn write_seal(&self, header: Header) -> IbftResult<Header>;

    /// Produce this validator's committed seal for a sealed header
    fn create_committed_seal(&self, header: &Header) -> IbftResult<Vec<u8>>;

    /// Store committed seals collected from validators.
    ///
    /// The caller has already checked that each seal belongs to its address.
    /// Seals are written in ascending address order.
    fn write_committed_seals(
        &self,
        header: Header,
        seals: HashMap<Address, Vec<u8>>,
    ) -> IbftResult<Header>;

    /// Verify the committed seals of `header` against `validators`.
    ///
    /// # Returns
    /// Number of distinct member seals
    fn verify_committed_seals(
        &self,
        header: &Header,
        validators: &ValidatorSet,
    ) -> IbftResult<usize>;
}
