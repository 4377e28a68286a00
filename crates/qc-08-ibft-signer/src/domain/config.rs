//! IBFT signer configuration

use super::error::{IbftError, IbftResult};
use super::extra::IBFT_EXTRA_VANITY;
use super::validators::SchemeTag;
use serde::{Deserialize, Serialize};

/// IBFT signer configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IbftConfig {
    /// Scheme of the validator set and committed seals
    pub validator_type: SchemeTag,
    /// Vanity written into new headers, at most 32 bytes (zero padded)
    pub proposer_vanity: Vec<u8>,
    /// Optional cap on extra data size in bytes. Unbounded by default: the
    /// extra grows with the validator set and carries two seal lists.
    pub max_extra_data_size: Option<usize>,
}

impl Default for IbftConfig {
    fn default() -> Self {
        Self {
            validator_type: SchemeTag::Ecdsa,
            proposer_vanity: Vec::new(),
            max_extra_data_size: None,
        }
    }
}

impl IbftConfig {
    pub fn validate(&self) -> IbftResult<()> {
        if self.proposer_vanity.len() > IBFT_EXTRA_VANITY {
            return Err(IbftError::InvalidConfig(format!(
                "proposer vanity is {} bytes, limit is {IBFT_EXTRA_VANITY}",
                self.proposer_vanity.len()
            )));
        }

        if let Some(limit) = self.max_extra_data_size {
            if limit <= IBFT_EXTRA_VANITY {
                return Err(IbftError::InvalidConfig(format!(
                    "max extra data size {limit} leaves no room after the vanity"
                )));
            }
        }

        Ok(())
    }

    /// Vanity prefix right-padded to 32 bytes.
    pub fn vanity_bytes(&self) -> [u8; IBFT_EXTRA_VANITY] {
        let mut vanity = [0u8; IBFT_EXTRA_VANITY];
        let len = self.proposer_vanity.len().min(IBFT_EXTRA_VANITY);
        vanity[..len].copy_from_slice(&self.proposer_vanity[..len]);
        vanity
    }
}
