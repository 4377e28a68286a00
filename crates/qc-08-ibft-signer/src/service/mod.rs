//! IBFT Signer Service - header sealing and seal verification
//!
//! # Architecture
//! - Stateless apart from the key manager, which is read-only
//! - Codec and hashing live in `domain`; this layer adds key custody,
//!   quorum rules and size limits
//! - Committed seals are recovered in parallel where the scheme allows it

use crate::domain::{
    commit_digest, get_ibft_extra, pack_field_into_extra, signing_hash,
    IbftConfig, IbftError, IbftHeaderHasher, IbftResult, IstanbulExtra, SchemeTag,
    SerializedSeal, ValidatorSet, IBFT_EXTRA_VANITY,
};
use crate::metrics;
use crate::ports::{IbftSignerApi, KeyManager};
use qc_10_signature_verification::aggregate_bls_public_keys;
use shared_types::{Address, Hash, Header};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Position of a header in the sealing lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SealState {
    /// No proposer seal yet
    Unsealed,
    /// Proposer seal written, committed seals pending
    Sealed,
    /// Committed seals written (a quorum is enforced when writing them)
    CommitQuorumReached,
}

/// IBFT header signer
pub struct IbftSigner<K: KeyManager> {
    key_manager: Arc<K>,
    config: IbftConfig,
}

impl<K: KeyManager> Clone for IbftSigner<K> {
    fn clone(&self) -> Self {
        Self {
            key_manager: Arc::clone(&self.key_manager),
            config: self.config.clone(),
        }
    }
}

impl<K: KeyManager> IbftSigner<K> {
    /// Signer with the default configuration for the key manager's scheme.
    pub fn new(key_manager: Arc<K>) -> Self {
        let config = IbftConfig {
            validator_type: key_manager.scheme(),
            ..Default::default()
        };
        Self {
            key_manager,
            config,
        }
    }

    /// # Errors
    /// * `InvalidConfig` if the configuration is invalid or its validator
    ///   type differs from the key manager's scheme
    pub fn with_config(key_manager: Arc<K>, config: IbftConfig) -> IbftResult<Self> {
        config.validate()?;

        if config.validator_type != key_manager.scheme() {
            return Err(IbftError::InvalidConfig(format!(
                "validator type {} does not match {} key manager",
                config.validator_type,
                key_manager.scheme()
            )));
        }

        Ok(Self {
            key_manager,
            config,
        })
    }

    pub fn scheme(&self) -> SchemeTag {
        self.config.validator_type
    }

    pub fn address(&self) -> Address {
        self.key_manager.address()
    }

    pub fn config(&self) -> &IbftConfig {
        &self.config
    }

    pub fn key_manager(&self) -> &K {
        &self.key_manager
    }

    /// Hash strategy to pass to `Header::compute_hash`.
    pub fn header_hasher(&self) -> IbftHeaderHasher {
        IbftHeaderHasher::new(self.scheme())
    }

    /// Keccak-256 over the full header.
    pub fn hash(&self, header: &Header) -> Hash {
        crate::domain::hash(header)
    }

    pub fn signing_hash(
        &self,
        header: &Header,
        exclude_seal: bool,
        exclude_committed_seal: bool,
    ) -> IbftResult<Hash> {
        self.check_extra_size(header)
            .and_then(|_| {
                signing_hash(header, self.scheme(), exclude_seal, exclude_committed_seal)
            })
            .map_err(|e| extra_decode_error(header.number, e))
    }

    /// Chain identity hash, signed by the proposer.
    pub fn calculate_header_hash(&self, header: &Header) -> IbftResult<Hash> {
        self.signing_hash(header, true, true)
    }

    fn commit_digest(&self, header: &Header) -> IbftResult<Hash> {
        self.check_extra_size(header)
            .and_then(|_| commit_digest(header, self.scheme()))
            .map_err(|e| extra_decode_error(header.number, e))
    }

    pub fn seal_state(&self, header: &Header) -> IbftResult<SealState> {
        let extra = self.get_ibft_extra(header)?;

        Ok(if extra.seal.is_empty() {
            SealState::Unsealed
        } else if extra.committed_seal.is_empty() {
            SealState::Sealed
        } else {
            SealState::CommitQuorumReached
        })
    }

    /// Recover the proposer address from the header's seal.
    pub fn recover_proposer(&self, header: &Header) -> IbftResult<Address> {
        let extra = self.get_ibft_extra(header)?;
        if extra.seal.is_empty() {
            return Err(IbftError::StateError {
                number: header.number,
                reason: "header has no proposer seal",
            });
        }

        let digest = self.calculate_header_hash(header)?;
        self.key_manager
            .recover_proposer(&digest, &extra.seal)
            .map_err(IbftError::InvalidSeal)
    }

    /// Check a single committed seal while collecting commits.
    ///
    /// # Errors
    /// * `InvalidSeal` if the seal does not belong to `signer`
    /// * `UnknownSigner` if `signer` is not in `validators`
    pub fn verify_committed_seal(
        &self,
        header: &Header,
        validators: &ValidatorSet,
        signer: &Address,
        seal: &[u8],
    ) -> IbftResult<()> {
        if !validators.contains(signer) {
            return Err(IbftError::UnknownSigner(*signer));
        }

        let digest = self.commit_digest(header)?;
        self.key_manager
            .verify_committed_seal_signer(&digest, seal, signer, validators)
            .map_err(IbftError::InvalidSeal)
    }

    /// Verify the parent committed seals carried by `header`.
    ///
    /// A header whose parent is genesis carries none and verifies with a
    /// count of zero.
    pub fn verify_parent_committed_seals(
        &self,
        parent: &Header,
        header: &Header,
        parent_validators: &ValidatorSet,
    ) -> IbftResult<usize> {
        let extra = self.get_ibft_extra(header)?;

        if parent.is_genesis() {
            if !extra.parent_committed_seal.is_empty() {
                return Err(IbftError::StateError {
                    number: header.number,
                    reason: "parent committed seal present on first block",
                });
            }
            return Ok(0);
        }

        let digest = self.commit_digest(parent)?;
        self.verify_seal_list(
            header.number,
            &extra.parent_committed_seal,
            &digest,
            parent_validators,
        )
    }

    fn verify_seal_list(
        &self,
        number: u64,
        seals: &SerializedSeal,
        digest: &Hash,
        validators: &ValidatorSet,
    ) -> IbftResult<usize> {
        let result = self.check_seal_list(seals, digest, validators);

        match &result {
            Ok(count) => {
                debug!(block = number, seals = count, "Committed seals verified");
                metrics::record_seal_verification("accepted");
            }
            Err(e) => {
                warn!(block = number, error = %e, "Committed seals rejected");
                metrics::record_seal_verification(rejection_reason(e));
            }
        }

        result
    }

    fn check_seal_list(
        &self,
        seals: &SerializedSeal,
        digest: &Hash,
        validators: &ValidatorSet,
    ) -> IbftResult<usize> {
        if seals.is_empty() {
            return Err(IbftError::EmptyCommittedSeal);
        }

        if validators.scheme() != self.scheme() {
            return Err(IbftError::SchemeMismatch {
                expected: self.scheme(),
                actual: validators.scheme().as_u8(),
            });
        }

        // Distinct signers cannot outnumber the set; refuse before any crypto.
        if seals.len() > validators.len() {
            return Err(IbftError::TooManyCommittedSeals {
                got: seals.len(),
                validators: validators.len(),
            });
        }

        let signers = self
            .key_manager
            .recover_committed_seal_signers(digest, &seals.0, validators)
            .map_err(IbftError::InvalidSeal)?;

        // Strictly ascending signers, the order write_committed_seals produces.
        let mut previous: Option<Address> = None;
        for signer in &signers {
            if !validators.contains(signer) {
                return Err(IbftError::UnknownSigner(*signer));
            }
            match previous {
                Some(prev) if prev == *signer => {
                    return Err(IbftError::DuplicateSigner(*signer));
                }
                Some(prev) if prev > *signer => {
                    return Err(IbftError::UnorderedCommittedSeal {
                        previous: prev,
                        current: *signer,
                    });
                }
                _ => previous = Some(*signer),
            }
        }

        let required = validators.quorum_size();
        if signers.len() < required {
            return Err(IbftError::InsufficientQuorum {
                got: signers.len(),
                required,
            });
        }

        Ok(signers.len())
    }

    fn check_extra_size(&self, header: &Header) -> IbftResult<()> {
        self.check_size(header.extra_data.len())
    }

    fn check_size(&self, size: usize) -> IbftResult<()> {
        match self.config.max_extra_data_size {
            Some(limit) if size > limit => Err(IbftError::ExtraDataTooLarge { size, limit }),
            _ => Ok(()),
        }
    }

    fn pack(
        &self,
        header: &mut Header,
        mutate: impl FnOnce(IstanbulExtra) -> IstanbulExtra,
    ) -> IbftResult<()> {
        pack_field_into_extra(header, self.scheme(), mutate)
            .map_err(|e| extra_decode_error(header.number, e))?;
        self.check_extra_size(header)
    }

    fn validators_extra(&self, validators: &ValidatorSet) -> IbftResult<Vec<u8>> {
        match validators {
            ValidatorSet::Bls(set) if !set.validators().is_empty() => {
                let aggregate = aggregate_bls_public_keys(&set.public_keys())
                    .map_err(|e| IbftError::InvalidSetEncoding(e.to_string()))?;
                Ok(aggregate.bytes.to_vec())
            }
            _ => Ok(Vec::new()),
        }
    }

    fn require_seal(number: u64, extra: &IstanbulExtra) -> IbftResult<()> {
        if extra.seal.is_empty() {
            return Err(IbftError::StateError {
                number,
                reason: "header has no proposer seal",
            });
        }
        Ok(())
    }
}

impl<K: KeyManager> IbftSignerApi for IbftSigner<K> {
    fn init_ibft_extra(
        &self,
        header: &mut Header,
        parent: &Header,
        validators: &ValidatorSet,
    ) -> IbftResult<()> {
        if validators.scheme() != self.scheme() {
            return Err(IbftError::SchemeMismatch {
                expected: self.scheme(),
                actual: validators.scheme().as_u8(),
            });
        }

        let parent_committed_seal = if parent.is_genesis() {
            SerializedSeal::default()
        } else {
            self.get_ibft_extra(parent)?.committed_seal
        };

        let extra = IstanbulExtra {
            validators: validators.clone(),
            validators_extra: self.validators_extra(validators)?,
            seal: Vec::new(),
            committed_seal: SerializedSeal::default(),
            parent_committed_seal,
        };

        let mut extra_data = if header.extra_data.len() >= IBFT_EXTRA_VANITY {
            header.extra_data[..IBFT_EXTRA_VANITY].to_vec()
        } else {
            self.config.vanity_bytes().to_vec()
        };
        extra_data.extend_from_slice(&extra.rlp_encode());

        self.check_size(extra_data.len())?;

        header.extra_data = extra_data;

        debug!(
            block = header.number,
            validators = validators.len(),
            parent_seals = extra.parent_committed_seal.len(),
            "Initialized IBFT extra"
        );
        Ok(())
    }

    fn get_ibft_extra(&self, header: &Header) -> IbftResult<IstanbulExtra> {
        self.check_extra_size(header)
            .and_then(|_| get_ibft_extra(header, self.scheme()))
            .map_err(|e| extra_decode_error(header.number, e))
    }

    fn write_seal(&self, mut header: Header) -> IbftResult<Header> {
        let digest = self.calculate_header_hash(&header)?;
        let seal = self
            .key_manager
            .sign_proposer_seal(&digest)
            .map_err(IbftError::SigningError)?;

        self.pack(&mut header, |mut extra| {
            extra.seal = seal;
            extra
        })?;

        debug!(
            block = header.number,
            digest = %hex::encode(digest),
            proposer = %hex::encode(self.address()),
            "Wrote proposer seal"
        );
        metrics::record_seal_written();

        Ok(header)
    }

    fn create_committed_seal(&self, header: &Header) -> IbftResult<Vec<u8>> {
        let extra = self.get_ibft_extra(header)?;
        Self::require_seal(header.number, &extra)?;

        let digest = self.commit_digest(header)?;
        self.key_manager
            .sign_committed_seal(&digest)
            .map_err(IbftError::SigningError)
    }

    fn write_committed_seals(
        &self,
        mut header: Header,
        seals: HashMap<Address, Vec<u8>>,
    ) -> IbftResult<Header> {
        let extra = self.get_ibft_extra(&header)?;
        Self::require_seal(header.number, &extra)?;

        let required = extra.validators.quorum_size();
        if seals.len() < required {
            return Err(IbftError::EmptyQuorum {
                got: seals.len(),
                required,
            });
        }

        // Ascending address order keeps the encoding independent of map order.
        let ordered: BTreeMap<Address, Vec<u8>> = seals.into_iter().collect();
        let committed_seal = SerializedSeal::new(ordered.into_values().collect());
        let count = committed_seal.len();

        self.pack(&mut header, |mut extra| {
            extra.committed_seal = committed_seal;
            extra
        })?;

        info!(
            block = header.number,
            seals = count,
            quorum = required,
            "Wrote committed seals"
        );
        metrics::record_committed_seals_written(count);

        Ok(header)
    }

    fn verify_committed_seals(
        &self,
        header: &Header,
        validators: &ValidatorSet,
    ) -> IbftResult<usize> {
        let extra = self.get_ibft_extra(header)?;
        let digest = self.commit_digest(header)?;
        self.verify_seal_list(header.number, &extra.committed_seal, &digest, validators)
    }
}

fn extra_decode_error(number: u64, source: IbftError) -> IbftError {
    match source {
        IbftError::ExtraDecodeError { .. } => source,
        other => IbftError::ExtraDecodeError {
            number,
            source: Box::new(other),
        },
    }
}

fn rejection_reason(error: &IbftError) -> &'static str {
    match error {
        IbftError::EmptyCommittedSeal => "empty",
        IbftError::InsufficientQuorum { .. } => "insufficient_quorum",
        IbftError::UnknownSigner(_) => "unknown_signer",
        IbftError::DuplicateSigner(_) => "duplicate_signer",
        IbftError::UnorderedCommittedSeal { .. } => "unordered",
        IbftError::TooManyCommittedSeals { .. } => "too_many_seals",
        IbftError::InvalidSeal(_) => "invalid_seal",
        IbftError::SchemeMismatch { .. } => "scheme_mismatch",
        _ => "other",
    }
}
