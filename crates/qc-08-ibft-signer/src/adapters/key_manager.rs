//! Key manager adapters
//!
//! Implement the KeyManager port for ECDSA and BLS validator sets.

use crate::domain::{BlsValidator, SchemeTag, ValidatorSet};
use crate::ports::KeyManager;
use blst::min_sig::SecretKey;
use k256::ecdsa::SigningKey;
use qc_10_signature_verification::{
    address_from_pubkey, bls_keygen, bls_public_key, recover_address, sign_bls, sign_prehash,
    verify_bls, verify_ecdsa_signer, BlsPublicKey, BlsSignature, EcdsaSignature, SignatureError,
};
use shared_types::{Address, Hash};
use std::fmt;

/// Key manager whose proposer and committed seals are secp256k1 signatures.
#[derive(Clone)]
pub struct EcdsaKeyManager {
    signing_key: SigningKey,
    address: Address,
}

impl EcdsaKeyManager {
    pub fn new(signing_key: SigningKey) -> Self {
        let address = address_from_pubkey(signing_key.verifying_key());
        Self {
            signing_key,
            address,
        }
    }

    /// Load a key from its 32-byte big-endian scalar.
    pub fn from_slice(secret: &[u8]) -> Result<Self, SignatureError> {
        SigningKey::from_slice(secret)
            .map(Self::new)
            .map_err(|_| SignatureError::InvalidKey)
    }

    fn sign(&self, digest: &Hash) -> Result<Vec<u8>, SignatureError> {
        Ok(sign_prehash(digest, &self.signing_key)?.to_bytes().to_vec())
    }
}

impl fmt::Debug for EcdsaKeyManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EcdsaKeyManager")
            .field("address", &hex::encode(self.address))
            .finish_non_exhaustive()
    }
}

impl KeyManager for EcdsaKeyManager {
    fn scheme(&self) -> SchemeTag {
        SchemeTag::Ecdsa
    }

    fn address(&self) -> Address {
        self.address
    }

    fn sign_proposer_seal(&self, digest: &Hash) -> Result<Vec<u8>, SignatureError> {
        self.sign(digest)
    }

    fn sign_committed_seal(&self, digest: &Hash) -> Result<Vec<u8>, SignatureError> {
        self.sign(digest)
    }

    fn recover_committed_seal_signer(
        &self,
        digest: &Hash,
        seal: &[u8],
        _validators: &ValidatorSet,
    ) -> Result<Address, SignatureError> {
        let signature = EcdsaSignature::from_slice(seal)?;
        recover_address(digest, &signature)
    }

    fn verify_committed_seal_signer(
        &self,
        digest: &Hash,
        seal: &[u8],
        signer: &Address,
        _validators: &ValidatorSet,
    ) -> Result<(), SignatureError> {
        let signature = EcdsaSignature::from_slice(seal)?;
        verify_ecdsa_signer(digest, &signature, *signer)
    }
}

/// Key manager for BLS validator sets.
///
/// The ECDSA key provides the validator address and the proposer seal; the
/// BLS key signs committed seals.
#[derive(Clone)]
pub struct BlsKeyManager {
    ecdsa: EcdsaKeyManager,
    bls_secret: SecretKey,
    bls_public_key: BlsPublicKey,
}

impl BlsKeyManager {
    pub fn new(signing_key: SigningKey, bls_secret: SecretKey) -> Self {
        let bls_public_key = bls_public_key(&bls_secret);
        Self {
            ecdsa: EcdsaKeyManager::new(signing_key),
            bls_secret,
            bls_public_key,
        }
    }

    /// Derive the BLS key from input key material (at least 32 bytes).
    pub fn from_ikm(signing_key: SigningKey, ikm: &[u8]) -> Result<Self, SignatureError> {
        Ok(Self::new(signing_key, bls_keygen(ikm)?))
    }

    pub fn bls_public_key(&self) -> &BlsPublicKey {
        &self.bls_public_key
    }

    /// This key manager's entry in a BLS validator set
    pub fn validator(&self) -> BlsValidator {
        BlsValidator::new(self.ecdsa.address, self.bls_public_key.clone())
    }
}

impl fmt::Debug for BlsKeyManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlsKeyManager")
            .field("address", &hex::encode(self.ecdsa.address))
            .finish_non_exhaustive()
    }
}

impl KeyManager for BlsKeyManager {
    fn scheme(&self) -> SchemeTag {
        SchemeTag::Bls
    }

    fn address(&self) -> Address {
        self.ecdsa.address
    }

    fn sign_proposer_seal(&self, digest: &Hash) -> Result<Vec<u8>, SignatureError> {
        self.ecdsa.sign(digest)
    }

    fn sign_committed_seal(&self, digest: &Hash) -> Result<Vec<u8>, SignatureError> {
        Ok(sign_bls(&self.bls_secret, digest).bytes.to_vec())
    }

    fn recover_committed_seal_signer(
        &self,
        digest: &Hash,
        seal: &[u8],
        validators: &ValidatorSet,
    ) -> Result<Address, SignatureError> {
        let ValidatorSet::Bls(set) = validators else {
            return Err(SignatureError::InvalidKey);
        };

        let signature = BlsSignature::from_slice(seal)?;
        set.validators()
            .iter()
            .find(|v| verify_bls(digest, &signature, &v.bls_public_key))
            .map(|v| v.address)
            .ok_or(SignatureError::VerificationFailed)
    }

    /// Single pass over the set in address order: each seal is only tried
    /// against keys after the previous match, so a list costs at most one
    /// pairing per validator whether it verifies or not.
    fn recover_committed_seal_signers(
        &self,
        digest: &Hash,
        seals: &[Vec<u8>],
        validators: &ValidatorSet,
    ) -> Result<Vec<Address>, SignatureError> {
        let ValidatorSet::Bls(set) = validators else {
            return Err(SignatureError::InvalidKey);
        };

        let mut candidates: Vec<&BlsValidator> = set.validators().iter().collect();
        candidates.sort_by_key(|v| v.address);

        let mut next = 0;
        let mut signers = Vec::with_capacity(seals.len());
        for seal in seals {
            let signature = BlsSignature::from_slice(seal)?;
            let offset = candidates[next..]
                .iter()
                .position(|v| verify_bls(digest, &signature, &v.bls_public_key))
                .ok_or(SignatureError::VerificationFailed)?;

            signers.push(candidates[next + offset].address);
            next += offset + 1;
        }

        Ok(signers)
    }

    fn verify_committed_seal_signer(
        &self,
        digest: &Hash,
        seal: &[u8],
        signer: &Address,
        validators: &ValidatorSet,
    ) -> Result<(), SignatureError> {
        let ValidatorSet::Bls(set) = validators else {
            return Err(SignatureError::InvalidKey);
        };
        let public_key = set.public_key(signer).ok_or(SignatureError::InvalidKey)?;

        let signature = BlsSignature::from_slice(seal)?;
        if !verify_bls(digest, &signature, public_key) {
            return Err(SignatureError::VerificationFailed);
        }
        Ok(())
    }
}
