//! Driven ports (Outbound dependencies)

use crate::domain::{SchemeTag, ValidatorSet};
use qc_10_signature_verification::{recover_address, EcdsaSignature, SignatureError};
use rayon::prelude::*;
use shared_types::{Address, Hash};

/// Key custody for a validator.
///
/// The proposer seal is always a recoverable secp256k1 signature over the
/// header identity hash. Committed seals use the scheme of the validator set.
///
/// # Security
/// Implementations never expose the private key; the signer only asks for
/// signatures over digests it has computed itself.
pub trait KeyManager: Send + Sync {
    /// Scheme of committed seals produced by this key manager
    fn scheme(&self) -> SchemeTag;

    /// Validator address (derived from the ECDSA key)
    fn address(&self) -> Address;

    /// Sign the header identity hash
    fn sign_proposer_seal(&self, digest: &Hash) -> Result<Vec<u8>, SignatureError>;

    /// Sign the commit digest
    fn sign_committed_seal(&self, digest: &Hash) -> Result<Vec<u8>, SignatureError>;

    /// Recover the proposer address from a proposer seal
    fn recover_proposer(&self, digest: &Hash, seal: &[u8]) -> Result<Address, SignatureError> {
        let signature = EcdsaSignature::from_slice(seal)?;
        recover_address(digest, &signature)
    }

    /// Identify the validator behind a committed seal.
    ///
    /// ECDSA seals recover their signer. BLS seals carry no recoverable
    /// identity, so they are matched against the keys in `validators`.
    fn recover_committed_seal_signer(
        &self,
        digest: &Hash,
        seal: &[u8],
        validators: &ValidatorSet,
    ) -> Result<Address, SignatureError>;

    /// Identify the signers of a whole committed seal list, in list order.
    ///
    /// Seals are expected in ascending signer address order. Implementations
    /// may rely on that to bound their work; the caller still checks the
    /// order of the returned addresses.
    fn recover_committed_seal_signers(
        &self,
        digest: &Hash,
        seals: &[Vec<u8>],
        validators: &ValidatorSet,
    ) -> Result<Vec<Address>, SignatureError> {
        seals
            .par_iter()
            .map(|seal| self.recover_committed_seal_signer(digest, seal, validators))
            .collect()
    }

    /// Check that `seal` is `signer`'s committed seal over `digest`.
    fn verify_committed_seal_signer(
        &self,
        digest: &Hash,
        seal: &[u8],
        signer: &Address,
        validators: &ValidatorSet,
    ) -> Result<(), SignatureError> {
        let actual = self.recover_committed_seal_signer(digest, seal, validators)?;
        if actual != *signer {
            return Err(SignatureError::SignerMismatch {
                expected: *signer,
                actual,
            });
        }
        Ok(())
    }
}
