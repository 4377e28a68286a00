//! # Append Committed Seal Attack
//!
//! ## Attack Vector
//!
//! Committed seals are collected after the proposer seal, so they cannot be
//! part of the hash they sign. A faulty validator scans finalized headers,
//! signs each one itself and appends its seal to the committed seal list.
//! If committed seals were not anchored anywhere, the rewritten chain would
//! carry the same block hashes as the honest one.
//!
//! ## Defense
//!
//! Every header copies its parent's committed seals into
//! `parent_committed_seal`, which the identity hash covers. Tampering with a
//! block's seals therefore changes the hash of every descendant. Only the
//! first block, whose parent is genesis, has nothing to anchor.

#[cfg(test)]
mod tests {
    use crate::fixtures::{build_chain, ecdsa_keys, init_tracing};
    use qc_08_ibft_signer::{
        domain::pack_field_into_extra, EcdsaKeyManager, IbftError, IbftSigner, IbftSignerApi,
    };
    use shared_types::Header;
    use std::sync::Arc;

    const NUM_HEADERS: u64 = 5;
    const NUM_NORMAL_VALIDATORS: usize = 4;

    /// Rewrite `headers` as a faulty validator would.
    fn forge_chain(
        signer: &IbftSigner<EcdsaKeyManager>,
        faulty: &IbftSigner<EcdsaKeyManager>,
        headers: &[Header],
    ) -> Vec<Header> {
        let mut forged: Vec<Header> = Vec::with_capacity(headers.len());

        for (i, honest) in headers.iter().enumerate() {
            let mut header = honest.clone();

            if i > 0 {
                let parent = &forged[i - 1];
                header.parent_hash = parent.hash;

                // carry over whatever the forged parent claims as its parent seals
                let parent_committed_seal = signer
                    .get_ibft_extra(parent)
                    .unwrap()
                    .parent_committed_seal;
                pack_field_into_extra(&mut header, signer.scheme(), |mut extra| {
                    extra.parent_committed_seal = parent_committed_seal;
                    extra
                })
                .unwrap();
            }

            let faulty_seal = faulty.create_committed_seal(&header).unwrap();
            pack_field_into_extra(&mut header, signer.scheme(), |mut extra| {
                extra.committed_seal.push(faulty_seal);
                extra
            })
            .unwrap();

            let header = header.compute_hash(&signer.header_hasher()).unwrap();
            forged.push(header);
        }

        forged
    }

    #[test]
    fn test_appended_committed_seal_changes_descendant_hashes() {
        init_tracing();
        let keys = ecdsa_keys(NUM_NORMAL_VALIDATORS + 1);
        let (normal, faulty_key) = keys.split_at(NUM_NORMAL_VALIDATORS);

        let signer = IbftSigner::new(Arc::clone(&normal[0]));
        let faulty = IbftSigner::new(Arc::clone(&faulty_key[0]));

        let headers = build_chain(&signer, normal, NUM_HEADERS);
        let forged = forge_chain(&signer, &faulty, &headers);

        for (i, (honest, forged)) in headers.iter().zip(&forged).enumerate() {
            if i == 0 {
                // first header has no parent committed seal to anchor
                assert_eq!(honest.hash, forged.hash);
            } else {
                assert_ne!(honest.hash, forged.hash, "header {} not detected", i + 1);
            }
        }
    }

    #[test]
    fn test_appended_seal_fails_verification_on_first_block() {
        let keys = ecdsa_keys(NUM_NORMAL_VALIDATORS + 1);
        let (normal, faulty_key) = keys.split_at(NUM_NORMAL_VALIDATORS);

        let signer = IbftSigner::new(Arc::clone(&normal[0]));
        let faulty = IbftSigner::new(Arc::clone(&faulty_key[0]));

        let headers = build_chain(&signer, normal, 1);
        let forged = forge_chain(&signer, &faulty, &headers);

        // the hash cannot tell, but the committed seals can
        let validators = signer.get_ibft_extra(&headers[0]).unwrap().validators;
        assert_eq!(
            signer.verify_committed_seals(&forged[0], &validators),
            Err(IbftError::TooManyCommittedSeals {
                got: 5,
                validators: 4
            })
        );
        assert_eq!(signer.verify_committed_seals(&headers[0], &validators), Ok(4));
    }

    #[test]
    fn test_full_hash_covers_appended_seal() {
        let keys = ecdsa_keys(NUM_NORMAL_VALIDATORS + 1);
        let (normal, faulty_key) = keys.split_at(NUM_NORMAL_VALIDATORS);

        let signer = IbftSigner::new(Arc::clone(&normal[0]));
        let faulty = IbftSigner::new(Arc::clone(&faulty_key[0]));

        let headers = build_chain(&signer, normal, 1);
        let forged = forge_chain(&signer, &faulty, &headers);

        assert_ne!(signer.hash(&headers[0]), signer.hash(&forged[0]));
    }
}
